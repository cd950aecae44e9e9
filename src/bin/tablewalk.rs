use std::{
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::{Context, Result};
use clap::Parser;
use tablewalk::{RestartPolicy, Statistics, Value, ValuesIterator, WalkOptions};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "tablewalk",
    about = "Print every value in a JSON document reached by a dotted wildcard pattern"
)]
struct Cli {
    /// JSON document to walk (`-` reads stdin).
    input: PathBuf,
    /// Dotted pattern, `*` matches any key (e.g. `services.*.ports.*`).
    pattern: String,
    /// Print values as compact JSON instead of table notation.
    #[arg(long)]
    json: bool,
    /// Prefix each value with the keys matched by the wildcards.
    #[arg(long)]
    keys: bool,
    /// Re-resolve from the root after every dead end.
    #[arg(long)]
    from_root: bool,
    /// Print walk statistics to stderr when done (as JSON with `--json`).
    #[arg(long)]
    stats: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let root = load_document(&cli.input)?;

    let statistics = Arc::new(Statistics::new());
    let options = WalkOptions {
        restart_policy: if cli.from_root {
            RestartPolicy::FromRoot
        } else {
            RestartPolicy::NearestWildcard
        },
        statistics: Some(Arc::clone(&statistics)),
    };

    let mut iter = ValuesIterator::with_options(&root, &cli.pattern, options)
        .with_context(|| format!("invalid pattern {:?}", cli.pattern))?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    while let Some(value) = iter.next() {
        if cli.keys {
            let keys: Vec<String> = iter.matched_keys().iter().map(|k| k.to_string()).collect();
            write!(out, "{}\t", keys.join("."))?;
        }
        if cli.json {
            let json = value
                .to_json()
                .with_context(|| format!("cannot render {} value as JSON", value.type_name()))?;
            writeln!(out, "{json}")?;
        } else {
            writeln!(out, "{value}")?;
        }
    }
    out.flush()?;

    if cli.stats {
        if cli.json {
            let snapshot = serde_json::to_string_pretty(&statistics.snapshot())?;
            eprintln!("{snapshot}");
        } else {
            eprintln!("{}", statistics.report());
        }
    }

    Ok(())
}

fn load_document(path: &Path) -> Result<Value> {
    if path.as_os_str() == "-" {
        Value::from_json_reader(io::stdin().lock()).context("failed to parse JSON from stdin")
    } else {
        Value::from_json_file(path)
            .with_context(|| format!("failed to load {}", path.display()))
    }
}

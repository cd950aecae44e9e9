use std::fmt;

use crate::{
    util::Key,
    value::{Value, table_addr},
};

/// Tables nested deeper than this render as `{...}`
const MAX_DISPLAY_DEPTH: usize = 32;

/// Renders scalars bare and tables as `{a = 1, b = "x", [0] = true}`
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => write!(f, "{s}"),
            _ => write_nested(self, &mut Vec::new(), f),
        }
    }
}

/// `path` holds the tables currently being rendered; a table already on it
/// renders as `{...}`.
fn write_nested(
    value: &Value,
    path: &mut Vec<*const ()>,
    f: &mut fmt::Formatter<'_>,
) -> fmt::Result {
    match value {
        Value::Null => write!(f, "null"),
        Value::Bool(b) => write!(f, "{b}"),
        Value::Int(i) => write!(f, "{i}"),
        Value::Float(x) => write!(f, "{x:?}"),
        Value::Str(s) => write!(f, "{s:?}"),
        Value::Object(_) => write!(f, "<object>"),
        Value::Table(table) => {
            let addr = table_addr(table);
            if path.len() >= MAX_DISPLAY_DEPTH || path.contains(&addr) {
                return write!(f, "{{...}}");
            }

            path.push(addr);
            let written = write_entries(table.entries(), path, f);
            path.pop();
            written
        }
    }
}

fn write_entries(
    entries: impl Iterator<Item = (Key, Value)>,
    path: &mut Vec<*const ()>,
    f: &mut fmt::Formatter<'_>,
) -> fmt::Result {
    write!(f, "{{")?;
    for (i, (key, item)) in entries.enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write_key(&key, f)?;
        write!(f, " = ")?;
        write_nested(&item, path, f)?;
    }
    write!(f, "}}")
}

fn write_key(key: &Key, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match key {
        Key::Int(i) => write!(f, "[{i}]"),
        Key::Str(s) if is_identifier(s) => write!(f, "{s}"),
        Key::Str(s) => write!(f, "[{s:?}]"),
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

use std::{fs::File, io::BufReader, io::Read, path::Path};

use serde_json::{Map, Number};

use crate::{
    table::SkipTable,
    util::{Key, Result, Status},
    value::{Value, table_addr},
};

impl Value {
    /// Convert a JSON document into nested tables
    ///
    /// Objects become tables with string keys, arrays become tables keyed by
    /// their 0-based position. Integers outside the `i64` range are stored
    /// as `Float` and may lose precision.
    pub fn from_json(json: serde_json::Value) -> Value {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(items) => {
                let table = SkipTable::new();
                for (i, item) in items.into_iter().enumerate() {
                    table.insert(i, Value::from_json(item));
                }
                Value::from(table)
            }
            serde_json::Value::Object(fields) => {
                let table = SkipTable::new();
                for (name, field) in fields {
                    table.insert(name, Value::from_json(field));
                }
                Value::from(table)
            }
        }
    }

    pub fn from_json_str(s: &str) -> Result<Value> {
        let json: serde_json::Value = serde_json::from_str(s)?;
        Ok(Value::from_json(json))
    }

    pub fn from_json_reader<R: Read>(reader: R) -> Result<Value> {
        let json: serde_json::Value = serde_json::from_reader(reader)?;
        Ok(Value::from_json(json))
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Value> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| Status::io_error(format!("{}: {e}", path.display())))?;
        Value::from_json_reader(BufReader::new(file))
    }

    /// Render this value as JSON
    ///
    /// A table whose keys are exactly `0..n` becomes an array, any other
    /// table becomes an object with stringified keys. Objects, non-finite
    /// floats, tables that contain themselves and nesting deeper than
    /// `MAX_JSON_DEPTH` have no JSON form.
    pub fn to_json(&self) -> Result<serde_json::Value> {
        to_json_nested(self, &mut Vec::new())
    }
}

/// Same limit serde_json applies when parsing
const MAX_JSON_DEPTH: usize = 128;

/// `path` holds the tables currently being converted, outermost first.
fn to_json_nested(value: &Value, path: &mut Vec<*const ()>) -> Result<serde_json::Value> {
    let json = match value {
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Int(i) => serde_json::Value::Number(Number::from(*i)),
        Value::Float(f) => Number::from_f64(*f)
            .map(serde_json::Value::Number)
            .ok_or_else(|| Status::not_supported(format!("float {f} has no JSON form")))?,
        Value::Str(s) => serde_json::Value::String(s.clone()),
        Value::Table(table) => {
            let addr = table_addr(table);
            if path.contains(&addr) {
                return Err(Status::not_supported("table contains itself"));
            }
            if path.len() >= MAX_JSON_DEPTH {
                return Err(Status::not_supported(format!(
                    "tables nested deeper than {MAX_JSON_DEPTH}"
                )));
            }

            path.push(addr);
            let json = table_to_json(table.entries().collect(), path);
            path.pop();
            json?
        }
        Value::Object(_) => {
            return Err(Status::not_supported("object values have no JSON form"));
        }
    };
    Ok(json)
}

fn table_to_json(
    entries: Vec<(Key, Value)>,
    path: &mut Vec<*const ()>,
) -> Result<serde_json::Value> {
    let is_array = entries
        .iter()
        .enumerate()
        .all(|(i, (key, _))| key.as_int() == Some(i as i64));

    if is_array && !entries.is_empty() {
        let items = entries
            .iter()
            .map(|(_, v)| to_json_nested(v, path))
            .collect::<Result<Vec<_>>>()?;
        Ok(serde_json::Value::Array(items))
    } else {
        let mut fields = Map::new();
        for (key, value) in &entries {
            fields.insert(key.to_string(), to_json_nested(value, path)?);
        }
        Ok(serde_json::Value::Object(fields))
    }
}

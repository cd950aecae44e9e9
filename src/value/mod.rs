/// Value module for tablewalk
///
/// A [`Value`] is one of three shapes as far as a path walk is concerned:
///
/// ```text
/// Value
///   ├─→ Table   (enumerable, keyed lookup)
///   ├─→ Object  (keyed lookup through Indexable, not enumerable)
///   └─→ scalar  (Null, Bool, Int, Float, Str: dead end for any lookup)
/// ```
///
/// Tables and objects are shared through `Arc`, so cloning a value is cheap
/// and never copies the underlying data.
use std::{collections::BTreeMap, fmt, sync::Arc};

use crate::{
    iterator::ValuesIterator,
    table::{SkipTable, Table},
    util::{Key, Result},
};

mod display;
mod json;

/// Custom field resolution for values that are not tables
///
/// Consulted only for literal path segments; an object can never be the
/// source of a wildcard enumeration.
pub trait Indexable: fmt::Debug + Send + Sync {
    fn index(&self, field: &str) -> Option<Value>;
}

#[derive(Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Table(Arc<dyn Table>),
    Object(Arc<dyn Indexable>),
}

impl Value {
    pub fn table(table: impl Table + 'static) -> Self {
        Value::Table(Arc::new(table))
    }

    pub fn object(object: impl Indexable + 'static) -> Self {
        Value::Object(Arc::new(object))
    }

    /// Resolve a literal path segment against this value
    ///
    /// Tables are searched for `Key::Str(name)` first and, when `name` is an
    /// integer, for `Key::Int` next. Objects delegate to [`Indexable::index`].
    /// Scalars have no fields.
    pub fn field(&self, name: &str) -> Option<Value> {
        match self {
            Value::Table(table) => table.get(&Key::from(name)).or_else(|| {
                name.parse::<i64>()
                    .ok()
                    .and_then(|i| table.get(&Key::Int(i)))
            }),
            Value::Object(object) => object.index(name),
            _ => None,
        }
    }

    /// Walk this value with a dotted wildcard pattern
    pub fn values(&self, pattern: &str) -> Result<ValuesIterator> {
        ValuesIterator::new(self, pattern)
    }

    pub fn as_table(&self) -> Option<&Arc<dyn Table>> {
        match self {
            Value::Table(table) => Some(table),
            _ => None,
        }
    }

    pub fn is_table(&self) -> bool {
        matches!(self, Value::Table(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::Table(_) => "table",
            Value::Object(_) => "object",
        }
    }
}

/// Identity of a shared table, ignoring the vtable
pub(crate) fn table_addr(table: &Arc<dyn Table>) -> *const () {
    Arc::as_ptr(table) as *const ()
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Table(a), Value::Table(b)) => table_addr(a) == table_addr(b),
            (Value::Object(a), Value::Object(b)) => {
                std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
            }
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Int(i) => write!(f, "Int({i})"),
            Value::Float(x) => write!(f, "Float({x})"),
            Value::Str(s) => write!(f, "Str({s:?})"),
            Value::Table(t) => write!(f, "Table({t:?})"),
            Value::Object(o) => write!(f, "Object({o:?})"),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<SkipTable> for Value {
    fn from(table: SkipTable) -> Self {
        Value::table(table)
    }
}

impl From<BTreeMap<Key, Value>> for Value {
    fn from(map: BTreeMap<Key, Value>) -> Self {
        Value::table(map)
    }
}

impl From<Arc<dyn Table>> for Value {
    fn from(table: Arc<dyn Table>) -> Self {
        Value::Table(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Point {
        x: i64,
        y: i64,
    }

    impl Indexable for Point {
        fn index(&self, field: &str) -> Option<Value> {
            match field {
                "x" => Some(Value::Int(self.x)),
                "y" => Some(Value::Int(self.y)),
                _ => None,
            }
        }
    }

    #[test]
    fn test_field_on_table() {
        let table = SkipTable::new();
        table.insert("name", "alpha");
        table.insert(0i64, "zero");
        let value = Value::from(table);

        assert_eq!(value.field("name"), Some(Value::from("alpha")));
        assert_eq!(value.field("0"), Some(Value::from("zero")));
        assert_eq!(value.field("missing"), None);
    }

    #[test]
    fn test_string_key_wins_over_int_key() {
        let table = SkipTable::new();
        table.insert("1", "string");
        table.insert(1i64, "int");
        assert_eq!(Value::from(table).field("1"), Some(Value::from("string")));
    }

    #[test]
    fn test_field_on_object() {
        let value = Value::object(Point { x: 3, y: 4 });
        assert_eq!(value.field("x"), Some(Value::Int(3)));
        assert_eq!(value.field("y"), Some(Value::Int(4)));
        assert_eq!(value.field("z"), None);
        assert!(!value.is_table());
    }

    #[test]
    fn test_field_on_scalar() {
        assert_eq!(Value::from(5).field("x"), None);
        assert_eq!(Value::from("text").field("len"), None);
        assert_eq!(Value::Null.field("x"), None);
    }

    #[test]
    fn test_table_identity_equality() {
        let a = Value::from(SkipTable::from_iter([("k", 1)]));
        let b = Value::from(SkipTable::from_iter([("k", 1)]));
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }

    #[test]
    fn test_accessors() {
        assert_eq!(Value::from(2).as_f64(), Some(2.0));
        assert_eq!(Value::from(true).as_bool(), Some(true));
        assert_eq!(Value::from("s").as_str(), Some("s"));
        assert_eq!(Value::from(1.5).type_name(), "float");
        assert!(Value::Null.is_null());
    }

    #[test]
    fn test_debug_self_referencing_table_terminates() {
        let shared = Arc::new(SkipTable::new());
        shared.insert("a", 1);
        shared.insert("self", Value::Table(shared.clone()));
        let value = Value::Table(shared.clone());
        assert_eq!(format!("{value:?}"), "Table({Key(\"a\"), Key(\"self\")})");

        shared.remove(&Key::from("self"));
    }
}

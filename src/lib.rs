//! Lazy wildcard path iteration over nested key-value tables.
//!
//! ```
//! let root = tablewalk::Value::from_json_str(
//!     r#"{"a": {"k1": {"value": 5}, "k2": {"value": 6}, "k3": {"other": 9}}}"#,
//! )
//! .unwrap();
//! let found: Vec<i64> = tablewalk::values(&root, "a.*.value")
//!     .unwrap()
//!     .filter_map(|v| v.as_int())
//!     .collect();
//! assert_eq!(found, vec![5, 6]);
//! ```

pub mod iterator;
pub mod options;
pub mod statistics;
pub mod table;
pub mod util;
pub mod value;

pub use iterator::{Pattern, Segment, ValuesIterator};
pub use options::{RestartPolicy, WalkOptions};
pub use statistics::{Statistics, StatisticsSnapshot};
pub use table::{SkipTable, Table};
pub use util::{Key, Result, Status};
pub use value::{Indexable, Value};

/// Walk `root` with a dotted wildcard pattern using default options
pub fn values(root: &Value, pattern: &str) -> Result<ValuesIterator> {
    ValuesIterator::new(root, pattern)
}

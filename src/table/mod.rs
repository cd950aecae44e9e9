/// Table module for tablewalk
///
/// A table is the hierarchical container a path walk descends through: a
/// mapping from [`Key`] to [`Value`], where values may themselves be tables.
///
/// # Enumeration
///
/// Enumeration is expressed as a resumable cursor rather than a borrowed
/// iterator:
///
/// ```text
/// next_entry(None)        -> first entry
/// next_entry(Some(&k1))   -> entry after k1
/// ...
/// next_entry(Some(&kn))   -> None (exhausted)
/// ```
///
/// A walker only has to remember the last key it consumed at each level to
/// pick up where it left off. The order is whatever the table provides, but
/// it must be stable while the table is not modified.
use std::{collections::BTreeMap, fmt, ops::Bound};

use crate::{util::Key, value::Value};

mod skip_table;

pub use skip_table::SkipTable;

/// Container contract required by the path walker
pub trait Table: fmt::Debug + Send + Sync {
    /// Look up the value stored under `key`
    fn get(&self, key: &Key) -> Option<Value>;

    /// Entry following `after` in enumeration order
    ///
    /// `None` asks for the first entry. Returns `None` once the enumeration
    /// is exhausted.
    fn next_entry(&self, after: Option<&Key>) -> Option<(Key, Value)>;

    /// Number of entries
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl dyn Table {
    /// Iterate all entries in enumeration order
    pub fn entries(&self) -> Entries<'_> {
        Entries {
            table: self,
            cursor: None,
            done: false,
        }
    }
}

/// Iterator over the entries of a table, driven by [`Table::next_entry`]
pub struct Entries<'a> {
    table: &'a dyn Table,
    cursor: Option<Key>,
    done: bool,
}

impl Iterator for Entries<'_> {
    type Item = (Key, Value);

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.table.next_entry(self.cursor.as_ref()) {
            Some((key, value)) => {
                self.cursor = Some(key.clone());
                Some((key, value))
            }
            None => {
                self.done = true;
                None
            }
        }
    }
}

impl Table for BTreeMap<Key, Value> {
    fn get(&self, key: &Key) -> Option<Value> {
        BTreeMap::get(self, key).cloned()
    }

    fn next_entry(&self, after: Option<&Key>) -> Option<(Key, Value)> {
        let lower = match after {
            Some(key) => Bound::Excluded(key),
            None => Bound::Unbounded,
        };
        self.range::<Key, _>((lower, Bound::Unbounded))
            .next()
            .map(|(k, v)| (k.clone(), v.clone()))
    }

    fn len(&self) -> usize {
        BTreeMap::len(self)
    }
}

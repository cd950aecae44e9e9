use std::{fmt, ops::Bound};

use crossbeam_skiplist::SkipMap;

use crate::{table::Table, util::Key, value::Value};

/// Ordered table backed by a concurrent skip list
///
/// Entries enumerate in ascending key order. Insertion only needs `&self`,
/// so a table can be filled after it has been shared behind an `Arc`.
///
/// # Implementation Notes
///
/// `next_entry` resumes at the first key strictly greater than the cursor
/// rather than at the cursor's position, so a walker holding a key that was
/// removed in the meantime still makes progress.
pub struct SkipTable {
    map: SkipMap<Key, Value>,
}

impl SkipTable {
    pub fn new() -> Self {
        SkipTable {
            map: SkipMap::new(),
        }
    }

    pub fn insert(&self, key: impl Into<Key>, value: impl Into<Value>) {
        self.map.insert(key.into(), value.into());
    }

    pub fn remove(&self, key: &Key) -> Option<Value> {
        self.map.remove(key).map(|entry| entry.value().clone())
    }
}

impl Default for SkipTable {
    fn default() -> Self {
        Self::new()
    }
}

impl Table for SkipTable {
    fn get(&self, key: &Key) -> Option<Value> {
        self.map.get(key).map(|entry| entry.value().clone())
    }

    fn next_entry(&self, after: Option<&Key>) -> Option<(Key, Value)> {
        let entry = match after {
            Some(key) => self
                .map
                .range::<Key, _>((Bound::Excluded(key), Bound::Unbounded))
                .next(),
            None => self.map.front(),
        };
        entry.map(|e| (e.key().clone(), e.value().clone()))
    }

    fn len(&self) -> usize {
        self.map.len()
    }
}

impl<K, V> FromIterator<(K, V)> for SkipTable
where
    K: Into<Key>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let table = SkipTable::new();
        for (key, value) in iter {
            table.insert(key, value);
        }
        table
    }
}

impl fmt::Debug for SkipTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Keys only; values may hold this table again.
        f.debug_set()
            .entries(self.map.iter().map(|e| e.key().clone()))
            .finish()
    }
}

use std::{iter::FusedIterator, sync::Arc};

use tracing::{debug, trace};

use crate::{
    iterator::pattern::{Pattern, Segment},
    options::{RestartPolicy, WalkOptions},
    statistics::Statistics,
    table::Table,
    util::{Key, Result},
    value::Value,
};

/// Lazy iterator over every value a wildcard pattern reaches
///
/// Literal segments are direct lookups, each `*` enumerates every key of the
/// table at that position. Wildcard combinations come out in odometer order:
/// the innermost wildcard cycles fastest and carries into the one before it
/// once its table is exhausted, exactly like nested loops written from the
/// outermost wildcard inwards.
///
/// Paths that cannot be completed (a missing field, a wildcard over something
/// that is not a table) are skipped silently.
///
/// ```
/// use tablewalk::{Value, ValuesIterator};
///
/// let root = Value::from_json_str(r#"{"x": {"p": 10, "q": 20}, "y": {"r": 30}}"#).unwrap();
/// let found: Vec<Value> = ValuesIterator::new(&root, "*.*").unwrap().collect();
/// assert_eq!(found, vec![Value::Int(10), Value::Int(20), Value::Int(30)]);
/// ```
///
/// # Implementation Notes
///
/// One frame per wildcard level entered so far. A frame keeps the table being
/// enumerated and the last key taken from it, so each call resumes with
/// `next_entry(cursor)` instead of starting the level over. Carrying pops the
/// frame; the parent frame then advances on the next loop turn. Everything
/// runs in a single loop, so the depth of the data never turns into stack
/// depth.
#[derive(Debug)]
pub struct ValuesIterator {
    root: Value,
    pattern: Pattern,
    options: WalkOptions,
    frames: Vec<Frame>,
    state: State,
}

#[derive(Debug)]
struct Frame {
    table: Arc<dyn Table>,
    /// Index of the wildcard segment this frame enumerates
    segment: usize,
    /// Last key taken at this level
    cursor: Option<Key>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Unstarted,
    Walking,
    Exhausted,
}

/// Outcome of resolving the segments after a wildcard (or from the root)
enum Step {
    /// Reached the end of the pattern
    Found(Value),
    /// Entered a new wildcard level
    Entered,
    DeadEnd,
}

impl ValuesIterator {
    pub fn new(root: &Value, pattern: &str) -> Result<Self> {
        Self::with_options(root, pattern, WalkOptions::default())
    }

    pub fn with_options(root: &Value, pattern: &str, options: WalkOptions) -> Result<Self> {
        let pattern = Pattern::parse(pattern)?;
        Ok(Self::from_pattern(root, pattern, options))
    }

    pub fn from_pattern(root: &Value, pattern: Pattern, options: WalkOptions) -> Self {
        debug!(
            %pattern,
            wildcards = pattern.wildcard_count(),
            policy = ?options.restart_policy,
            "starting walk"
        );
        if let Some(stats) = &options.statistics {
            stats.record_walk();
        }

        ValuesIterator {
            root: root.clone(),
            frames: Vec::with_capacity(pattern.wildcard_count()),
            pattern,
            options,
            state: State::Unstarted,
        }
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn is_exhausted(&self) -> bool {
        self.state == State::Exhausted
    }

    /// Keys bound to each wildcard, outermost first, for the value returned
    /// by the last call to `next`
    ///
    /// Empty before the first value and after exhaustion.
    pub fn matched_keys(&self) -> Vec<Key> {
        self.frames
            .iter()
            .filter_map(|frame| frame.cursor.clone())
            .collect()
    }

    fn advance(&mut self) -> Option<Value> {
        match self.state {
            State::Exhausted => return None,
            State::Unstarted => {
                self.state = State::Walking;
                let root = self.root.clone();
                match self.descend(root, 0) {
                    // Only a pattern without wildcards gets here: one value at most.
                    Step::Found(value) => {
                        self.finish();
                        return Some(value);
                    }
                    Step::DeadEnd => {
                        self.finish();
                        return None;
                    }
                    Step::Entered => {}
                }
            }
            State::Walking => {}
        }

        loop {
            let Some(frame) = self.frames.last_mut() else {
                self.finish();
                return None;
            };

            let Some((key, child)) = frame.table.next_entry(frame.cursor.as_ref()) else {
                trace!(level = self.frames.len(), "wildcard level exhausted, carrying");
                self.frames.pop();
                self.record(Statistics::record_carry);
                continue;
            };

            let next_segment = frame.segment + 1;
            frame.cursor = Some(key);
            self.record(Statistics::record_entry_scanned);

            match self.descend(child, next_segment) {
                Step::Found(value) => return Some(value),
                Step::Entered => {}
                Step::DeadEnd => self.restart(),
            }
        }
    }

    /// Resolve segments `from..` starting at `value`
    ///
    /// Stops at the first wildcard, pushing a fresh frame for it.
    fn descend(&mut self, mut value: Value, from: usize) -> Step {
        for idx in from..self.pattern.len() {
            match &self.pattern.segments()[idx] {
                Segment::Literal(name) => {
                    self.record(Statistics::record_lookup);
                    match value.field(name) {
                        Some(next) => value = next,
                        None => {
                            trace!(segment = idx, field = %name, kind = value.type_name(), "dead end");
                            self.record(Statistics::record_dead_end);
                            return Step::DeadEnd;
                        }
                    }
                }
                Segment::Wildcard => match value {
                    Value::Table(table) => {
                        self.frames.push(Frame {
                            table,
                            segment: idx,
                            cursor: None,
                        });
                        return Step::Entered;
                    }
                    other => {
                        trace!(segment = idx, kind = other.type_name(), "dead end: wildcard over non-table");
                        self.record(Statistics::record_dead_end);
                        return Step::DeadEnd;
                    }
                },
            }
        }
        Step::Found(value)
    }

    fn restart(&mut self) {
        match self.options.restart_policy {
            // The innermost frame advances on the next loop turn.
            RestartPolicy::NearestWildcard => {}
            RestartPolicy::FromRoot => self.rebuild_from_root(),
        }
    }

    /// Re-resolve the frame stack from the root, re-seating every level on
    /// its stored cursor
    ///
    /// Over an unmodified table this reproduces the same stack, so the walk
    /// continues exactly where it was. If a path vanished in the meantime the
    /// stack is cut at that level and the deepest surviving level advances.
    fn rebuild_from_root(&mut self) {
        self.record(Statistics::record_rebuild);
        let cursors: Vec<Option<Key>> = self.frames.drain(..).map(|f| f.cursor).collect();

        let mut value = self.root.clone();
        let mut level = 0;
        for (idx, segment) in self.pattern.segments().iter().enumerate() {
            if level == cursors.len() {
                break;
            }
            match segment {
                Segment::Literal(name) => {
                    self.record(Statistics::record_lookup);
                    match value.field(name) {
                        Some(next) => value = next,
                        None => break,
                    }
                }
                Segment::Wildcard => {
                    let Value::Table(table) = value else {
                        break;
                    };
                    let cursor = cursors[level].clone();
                    let child = cursor.as_ref().and_then(|key| table.get(key));
                    self.frames.push(Frame {
                        table,
                        segment: idx,
                        cursor,
                    });
                    level += 1;
                    match child {
                        Some(next) => value = next,
                        None => break,
                    }
                }
            }
        }
        trace!(levels = self.frames.len(), "rebuilt frames from root");
    }

    fn finish(&mut self) {
        if self.state != State::Exhausted {
            debug!(pattern = %self.pattern, "walk exhausted");
            self.state = State::Exhausted;
            self.frames.clear();
            self.record(Statistics::record_exhausted);
        }
    }

    #[inline]
    fn record(&self, f: impl FnOnce(&Statistics)) {
        if let Some(stats) = &self.options.statistics {
            f(stats);
        }
    }
}

impl Iterator for ValuesIterator {
    type Item = Value;

    fn next(&mut self) -> Option<Value> {
        let value = self.advance();
        if value.is_some() {
            self.record(Statistics::record_value);
        }
        value
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.state {
            State::Exhausted => (0, Some(0)),
            _ => (0, None),
        }
    }
}

impl FusedIterator for ValuesIterator {}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn walk(doc: serde_json::Value, pattern: &str) -> Vec<Value> {
        let root = Value::from_json(doc);
        ValuesIterator::new(&root, pattern).unwrap().collect()
    }

    #[test]
    fn test_single_wildcard() {
        let found = walk(json!({"a": 1, "b": 2, "c": 3}), "*");
        assert_eq!(found, vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
    }

    #[test]
    fn test_odometer_order() {
        let found = walk(json!({"x": {"p": 10, "q": 20}, "y": {"r": 30}}), "*.*");
        assert_eq!(found, vec![Value::Int(10), Value::Int(20), Value::Int(30)]);
    }

    #[test]
    fn test_literal_after_wildcard_skips_missing() {
        let doc = json!({"a": {"k1": {"value": 5}, "k2": {"value": 6}, "k3": {"other": 9}}});
        assert_eq!(walk(doc, "a.*.value"), vec![Value::Int(5), Value::Int(6)]);
    }

    #[test]
    fn test_literal_pattern_yields_once() {
        let root = Value::from_json(json!({"a": {"b": 7}}));
        let mut iter = ValuesIterator::new(&root, "a.b").unwrap();
        assert_eq!(iter.next(), Some(Value::Int(7)));
        assert!(iter.is_exhausted());
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn test_literal_pattern_missing() {
        assert!(walk(json!({"a": {"b": 7}}), "a.c").is_empty());
        assert!(walk(json!({"a": 1}), "a.b").is_empty());
    }

    #[test]
    fn test_empty_inner_table_carries() {
        let doc = json!({"a": {}, "b": {"x": 1}, "c": {}, "d": {"y": 2}});
        assert_eq!(walk(doc, "*.*"), vec![Value::Int(1), Value::Int(2)]);
    }

    #[test]
    fn test_wildcard_over_scalar_is_dead_end() {
        let doc = json!({"a": 1, "b": {"x": 2}, "c": "s"});
        assert_eq!(walk(doc, "*.*"), vec![Value::Int(2)]);
        assert!(walk(json!(5), "*").is_empty());
    }

    #[test]
    fn test_matched_keys() {
        let root = Value::from_json(json!({"x": {"p": 10}, "y": {"r": 30}}));
        let mut iter = ValuesIterator::new(&root, "*.*").unwrap();
        assert!(iter.matched_keys().is_empty());

        iter.next();
        assert_eq!(iter.matched_keys(), vec![Key::from("x"), Key::from("p")]);
        iter.next();
        assert_eq!(iter.matched_keys(), vec![Key::from("y"), Key::from("r")]);
        assert_eq!(iter.next(), None);
        assert!(iter.matched_keys().is_empty());
    }

    #[test]
    fn test_invalid_pattern() {
        let root = Value::from_json(json!({}));
        let err = ValuesIterator::new(&root, "a..b").unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_from_root_policy_matches_default() {
        let doc = json!({
            "a": {"k1": {"v": 1}, "k2": {"w": 2}, "k3": {"v": 3}},
            "b": 4,
            "c": {"k4": {"v": 5}}
        });
        let root = Value::from_json(doc);
        let options = WalkOptions {
            restart_policy: RestartPolicy::FromRoot,
            ..Default::default()
        };
        let rebuilt: Vec<Value> = ValuesIterator::with_options(&root, "*.*.v", options)
            .unwrap()
            .collect();
        let nearest: Vec<Value> = ValuesIterator::new(&root, "*.*.v").unwrap().collect();

        assert_eq!(nearest, vec![Value::Int(1), Value::Int(3), Value::Int(5)]);
        assert_eq!(rebuilt, nearest);
    }

    #[test]
    fn test_statistics_recorded() {
        let stats = Arc::new(Statistics::new());
        let root = Value::from_json(json!({"a": {"v": 1}, "b": {}, "c": {"w": 2}}));
        let options = WalkOptions::with_statistics(stats.clone());

        let found: Vec<Value> = ValuesIterator::with_options(&root, "*.v", options)
            .unwrap()
            .collect();
        assert_eq!(found, vec![Value::Int(1)]);

        let s = stats.snapshot();
        assert_eq!(s.walks, 1);
        assert_eq!(s.values_yielded, 1);
        assert_eq!(s.entries_scanned, 3);
        assert_eq!(s.dead_ends, 2);
        assert_eq!(s.carries, 1);
        assert_eq!(s.exhausted, 1);
        assert_eq!(s.rebuilds, 0);
    }
}

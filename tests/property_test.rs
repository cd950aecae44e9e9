use std::collections::BTreeMap;

use proptest::prelude::*;
use tablewalk::{RestartPolicy, SkipTable, Value, ValuesIterator, WalkOptions};

/// Plain model of a nested table, used as the reference
#[derive(Debug, Clone)]
enum Node {
    Leaf(i64),
    Map(BTreeMap<String, Node>),
}

fn node_strategy() -> impl Strategy<Value = Node> {
    let leaf = any::<i64>().prop_map(Node::Leaf);
    leaf.prop_recursive(4, 64, 4, |inner| {
        prop::collection::btree_map("[a-d]", inner, 0..4).prop_map(Node::Map)
    })
}

fn segment_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        2 => Just("*".to_string()),
        1 => "[a-d]",
    ]
}

fn pattern_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(segment_strategy(), 1..5)
}

fn to_value(node: &Node) -> Value {
    match node {
        Node::Leaf(i) => Value::Int(*i),
        Node::Map(children) => {
            let table = SkipTable::new();
            for (name, child) in children {
                table.insert(name.as_str(), to_value(child));
            }
            Value::from(table)
        }
    }
}

/// Nested-loop expansion of the pattern over the model
fn expand(node: &Node, segments: &[String], out: &mut Vec<i64>) {
    let Some((head, rest)) = segments.split_first() else {
        if let Node::Leaf(i) = node {
            out.push(*i);
        }
        return;
    };
    let Node::Map(children) = node else {
        return;
    };
    if head == "*" {
        for child in children.values() {
            expand(child, rest, out);
        }
    } else if let Some(child) = children.get(head) {
        expand(child, rest, out);
    }
}

/// Number of values the pattern reaches, tables included
fn expand_all(node: &Node, segments: &[String]) -> usize {
    let Some((head, rest)) = segments.split_first() else {
        return 1;
    };
    let Node::Map(children) = node else {
        return 0;
    };
    if head == "*" {
        children.values().map(|c| expand_all(c, rest)).sum()
    } else {
        children.get(head).map_or(0, |c| expand_all(c, rest))
    }
}

proptest! {
    /// Property: the iterator visits exactly what nested loops over the
    /// wildcards would, in the same order
    #[test]
    fn property_matches_nested_loops(node in node_strategy(), segments in pattern_strategy()) {
        let root = to_value(&node);
        let pattern = segments.join(".");

        let found: Vec<Value> = tablewalk::values(&root, &pattern).unwrap().collect();
        prop_assert_eq!(found.len(), expand_all(&node, &segments));

        let leaves: Vec<i64> = found.iter().filter_map(Value::as_int).collect();
        let mut expected = Vec::new();
        expand(&node, &segments, &mut expected);
        prop_assert_eq!(leaves, expected);
    }

    /// Property: both restart policies produce the same sequence
    #[test]
    fn property_restart_policies_agree(node in node_strategy(), segments in pattern_strategy()) {
        let root = to_value(&node);
        let pattern = segments.join(".");

        let nearest: Vec<Value> = tablewalk::values(&root, &pattern).unwrap().collect();
        let options = WalkOptions {
            restart_policy: RestartPolicy::FromRoot,
            ..Default::default()
        };
        let rebuilt: Vec<Value> = ValuesIterator::with_options(&root, &pattern, options)
            .unwrap()
            .collect();
        prop_assert_eq!(nearest, rebuilt);
    }

    /// Property: exhaustion is sticky
    #[test]
    fn property_exhaustion_sticky(node in node_strategy(), segments in pattern_strategy()) {
        let root = to_value(&node);
        let mut iter = tablewalk::values(&root, &segments.join(".")).unwrap();
        while iter.next().is_some() {}
        for _ in 0..3 {
            prop_assert!(iter.next().is_none());
        }
        prop_assert!(iter.is_exhausted());
    }

    /// Property: every value comes with one matched key per wildcard
    #[test]
    fn property_matched_keys_per_wildcard(node in node_strategy(), segments in pattern_strategy()) {
        let root = to_value(&node);
        let wildcards = segments.iter().filter(|s| *s == "*").count();
        let mut iter = tablewalk::values(&root, &segments.join(".")).unwrap();
        while iter.next().is_some() {
            prop_assert_eq!(iter.matched_keys().len(), wildcards);
        }
    }
}

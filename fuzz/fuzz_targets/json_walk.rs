#![no_main]

use libfuzzer_sys::fuzz_target;
use tablewalk::{RestartPolicy, Value, ValuesIterator, WalkOptions};

// Fuzz target for walking arbitrary JSON documents.
// Input layout: <pattern>\n<json document>. Both restart policies must agree
// and exhaustion must stay sticky.
fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Some((pattern, doc)) = text.split_once('\n') else {
        return;
    };
    let Ok(root) = Value::from_json_str(doc) else {
        return;
    };

    let Ok(mut nearest) = ValuesIterator::new(&root, pattern) else {
        return;
    };
    let options = WalkOptions {
        restart_policy: RestartPolicy::FromRoot,
        ..Default::default()
    };
    let rebuilt: Vec<Value> = ValuesIterator::with_options(&root, pattern, options)
        .expect("pattern already accepted")
        .collect();

    let mut found = Vec::new();
    for value in nearest.by_ref() {
        found.push(value);
    }
    assert_eq!(found, rebuilt);
    assert!(nearest.next().is_none());
    assert!(nearest.is_exhausted());
});

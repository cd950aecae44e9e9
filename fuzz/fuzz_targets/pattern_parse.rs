#![no_main]

use libfuzzer_sys::fuzz_target;
use tablewalk::{Pattern, Segment};

// Fuzz target for pattern parsing.
// Any accepted pattern must print back to the same text and have no empty
// literal segments.
fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    match Pattern::parse(text) {
        Ok(pattern) => {
            assert_eq!(pattern.to_string(), text, "display must round-trip");
            assert!(!pattern.is_empty());
            let wildcards = pattern
                .segments()
                .iter()
                .filter(|s| s.is_wildcard())
                .count();
            assert_eq!(wildcards, pattern.wildcard_count());
            for segment in pattern.segments() {
                if let Segment::Literal(name) = segment {
                    assert!(!name.is_empty() && !name.contains('.'));
                }
            }
        }
        Err(status) => {
            assert!(status.is_invalid_argument(), "unexpected error for {text:?}: {status}");
        }
    }
});

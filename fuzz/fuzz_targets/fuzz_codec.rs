#![no_main]

use bookindex::index::{parse_line, read_into, TermIndex};
use bookindex::utils::{format_ranges, parse_range_token};
use libfuzzer_sys::fuzz_target;

/// Pages a fuzz input may expand to before it is too slow to apply
const MAX_EXPANDED_PAGES: u64 = 100_000;

fuzz_target!(|data: &str| {
    // Range tokens must never panic, and any valid range must render back
    // to something that parses to the same range
    for token in data.split([' ', ',']) {
        if let Ok(range) = parse_range_token(token) {
            let rendered = range.to_string();
            assert_eq!(parse_range_token(&rendered), Ok(range));
        }
    }

    // Parse every line without applying it; ranges stay unexpanded
    let mut line_ok = true;
    let mut expanded: u64 = 0;
    for (i, line) in data.lines().enumerate() {
        match parse_line(line, i + 1) {
            Ok(Some(parsed)) => {
                expanded += parsed
                    .ranges
                    .iter()
                    .map(|r| (r.end as i64 - r.start as i64 + 1) as u64)
                    .sum::<u64>();
            }
            Ok(None) => {}
            Err(_) => {
                line_ok = false;
                break;
            }
        }
    }

    // The whole-input reader agrees with the line parser, and whatever it
    // builds serializes to text that parses again
    if expanded <= MAX_EXPANDED_PAGES {
        let mut index = TermIndex::new();
        let result = read_into(&mut index, data.as_bytes());
        assert_eq!(result.is_ok(), line_ok);

        let text = index.to_string();
        assert!(text.parse::<TermIndex>().is_ok());
    }

    // Rendering sorted bytes as pages must never panic
    let mut pages: Vec<i32> = data.bytes().map(i32::from).collect();
    pages.sort_unstable();
    pages.dedup();
    let _ = format_ranges(pages);
});

//! Property-based tests for duration formatting
//!
//! These tests verify invariants that should hold for all inputs:
//! - Formatting is deterministic
//! - Below one year, the parts add back up to the input
//! - The seconds fragment always carries three decimals

use dev_tools::formatting::{format_duration, format_duration_secs};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::time::Duration;

const CALENDAR_YEAR: u64 = 365 * 24 * 60 * 60;

/// Parse a sub-year breakdown (`"2 days 3h 4m 5.000s"`) back to seconds.
fn parse_back(text: &str) -> f64 {
    let tokens: Vec<&str> = text.split(' ').collect();
    let mut total = 0.0;
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i];
        if let Some(h) = token.strip_suffix('h') {
            total += h.parse::<f64>().unwrap() * 3600.0;
        } else if let Some(m) = token.strip_suffix('m') {
            total += m.parse::<f64>().unwrap() * 60.0;
        } else if let Some(s) = token.strip_suffix('s') {
            total += s.parse::<f64>().unwrap();
        } else {
            let count: f64 = token.parse().unwrap();
            i += 1;
            assert!(tokens[i].starts_with("day"), "unexpected unit in {text}");
            total += count * 86_400.0;
        }
        i += 1;
    }
    total
}

#[test]
fn test_known_outputs() {
    let cases = [
        (0.0, "0.000s"),
        (5.0, "5.000s"),
        (65.0, "1m 5.000s"),
        (3665.0, "1h 1m 5.000s"),
        (86_400.0, "1 day"),
        (90_061.0, "1 day 1h 1m 1.000s"),
        (31_536_000.0, "1 year"),
    ];
    for (input, expected) in cases {
        assert_eq!(format_duration_secs(input), expected, "input {input}");
    }
}

#[test]
fn test_duration_and_seconds_agree() {
    assert_eq!(
        format_duration(Duration::from_secs(93_784)),
        format_duration_secs(93_784.0)
    );
}

proptest! {
    /// Property: the same input always renders the same text
    #[test]
    fn prop_formatting_is_deterministic(secs in 0.0f64..1.0e10) {
        prop_assert_eq!(format_duration_secs(secs), format_duration_secs(secs));
    }

    /// Property: below one calendar year the rendered parts sum to the input
    #[test]
    fn prop_parts_sum_to_input(secs in 1u64..CALENDAR_YEAR) {
        let text = format_duration_secs(secs as f64);
        prop_assert_eq!(parse_back(&text), secs as f64, "text was {}", text);
    }

    /// Property: a seconds fragment, when present, has exactly three decimals
    #[test]
    fn prop_seconds_fragment_has_three_decimals(secs in 0.001f64..1.0e7) {
        let text = format_duration_secs(secs);
        if let Some(last) = text.rsplit(' ').next().and_then(|t| t.strip_suffix('s')) {
            if let Some((_, decimals)) = last.split_once('.') {
                prop_assert_eq!(decimals.len(), 3, "text was {}", text);
            }
        }
    }

    /// Property: output is never empty and never contains a zero count unit
    #[test]
    fn prop_no_zero_count_units(secs in 0u64..10 * CALENDAR_YEAR) {
        let text = format_duration_secs(secs as f64);
        prop_assert!(!text.is_empty());
        for token in text.split(' ') {
            prop_assert!(token != "0" && token != "0h" && token != "0m", "text was {}", text);
        }
    }
}

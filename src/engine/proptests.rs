//! Property-based tests for the intent cascade
//!
//! These verify the routing precedence holds across all inputs, not just
//! the handful of phrases in the unit tests.

use super::intent::{classify, Intent};
use proptest::prelude::*;

proptest! {
    // While awaiting a pick, any pure digit string routes to selection,
    // before any keyword is considered.
    #[test]
    fn digits_select_only_while_awaiting(raw in "[0-9]{1,8}") {
        prop_assert_eq!(
            classify(true, &raw),
            Intent::Select { raw: raw.clone() }
        );
        prop_assert!(
            !matches!(classify(false, &raw), Intent::Select { .. }),
            "classify(false, ..) must not produce Intent::Select"
        );
    }

    // Nothing that contains a non-digit ever routes to selection.
    #[test]
    fn mixed_text_never_selects(
        prefix in "[0-9]{0,3}",
        middle in "[a-z ]{1,10}",
        suffix in "[0-9]{0,3}",
    ) {
        let text = format!("{prefix}{middle}{suffix}");
        prop_assert!(
            !matches!(classify(true, &text), Intent::Select { .. }),
            "classify(true, ..) on mixed text must not produce Intent::Select"
        );
    }

    // The greeting check precedes every later keyword check.
    #[test]
    fn greeting_precedes_other_keywords(prefix in "[a-z ]{0,10}") {
        let text = format!("{prefix}hello, make reservation and place order");
        prop_assert_eq!(classify(false, &text), Intent::Greet);
    }

    // Keyword matching is insensitive to case.
    #[test]
    fn keywords_match_any_case(
        upper in prop::bool::ANY,
        keyword in prop::sample::select(vec![
            "find restaurants",
            "view menu",
            "make reservation",
            "place order",
        ]),
    ) {
        let text = if upper { keyword.to_uppercase() } else { keyword.to_string() };
        prop_assert!(!matches!(classify(false, &text), Intent::Unknown));
    }

    // Classification never panics on arbitrary input.
    #[test]
    fn classify_is_total(expecting in prop::bool::ANY, text in ".{0,64}") {
        let _ = classify(expecting, &text);
    }
}

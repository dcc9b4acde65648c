//! Property-based tests for amount-in-words conversion.

use proptest::prelude::*;

use crate::payroll::words::amount_in_words;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Every result ends in "Rupees Only".
    #[test]
    fn prop_always_ends_in_rupees_only(amount in any::<u64>()) {
        let words = amount_in_words(amount);
        prop_assert!(words.ends_with("Rupees Only"));
    }

    /// No double spaces, no leading or trailing whitespace.
    #[test]
    fn prop_clean_spacing(amount in any::<u64>()) {
        let words = amount_in_words(amount);
        prop_assert!(!words.contains("  "), "double space in: {words}");
        prop_assert_eq!(words.trim(), words.as_str());
    }

    /// Only zero is spelled "Zero".
    #[test]
    fn prop_zero_word_only_for_zero(amount in 1u64..) {
        let words = amount_in_words(amount);
        prop_assert!(!words.contains("Zero"));
    }

    /// The conversion is a pure function.
    #[test]
    fn prop_deterministic(amount in any::<u64>()) {
        prop_assert_eq!(amount_in_words(amount), amount_in_words(amount));
    }

    /// Exact round lakh values contain no smaller scale words.
    #[test]
    fn prop_round_lakh_has_no_lower_scales(lakhs in 1u64..100) {
        let words = amount_in_words(lakhs * 100_000);
        prop_assert!(words.contains("Lakh"));
        prop_assert!(!words.contains("Thousand"));
        prop_assert!(!words.contains("Hundred"));
    }
}

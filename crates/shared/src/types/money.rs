//! Currency rendering helpers.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! All amounts are `rust_decimal::Decimal` end to end.

use rust_decimal::Decimal;

/// Formats a decimal amount with Indian digit grouping.
///
/// The integer part groups the last three digits, then pairs:
/// `12345678` with two decimals becomes `1,23,45,678.00`. Summary
/// figures pass `decimals = 0`, ledger figures pass `decimals = 2`.
#[must_use]
pub fn format_indian(amount: Decimal, decimals: u32) -> String {
    let rounded = amount.round_dp(decimals);
    let negative = rounded.is_sign_negative();
    let text = rounded.abs().to_string();

    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i.to_string(), f.to_string()),
        None => (text, String::new()),
    };

    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::new();
    let mut count: usize = 0;
    for i in (0..digits.len()).rev() {
        // Comma after the first 3 digits, then after every 2.
        if count == 3 || (count > 3 && (count - 3) % 2 == 0) {
            grouped.push(',');
        }
        grouped.push(digits[i]);
        count += 1;
    }
    let mut out: String = grouped.chars().rev().collect();

    if decimals > 0 {
        let mut frac = frac_part;
        while (frac.len() as u32) < decimals {
            frac.push('0');
        }
        out.push('.');
        out.push_str(&frac);
    }

    if negative {
        out.insert(0, '-');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(dec!(12345678), "1,23,45,678")]
    #[case(dec!(1234567), "12,34,567")]
    #[case(dec!(100000), "1,00,000")]
    #[case(dec!(1000), "1,000")]
    #[case(dec!(999), "999")]
    #[case(dec!(0), "0")]
    fn test_format_indian_grouping(
        #[case] amount: rust_decimal::Decimal,
        #[case] expected: &str,
    ) {
        assert_eq!(format_indian(amount, 0), expected);
    }

    #[test]
    fn test_format_indian_fraction_padding() {
        assert_eq!(format_indian(dec!(12345678.5), 2), "1,23,45,678.50");
        assert_eq!(format_indian(dec!(45000), 2), "45,000.00");
    }

    #[test]
    fn test_format_indian_rounds_summary_figures() {
        assert_eq!(format_indian(dec!(1234.56), 0), "1,235");
    }

    #[test]
    fn test_format_indian_negative() {
        assert_eq!(format_indian(dec!(-123456), 0), "-1,23,456");
    }
}

//! Amount-in-words conversion using the Indian numbering system.
//!
//! Amounts are spelled out on the crore/lakh/thousand scale
//! (1 crore = 10,000,000; 1 lakh = 100,000), not the Western
//! million/billion scale.

const CRORE: u64 = 10_000_000;
const LAKH: u64 = 100_000;
const THOUSAND: u64 = 1_000;

const BELOW_TWENTY: [&str; 20] = [
    "", "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine", "Ten", "Eleven",
    "Twelve", "Thirteen", "Fourteen", "Fifteen", "Sixteen", "Seventeen", "Eighteen", "Nineteen",
];

const TENS: [&str; 10] = [
    "", "", "Twenty", "Thirty", "Forty", "Fifty", "Sixty", "Seventy", "Eighty", "Ninety",
];

/// Converts a non-negative rupee amount into English words.
///
/// The result always ends in "Rupees Only" and never contains
/// consecutive spaces.
#[must_use]
pub fn amount_in_words(amount: u64) -> String {
    if amount == 0 {
        return "Zero Rupees Only".to_string();
    }

    format!("{} Rupees Only", integer_words(amount))
}

/// Spells out a positive integer on the Indian scale.
fn integer_words(n: u64) -> String {
    let mut parts: Vec<String> = Vec::new();

    let crore = n / CRORE;
    let lakh = (n % CRORE) / LAKH;
    let thousand = (n % LAKH) / THOUSAND;
    let below_thousand = n % THOUSAND;

    if crore > 0 {
        // Recursion covers amounts past 999 crore ("One Hundred Crore" etc.).
        parts.push(format!("{} Crore", integer_words(crore)));
    }
    if lakh > 0 {
        parts.push(format!("{} Lakh", three_digit_words(lakh)));
    }
    if thousand > 0 {
        parts.push(format!("{} Thousand", three_digit_words(thousand)));
    }
    if below_thousand > 0 {
        parts.push(three_digit_words(below_thousand));
    }

    parts.join(" ")
}

/// Spells out a value in 1..=999.
fn three_digit_words(n: u64) -> String {
    let hundreds = n / 100;
    let rest = n % 100;

    match (hundreds, rest) {
        (0, r) => two_digit_words(r),
        (h, 0) => format!("{} Hundred", BELOW_TWENTY[h as usize]),
        (h, r) => format!("{} Hundred {}", BELOW_TWENTY[h as usize], two_digit_words(r)),
    }
}

/// Spells out a value in 1..=99.
fn two_digit_words(n: u64) -> String {
    if n < 20 {
        return BELOW_TWENTY[n as usize].to_string();
    }

    let tens = TENS[(n / 10) as usize];
    let units = n % 10;
    if units == 0 {
        tens.to_string()
    } else {
        format!("{} {}", tens, BELOW_TWENTY[units as usize])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_zero() {
        assert_eq!(amount_in_words(0), "Zero Rupees Only");
    }

    #[test]
    fn test_one_lakh() {
        assert_eq!(amount_in_words(100_000), "One Lakh Rupees Only");
    }

    #[test]
    fn test_one_hundred() {
        assert_eq!(amount_in_words(100), "One Hundred Rupees Only");
    }

    #[test]
    fn test_full_decomposition() {
        assert_eq!(
            amount_in_words(1_234_567),
            "Twelve Lakh Thirty Four Thousand Five Hundred Sixty Seven Rupees Only"
        );
    }

    #[test]
    fn test_crore_scale() {
        assert_eq!(
            amount_in_words(12_345_678),
            "One Crore Twenty Three Lakh Forty Five Thousand Six Hundred Seventy Eight Rupees Only"
        );
    }

    #[rstest]
    #[case(15, "Fifteen Rupees Only")]
    #[case(40, "Forty Rupees Only")]
    #[case(99, "Ninety Nine Rupees Only")]
    #[case(1_000, "One Thousand Rupees Only")]
    #[case(10_000_000, "One Crore Rupees Only")]
    #[case(1_000_000_000, "One Hundred Crore Rupees Only")]
    fn test_teens_tens_and_round_scales(#[case] amount: u64, #[case] expected: &str) {
        assert_eq!(amount_in_words(amount), expected);
    }

    #[test]
    fn test_typical_salary() {
        assert_eq!(
            amount_in_words(48_000),
            "Forty Eight Thousand Rupees Only"
        );
        assert_eq!(
            amount_in_words(52_350),
            "Fifty Two Thousand Three Hundred Fifty Rupees Only"
        );
    }
}

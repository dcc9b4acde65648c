//! Payslip document assembly and filename derivation.

use chrono::{Datelike, NaiveDate};

use crate::payroll::compute::{DeductionLines, EarningLines, PayslipTotals};
use crate::payroll::types::PayPeriod;

/// All data needed to render one payslip.
#[derive(Debug, Clone)]
pub struct PayslipDocument {
    /// Organization name for the header.
    pub organization: String,
    /// Employee display name.
    pub employee_name: String,
    /// Employee display identifier.
    pub person_no: String,
    /// Employee designation, if recorded.
    pub designation: Option<String>,
    /// Employee department, if recorded.
    pub department: Option<String>,
    /// Bank account number, if recorded.
    pub account_number: Option<String>,
    /// The pay period this slip covers.
    pub period: PayPeriod,
    /// Itemized earnings.
    pub earnings: EarningLines,
    /// Itemized deductions.
    pub deductions: DeductionLines,
    /// Derived totals.
    pub totals: PayslipTotals,
}

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Returns the English month name for a date.
#[must_use]
pub fn month_name(date: NaiveDate) -> &'static str {
    MONTH_NAMES[date.month0() as usize]
}

/// Title-cases a display name, preserving interior spaces.
#[must_use]
pub fn title_case(name: &str) -> String {
    name.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Derives the download filename for a payslip.
///
/// The month/year token comes from the period END date, never the pay
/// date. A pay date trailing into the next month must not mis-file
/// the slip.
#[must_use]
pub fn payslip_filename(employee_name: &str, period_end: NaiveDate) -> String {
    format!(
        "{}_{}_{}.pdf",
        title_case(employee_name),
        month_name(period_end),
        period_end.year()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("jane doe"), "Jane Doe");
        assert_eq!(title_case("RAVI KUMAR"), "Ravi Kumar");
        assert_eq!(title_case("anita"), "Anita");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_filename_uses_period_end_not_pay_date() {
        // Pay date 2026-01-05 must not pull the slip into January.
        let name = payslip_filename("jane doe", date(2025, 12, 31));
        assert_eq!(name, "Jane Doe_December_2025.pdf");
    }

    #[test]
    fn test_filename_mid_year() {
        assert_eq!(
            payslip_filename("ravi kumar", date(2025, 6, 30)),
            "Ravi Kumar_June_2025.pdf"
        );
    }

    #[test]
    fn test_month_name() {
        assert_eq!(month_name(date(2025, 1, 15)), "January");
        assert_eq!(month_name(date(2025, 12, 1)), "December");
    }
}

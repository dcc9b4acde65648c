//! Payroll domain types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::payroll::error::PayrollError;

/// Payroll run status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PayrollStatus {
    /// Run is being prepared; payslips may still be generated.
    Draft,
    /// Run has been approved; payslips are frozen.
    Approved,
    /// Salaries have been disbursed.
    Paid,
}

impl PayrollStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::Approved => "APPROVED",
            Self::Paid => "PAID",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "DRAFT" => Some(Self::Draft),
            "APPROVED" => Some(Self::Approved),
            "PAID" => Some(Self::Paid),
            _ => None,
        }
    }

    /// Returns true if payslips may still be generated for this run.
    #[must_use]
    pub fn is_editable(&self) -> bool {
        matches!(self, Self::Draft)
    }
}

impl fmt::Display for PayrollStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A pay period with its disbursement date.
///
/// The pay date may trail the period into the following calendar
/// month; the period end date is what names the payslip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayPeriod {
    /// First day covered by the run.
    pub start: NaiveDate,
    /// Last day covered by the run.
    pub end: NaiveDate,
    /// When salaries are disbursed.
    pub pay_date: NaiveDate,
}

impl PayPeriod {
    /// Creates a validated pay period.
    ///
    /// # Errors
    ///
    /// Returns `PayrollError::InvalidPeriod` if the end date precedes
    /// the start date.
    pub fn new(start: NaiveDate, end: NaiveDate, pay_date: NaiveDate) -> Result<Self, PayrollError> {
        if end < start {
            return Err(PayrollError::InvalidPeriod { start, end });
        }
        Ok(Self {
            start,
            end,
            pay_date,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_status_parse_roundtrip() {
        for status in [
            PayrollStatus::Draft,
            PayrollStatus::Approved,
            PayrollStatus::Paid,
        ] {
            assert_eq!(PayrollStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(PayrollStatus::parse("pending"), None);
    }

    #[test]
    fn test_only_draft_is_editable() {
        assert!(PayrollStatus::Draft.is_editable());
        assert!(!PayrollStatus::Approved.is_editable());
        assert!(!PayrollStatus::Paid.is_editable());
    }

    #[test]
    fn test_period_validation() {
        assert!(
            PayPeriod::new(date(2025, 12, 1), date(2025, 12, 31), date(2026, 1, 5)).is_ok()
        );
        let result = PayPeriod::new(date(2025, 12, 31), date(2025, 12, 1), date(2026, 1, 5));
        assert!(matches!(result, Err(PayrollError::InvalidPeriod { .. })));
    }
}

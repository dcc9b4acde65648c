//! Employee lifecycle status.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Employment status of an employee record.
///
/// The set is closed; anything else is rejected at the API boundary
/// before it can reach the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EmployeeStatus {
    /// On the payroll and eligible for leave and payslips.
    Active,
    /// Separated or suspended; record is kept for history.
    Inactive,
}

impl EmployeeStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Inactive => "INACTIVE",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "ACTIVE" => Some(Self::Active),
            "INACTIVE" => Some(Self::Inactive),
            _ => None,
        }
    }
}

impl fmt::Display for EmployeeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse_roundtrip() {
        for status in [EmployeeStatus::Active, EmployeeStatus::Inactive] {
            assert_eq!(EmployeeStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(
            EmployeeStatus::parse("inactive"),
            Some(EmployeeStatus::Inactive)
        );
    }

    #[test]
    fn test_status_parse_rejects_unknown() {
        assert_eq!(EmployeeStatus::parse("TERMINATED"), None);
        assert_eq!(EmployeeStatus::parse(""), None);
        assert_eq!(EmployeeStatus::parse("ACTIVE "), None);
    }
}

//! Payroll error types.

use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur during payroll operations.
#[derive(Debug, Error)]
pub enum PayrollError {
    /// Payroll run not found.
    #[error("Payroll run {0} not found")]
    RunNotFound(Uuid),

    /// Payslip not found.
    #[error("Payslip {0} not found")]
    PayslipNotFound(Uuid),

    /// Period end precedes period start.
    #[error("Period end {end} is before period start {start}")]
    InvalidPeriod {
        /// Period start date.
        start: NaiveDate,
        /// Period end date.
        end: NaiveDate,
    },

    /// The run is no longer in a state that accepts payslips.
    #[error("Payroll run is {status} and no longer accepts payslips")]
    RunNotEditable {
        /// The run's current status.
        status: String,
    },

    /// PDF rendering failed.
    #[error("Failed to render payslip: {0}")]
    Render(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl PayrollError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidPeriod { .. } => 400,
            Self::RunNotFound(_) | Self::PayslipNotFound(_) => 404,
            Self::RunNotEditable { .. } => 409,
            Self::Render(_) | Self::Database(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::RunNotFound(_) => "run_not_found",
            Self::PayslipNotFound(_) => "payslip_not_found",
            Self::InvalidPeriod { .. } => "invalid_period",
            Self::RunNotEditable { .. } => "run_not_editable",
            Self::Render(_) => "render_failed",
            Self::Database(_) => "database_error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_errors() {
        assert_eq!(PayrollError::RunNotFound(Uuid::nil()).status_code(), 404);
        assert_eq!(
            PayrollError::PayslipNotFound(Uuid::nil()).error_code(),
            "payslip_not_found"
        );
    }

    #[test]
    fn test_conflict_errors() {
        let err = PayrollError::RunNotEditable {
            status: "PAID".to_string(),
        };
        assert_eq!(err.status_code(), 409);
        assert_eq!(err.error_code(), "run_not_editable");
    }

    #[test]
    fn test_render_error_is_internal() {
        assert_eq!(PayrollError::Render("font".into()).status_code(), 500);
    }
}

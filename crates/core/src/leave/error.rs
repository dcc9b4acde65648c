//! Leave workflow error types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

use crate::leave::types::LeaveStatus;

/// Errors that can occur during leave operations.
#[derive(Debug, Error)]
pub enum LeaveError {
    /// Attempted an invalid status transition.
    #[error("Invalid status transition from {from} to {to}")]
    InvalidTransition {
        /// The current status.
        from: LeaveStatus,
        /// The attempted target status.
        to: LeaveStatus,
    },

    /// A leave policy must be selected.
    #[error("A leave policy is required")]
    PolicyRequired,

    /// A start date must be provided.
    #[error("A start date is required")]
    StartDateRequired,

    /// End date precedes start date.
    #[error("End date {end} is before start date {start}")]
    InvalidDateRange {
        /// Requested start date.
        start: NaiveDate,
        /// Requested end date.
        end: NaiveDate,
    },

    /// Computed duration is outside the accepted range.
    #[error("Requested duration of {days} days is not valid")]
    InvalidDuration {
        /// The computed day count.
        days: Decimal,
    },

    /// Requested days exceed the available balance.
    #[error("Requested {requested} days but only {available} available")]
    InsufficientBalance {
        /// Days requested.
        requested: Decimal,
        /// Days available.
        available: Decimal,
    },

    /// Caller does not own the request.
    #[error("Only the request owner may perform this action")]
    NotRequestOwner,

    /// Caller's role may not review requests.
    #[error("User {user_id} is not authorized to review leave requests")]
    NotAuthorizedToReview {
        /// The user who attempted the review.
        user_id: Uuid,
    },

    /// Leave request not found.
    #[error("Leave request {0} not found")]
    RequestNotFound(Uuid),

    /// No employee selected for a batch assignment.
    #[error("An employee must be selected for assignment")]
    EmployeeRequired,

    /// Batch assignment contains no positive day counts.
    #[error("At least one policy must have a positive day count")]
    EmptyAssignment,

    /// Assignment batch not found.
    #[error("Assignment batch {0} not found")]
    BatchNotFound(Uuid),

    /// Assignment batch has already been reversed.
    #[error("Assignment batch has already been reversed")]
    BatchAlreadyReversed,

    /// The undo window for a batch has elapsed.
    #[error("Undo window of {window_minutes} minutes has elapsed")]
    UndoWindowElapsed {
        /// The configured window length.
        window_minutes: i64,
    },

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl LeaveError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidTransition { .. }
            | Self::PolicyRequired
            | Self::StartDateRequired
            | Self::InvalidDateRange { .. }
            | Self::InvalidDuration { .. }
            | Self::EmployeeRequired
            | Self::EmptyAssignment => 400,

            Self::InsufficientBalance { .. } => 422,

            Self::NotRequestOwner | Self::NotAuthorizedToReview { .. } => 403,

            Self::RequestNotFound(_) | Self::BatchNotFound(_) => 404,

            Self::BatchAlreadyReversed | Self::UndoWindowElapsed { .. } => 409,

            Self::Database(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidTransition { .. } => "invalid_transition",
            Self::PolicyRequired => "policy_required",
            Self::StartDateRequired => "start_date_required",
            Self::InvalidDateRange { .. } => "invalid_date_range",
            Self::InvalidDuration { .. } => "invalid_duration",
            Self::InsufficientBalance { .. } => "insufficient_balance",
            Self::NotRequestOwner => "not_request_owner",
            Self::NotAuthorizedToReview { .. } => "not_authorized_to_review",
            Self::RequestNotFound(_) => "request_not_found",
            Self::EmployeeRequired => "employee_required",
            Self::EmptyAssignment => "empty_assignment",
            Self::BatchNotFound(_) => "batch_not_found",
            Self::BatchAlreadyReversed => "batch_already_reversed",
            Self::UndoWindowElapsed { .. } => "undo_window_elapsed",
            Self::Database(_) => "database_error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_transition_error() {
        let err = LeaveError::InvalidTransition {
            from: LeaveStatus::Approved,
            to: LeaveStatus::Cancelled,
        };
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.error_code(), "invalid_transition");
        assert!(err.to_string().contains("APPROVED"));
        assert!(err.to_string().contains("CANCELLED"));
    }

    #[test]
    fn test_review_authorization_error() {
        let err = LeaveError::NotAuthorizedToReview {
            user_id: Uuid::nil(),
        };
        assert_eq!(err.status_code(), 403);
        assert_eq!(err.error_code(), "not_authorized_to_review");
    }

    #[test]
    fn test_not_found_errors() {
        assert_eq!(LeaveError::RequestNotFound(Uuid::nil()).status_code(), 404);
        assert_eq!(LeaveError::BatchNotFound(Uuid::nil()).status_code(), 404);
    }

    #[test]
    fn test_undo_window_error() {
        let err = LeaveError::UndoWindowElapsed { window_minutes: 15 };
        assert_eq!(err.status_code(), 409);
        assert_eq!(err.error_code(), "undo_window_elapsed");
        assert!(err.to_string().contains("15"));
    }
}

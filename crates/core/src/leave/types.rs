//! Leave request domain types.
//!
//! The valid transitions are:
//! - Draft → Pending (submit)
//! - Pending → Approved (approve)
//! - Pending → Rejected (reject)
//! - Pending → Cancelled (cancel, employee-initiated)
//!
//! `Review` and `Expired` are recognized display states driven by
//! external systems; no transition into them originates here.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Leave request status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LeaveStatus {
    /// Request is being drafted and has not been submitted.
    Draft,
    /// Request has been submitted and awaits review.
    Pending,
    /// Request has been approved (terminal).
    Approved,
    /// Request has been rejected (terminal).
    Rejected,
    /// Request was withdrawn by the employee (terminal).
    Cancelled,
    /// Externally-driven review state; read-only here.
    Review,
    /// Externally-driven expiry state; read-only here.
    Expired,
}

impl LeaveStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
            Self::Cancelled => "CANCELLED",
            Self::Review => "REVIEW",
            Self::Expired => "EXPIRED",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "DRAFT" => Some(Self::Draft),
            "PENDING" => Some(Self::Pending),
            "APPROVED" => Some(Self::Approved),
            "REJECTED" => Some(Self::Rejected),
            "CANCELLED" => Some(Self::Cancelled),
            "REVIEW" => Some(Self::Review),
            "EXPIRED" => Some(Self::Expired),
            _ => None,
        }
    }

    /// Returns true if review/cancel actions are applicable.
    #[must_use]
    pub fn is_actionable(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Returns true if no further transition exists from this status.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected | Self::Cancelled)
    }
}

impl fmt::Display for LeaveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Leave workflow action representing a state transition with audit data.
#[derive(Debug, Clone)]
pub enum LeaveAction {
    /// Submit a draft request for review.
    Submit {
        /// The new status after submission.
        new_status: LeaveStatus,
        /// Requested day count, computed at submission time.
        days: Decimal,
        /// When the request was submitted.
        submitted_at: DateTime<Utc>,
    },
    /// Approve a pending request.
    Approve {
        /// The new status after approval.
        new_status: LeaveStatus,
        /// The reviewer who approved the request.
        reviewed_by: Uuid,
        /// When the request was approved.
        reviewed_at: DateTime<Utc>,
    },
    /// Reject a pending request.
    Reject {
        /// The new status after rejection.
        new_status: LeaveStatus,
        /// The reviewer who rejected the request.
        reviewed_by: Uuid,
        /// When the request was rejected.
        reviewed_at: DateTime<Utc>,
        /// Optional note from the reviewer.
        review_note: Option<String>,
    },
    /// Cancel a pending request (employee-initiated).
    Cancel {
        /// The new status after cancellation.
        new_status: LeaveStatus,
        /// When the request was cancelled.
        cancelled_at: DateTime<Utc>,
    },
}

impl LeaveAction {
    /// Returns the new status resulting from this action.
    #[must_use]
    pub fn new_status(&self) -> LeaveStatus {
        match self {
            Self::Submit { new_status, .. }
            | Self::Approve { new_status, .. }
            | Self::Reject { new_status, .. }
            | Self::Cancel { new_status, .. } => *new_status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_as_str() {
        assert_eq!(LeaveStatus::Draft.as_str(), "DRAFT");
        assert_eq!(LeaveStatus::Pending.as_str(), "PENDING");
        assert_eq!(LeaveStatus::Cancelled.as_str(), "CANCELLED");
        assert_eq!(LeaveStatus::Expired.as_str(), "EXPIRED");
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(LeaveStatus::parse("pending"), Some(LeaveStatus::Pending));
        assert_eq!(LeaveStatus::parse("APPROVED"), Some(LeaveStatus::Approved));
        assert_eq!(LeaveStatus::parse("Review"), Some(LeaveStatus::Review));
        assert_eq!(LeaveStatus::parse("unknown"), None);
    }

    #[test]
    fn test_only_pending_is_actionable() {
        assert!(LeaveStatus::Pending.is_actionable());
        assert!(!LeaveStatus::Draft.is_actionable());
        assert!(!LeaveStatus::Approved.is_actionable());
        assert!(!LeaveStatus::Review.is_actionable());
        assert!(!LeaveStatus::Expired.is_actionable());
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(LeaveStatus::Approved.is_terminal());
        assert!(LeaveStatus::Rejected.is_terminal());
        assert!(LeaveStatus::Cancelled.is_terminal());
        assert!(!LeaveStatus::Pending.is_terminal());
        assert!(!LeaveStatus::Review.is_terminal());
    }
}

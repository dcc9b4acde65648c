//! Leave workflow service for request state transitions.
//!
//! This module implements the core state machine logic for moving
//! leave requests through their lifecycle, plus the duration
//! calculation used at submission time.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::leave::error::LeaveError;
use crate::leave::types::{LeaveAction, LeaveStatus};

/// Maximum accepted request duration in days.
pub const MAX_LEAVE_DAYS: i64 = 365;

/// Computes the requested day count for a leave request.
///
/// The count is inclusive of both endpoints. An omitted end date
/// defaults to the start date. A half-day request is always 0.5 days
/// regardless of the date span.
///
/// # Errors
///
/// Returns `LeaveError::InvalidDateRange` if the end date precedes the
/// start date, or `LeaveError::InvalidDuration` if the span exceeds
/// `MAX_LEAVE_DAYS`.
pub fn leave_days(
    start: NaiveDate,
    end: Option<NaiveDate>,
    half_day: bool,
) -> Result<Decimal, LeaveError> {
    let end = end.unwrap_or(start);
    if end < start {
        return Err(LeaveError::InvalidDateRange { start, end });
    }

    if half_day {
        return Ok(Decimal::new(5, 1));
    }

    let days = (end - start).num_days() + 1;
    if days > MAX_LEAVE_DAYS {
        return Err(LeaveError::InvalidDuration {
            days: Decimal::from(days),
        });
    }

    Ok(Decimal::from(days))
}

/// Stateless service for managing leave request transitions.
///
/// All methods are associated functions that validate and execute
/// state transitions, returning the appropriate `LeaveAction` with
/// audit trail information. Persistence is the caller's concern.
pub struct LeaveWorkflow;

impl LeaveWorkflow {
    /// Submit a draft request for review.
    ///
    /// Computes the day count from the requested dates and validates it.
    ///
    /// # Errors
    ///
    /// Returns `LeaveError::InvalidTransition` if the request is not in
    /// `Draft`, or a validation error from [`leave_days`].
    pub fn submit(
        current_status: LeaveStatus,
        start: NaiveDate,
        end: Option<NaiveDate>,
        half_day: bool,
    ) -> Result<LeaveAction, LeaveError> {
        let days = leave_days(start, end, half_day)?;

        match current_status {
            LeaveStatus::Draft => Ok(LeaveAction::Submit {
                new_status: LeaveStatus::Pending,
                days,
                submitted_at: Utc::now(),
            }),
            _ => Err(LeaveError::InvalidTransition {
                from: current_status,
                to: LeaveStatus::Pending,
            }),
        }
    }

    /// Approve a pending request.
    ///
    /// # Errors
    ///
    /// Returns `LeaveError::InvalidTransition` if the request is not
    /// in `Pending`.
    pub fn approve(
        current_status: LeaveStatus,
        reviewed_by: Uuid,
    ) -> Result<LeaveAction, LeaveError> {
        match current_status {
            LeaveStatus::Pending => Ok(LeaveAction::Approve {
                new_status: LeaveStatus::Approved,
                reviewed_by,
                reviewed_at: Utc::now(),
            }),
            _ => Err(LeaveError::InvalidTransition {
                from: current_status,
                to: LeaveStatus::Approved,
            }),
        }
    }

    /// Reject a pending request.
    ///
    /// # Errors
    ///
    /// Returns `LeaveError::InvalidTransition` if the request is not
    /// in `Pending`.
    pub fn reject(
        current_status: LeaveStatus,
        reviewed_by: Uuid,
        review_note: Option<String>,
    ) -> Result<LeaveAction, LeaveError> {
        match current_status {
            LeaveStatus::Pending => Ok(LeaveAction::Reject {
                new_status: LeaveStatus::Rejected,
                reviewed_by,
                reviewed_at: Utc::now(),
                review_note,
            }),
            _ => Err(LeaveError::InvalidTransition {
                from: current_status,
                to: LeaveStatus::Rejected,
            }),
        }
    }

    /// Cancel a pending request (employee-initiated).
    ///
    /// # Errors
    ///
    /// Returns `LeaveError::InvalidTransition` if the request is not
    /// in `Pending`.
    pub fn cancel(current_status: LeaveStatus) -> Result<LeaveAction, LeaveError> {
        match current_status {
            LeaveStatus::Pending => Ok(LeaveAction::Cancel {
                new_status: LeaveStatus::Cancelled,
                cancelled_at: Utc::now(),
            }),
            _ => Err(LeaveError::InvalidTransition {
                from: current_status,
                to: LeaveStatus::Cancelled,
            }),
        }
    }

    /// Check if a status transition is valid.
    ///
    /// Valid transitions:
    /// - Draft → Pending (submit)
    /// - Pending → Approved (approve)
    /// - Pending → Rejected (reject)
    /// - Pending → Cancelled (cancel)
    #[must_use]
    pub fn is_valid_transition(from: LeaveStatus, to: LeaveStatus) -> bool {
        matches!(
            (from, to),
            (LeaveStatus::Draft, LeaveStatus::Pending)
                | (
                    LeaveStatus::Pending,
                    LeaveStatus::Approved | LeaveStatus::Rejected | LeaveStatus::Cancelled
                )
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_leave_days_inclusive_span() {
        let days = leave_days(date(2025, 1, 1), Some(date(2025, 1, 5)), false).unwrap();
        assert_eq!(days, dec!(5));
    }

    #[test]
    fn test_leave_days_half_day_ignores_span() {
        let days = leave_days(date(2025, 1, 1), Some(date(2025, 1, 5)), true).unwrap();
        assert_eq!(days, dec!(0.5));
    }

    #[test]
    fn test_leave_days_omitted_end_defaults_to_start() {
        assert_eq!(leave_days(date(2025, 1, 1), None, false).unwrap(), dec!(1));
        assert_eq!(leave_days(date(2025, 1, 1), None, true).unwrap(), dec!(0.5));
    }

    #[test]
    fn test_leave_days_end_before_start_fails() {
        let result = leave_days(date(2025, 1, 5), Some(date(2025, 1, 1)), false);
        assert!(matches!(result, Err(LeaveError::InvalidDateRange { .. })));
    }

    #[test]
    fn test_leave_days_over_year_fails() {
        let result = leave_days(date(2025, 1, 1), Some(date(2026, 6, 1)), false);
        assert!(matches!(result, Err(LeaveError::InvalidDuration { .. })));
    }

    #[test]
    fn test_submit_from_draft() {
        let action =
            LeaveWorkflow::submit(LeaveStatus::Draft, date(2025, 3, 10), None, false).unwrap();
        assert_eq!(action.new_status(), LeaveStatus::Pending);
        if let LeaveAction::Submit { days, .. } = action {
            assert_eq!(days, dec!(1));
        } else {
            panic!("expected Submit action");
        }
    }

    #[test]
    fn test_submit_from_pending_fails() {
        let result = LeaveWorkflow::submit(LeaveStatus::Pending, date(2025, 3, 10), None, false);
        assert!(matches!(result, Err(LeaveError::InvalidTransition { .. })));
    }

    #[test]
    fn test_approve_from_pending() {
        let reviewer = Uuid::new_v4();
        let action = LeaveWorkflow::approve(LeaveStatus::Pending, reviewer).unwrap();
        assert_eq!(action.new_status(), LeaveStatus::Approved);
    }

    #[test]
    fn test_approve_terminal_states_fail() {
        let reviewer = Uuid::new_v4();
        for status in [
            LeaveStatus::Approved,
            LeaveStatus::Rejected,
            LeaveStatus::Cancelled,
        ] {
            let result = LeaveWorkflow::approve(status, reviewer);
            assert!(matches!(result, Err(LeaveError::InvalidTransition { .. })));
        }
    }

    #[test]
    fn test_reject_from_pending_keeps_note() {
        let reviewer = Uuid::new_v4();
        let action =
            LeaveWorkflow::reject(LeaveStatus::Pending, reviewer, Some("overlaps".into())).unwrap();
        assert_eq!(action.new_status(), LeaveStatus::Rejected);
        if let LeaveAction::Reject { review_note, .. } = action {
            assert_eq!(review_note.as_deref(), Some("overlaps"));
        } else {
            panic!("expected Reject action");
        }
    }

    #[test]
    fn test_cancel_from_pending() {
        let action = LeaveWorkflow::cancel(LeaveStatus::Pending).unwrap();
        assert_eq!(action.new_status(), LeaveStatus::Cancelled);
    }

    #[test]
    fn test_cancel_from_approved_fails() {
        let result = LeaveWorkflow::cancel(LeaveStatus::Approved);
        assert!(matches!(result, Err(LeaveError::InvalidTransition { .. })));
    }

    #[test]
    fn test_external_states_reject_all_actions() {
        let reviewer = Uuid::new_v4();
        for status in [LeaveStatus::Review, LeaveStatus::Expired] {
            assert!(LeaveWorkflow::approve(status, reviewer).is_err());
            assert!(LeaveWorkflow::reject(status, reviewer, None).is_err());
            assert!(LeaveWorkflow::cancel(status).is_err());
        }
    }

    #[test]
    fn test_is_valid_transition() {
        assert!(LeaveWorkflow::is_valid_transition(
            LeaveStatus::Draft,
            LeaveStatus::Pending
        ));
        assert!(LeaveWorkflow::is_valid_transition(
            LeaveStatus::Pending,
            LeaveStatus::Approved
        ));
        assert!(LeaveWorkflow::is_valid_transition(
            LeaveStatus::Pending,
            LeaveStatus::Cancelled
        ));
        assert!(!LeaveWorkflow::is_valid_transition(
            LeaveStatus::Approved,
            LeaveStatus::Pending
        ));
        assert!(!LeaveWorkflow::is_valid_transition(
            LeaveStatus::Cancelled,
            LeaveStatus::Pending
        ));
        assert!(!LeaveWorkflow::is_valid_transition(
            LeaveStatus::Draft,
            LeaveStatus::Approved
        ));
    }
}

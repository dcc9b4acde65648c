//! Property-based tests for the leave workflow.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::leave::error::LeaveError;
use crate::leave::service::{LeaveWorkflow, MAX_LEAVE_DAYS, leave_days};
use crate::leave::types::{LeaveAction, LeaveStatus};

fn arb_status() -> impl Strategy<Value = LeaveStatus> {
    prop_oneof![
        Just(LeaveStatus::Draft),
        Just(LeaveStatus::Pending),
        Just(LeaveStatus::Approved),
        Just(LeaveStatus::Rejected),
        Just(LeaveStatus::Cancelled),
        Just(LeaveStatus::Review),
        Just(LeaveStatus::Expired),
    ]
}

fn arb_uuid() -> impl Strategy<Value = Uuid> {
    any::<u128>().prop_map(Uuid::from_u128)
}

fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (2020i32..2030, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Duration is always positive and bounded for valid date ranges.
    #[test]
    fn prop_leave_days_positive_and_bounded(
        start in arb_date(),
        span in 0i64..400,
        half_day in any::<bool>(),
    ) {
        let end = start + chrono::Duration::days(span);
        match leave_days(start, Some(end), half_day) {
            Ok(days) => {
                prop_assert!(days > Decimal::ZERO);
                prop_assert!(days <= Decimal::from(MAX_LEAVE_DAYS));
                if half_day {
                    prop_assert_eq!(days, Decimal::new(5, 1));
                } else {
                    prop_assert_eq!(days, Decimal::from(span + 1));
                }
            }
            Err(LeaveError::InvalidDuration { .. }) => {
                prop_assert!(!half_day && span + 1 > MAX_LEAVE_DAYS);
            }
            Err(e) => prop_assert!(false, "unexpected error: {e}"),
        }
    }

    /// Reversed date ranges are always rejected.
    #[test]
    fn prop_leave_days_rejects_reversed_range(
        start in arb_date(),
        span in 1i64..365,
        half_day in any::<bool>(),
    ) {
        let end = start - chrono::Duration::days(span);
        let result = leave_days(start, Some(end), half_day);
        prop_assert!(
            matches!(result, Err(LeaveError::InvalidDateRange { .. })),
            "expected InvalidDateRange, got {:?}",
            result
        );
    }

    /// Submit succeeds only from Draft.
    #[test]
    fn prop_submit_only_from_draft(status in arb_status(), start in arb_date()) {
        let result = LeaveWorkflow::submit(status, start, None, false);
        if status == LeaveStatus::Draft {
            prop_assert!(result.is_ok());
            prop_assert_eq!(result.unwrap().new_status(), LeaveStatus::Pending);
        } else {
            prop_assert!(
                matches!(result, Err(LeaveError::InvalidTransition { .. })),
                "expected InvalidTransition, got {:?}",
                result
            );
        }
    }

    /// Approve succeeds only from Pending and records the reviewer.
    #[test]
    fn prop_approve_only_from_pending(status in arb_status(), reviewer in arb_uuid()) {
        let result = LeaveWorkflow::approve(status, reviewer);
        if status == LeaveStatus::Pending {
            let action = result.unwrap();
            prop_assert_eq!(action.new_status(), LeaveStatus::Approved);
            if let LeaveAction::Approve { reviewed_by, .. } = action {
                prop_assert_eq!(reviewed_by, reviewer);
            } else {
                prop_assert!(false, "expected Approve action");
            }
        } else {
            prop_assert!(
                matches!(result, Err(LeaveError::InvalidTransition { .. })),
                "expected InvalidTransition, got {:?}",
                result
            );
        }
    }

    /// Reject succeeds only from Pending.
    #[test]
    fn prop_reject_only_from_pending(status in arb_status(), reviewer in arb_uuid()) {
        let result = LeaveWorkflow::reject(status, reviewer, None);
        if status == LeaveStatus::Pending {
            prop_assert_eq!(result.unwrap().new_status(), LeaveStatus::Rejected);
        } else {
            prop_assert!(
                matches!(result, Err(LeaveError::InvalidTransition { .. })),
                "expected InvalidTransition, got {:?}",
                result
            );
        }
    }

    /// Cancel succeeds only from Pending.
    #[test]
    fn prop_cancel_only_from_pending(status in arb_status()) {
        let result = LeaveWorkflow::cancel(status);
        if status == LeaveStatus::Pending {
            prop_assert_eq!(result.unwrap().new_status(), LeaveStatus::Cancelled);
        } else {
            prop_assert!(
                matches!(result, Err(LeaveError::InvalidTransition { .. })),
                "expected InvalidTransition, got {:?}",
                result
            );
        }
    }

    /// Terminal states admit no outgoing transitions.
    #[test]
    fn prop_terminal_states_have_no_exits(from in arb_status(), to in arb_status()) {
        if from.is_terminal() {
            prop_assert!(!LeaveWorkflow::is_valid_transition(from, to));
        }
    }

    /// is_valid_transition agrees with the action functions.
    #[test]
    fn prop_transition_table_consistency(from in arb_status(), to in arb_status()) {
        let expected = matches!(
            (from, to),
            (LeaveStatus::Draft, LeaveStatus::Pending)
                | (LeaveStatus::Pending, LeaveStatus::Approved)
                | (LeaveStatus::Pending, LeaveStatus::Rejected)
                | (LeaveStatus::Pending, LeaveStatus::Cancelled)
        );
        prop_assert_eq!(LeaveWorkflow::is_valid_transition(from, to), expected);
    }
}

//! Batch assignment of leave balances.
//!
//! An administrator grants leave-day allotments to one employee
//! across multiple policies in a single reviewable, reversible
//! operation. Policies with a zero or unset day count are filtered
//! out of the plan, not treated as errors. The most recent batch can
//! be reversed within a fixed server-enforced window.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::leave::error::LeaveError;

/// How long after creation a batch may still be reversed.
pub const UNDO_WINDOW_MINUTES: i64 = 15;

/// Batch-wide assignment flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchOptions {
    /// Whether unused days may carry into the next period.
    #[serde(default)]
    pub allow_carry_forward: bool,
    /// Whether unused days may be encashed.
    #[serde(default)]
    pub allow_encashment: bool,
    /// Optional start of validity for the assigned days.
    pub valid_from: Option<NaiveDate>,
    /// Optional end of validity for the assigned days.
    pub valid_until: Option<NaiveDate>,
    /// Whether to email the employee a summary.
    #[serde(default = "default_notify")]
    pub notify: bool,
}

fn default_notify() -> bool {
    true
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            allow_carry_forward: false,
            allow_encashment: false,
            valid_from: None,
            valid_until: None,
            notify: true,
        }
    }
}

/// One per-policy allotment within a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentEntry {
    /// The policy being topped up.
    pub policy_id: Uuid,
    /// Days granted.
    pub days: Decimal,
}

/// A validated batch assignment ready for persistence.
#[derive(Debug, Clone)]
pub struct AssignmentPlan {
    /// The employee receiving the allotments.
    pub employee_id: Uuid,
    /// Per-policy allotments, zero counts already filtered out.
    pub entries: Vec<AssignmentEntry>,
    /// Batch-wide flags.
    pub options: BatchOptions,
}

/// Builds an assignment plan from raw per-policy day counts.
///
/// Entries with a non-positive day count are dropped. The plan is
/// rejected when no employee is selected or when filtering leaves no
/// entries, mirroring the preview gate on the admin form.
///
/// # Errors
///
/// Returns `LeaveError::EmployeeRequired` or `LeaveError::EmptyAssignment`.
pub fn build_plan(
    employee_id: Option<Uuid>,
    counts: &[(Uuid, Decimal)],
    options: BatchOptions,
) -> Result<AssignmentPlan, LeaveError> {
    let employee_id = employee_id.ok_or(LeaveError::EmployeeRequired)?;

    let entries: Vec<AssignmentEntry> = counts
        .iter()
        .filter(|(_, days)| days.is_sign_positive() && !days.is_zero())
        .map(|(policy_id, days)| AssignmentEntry {
            policy_id: *policy_id,
            days: *days,
        })
        .collect();

    if entries.is_empty() {
        return Err(LeaveError::EmptyAssignment);
    }

    Ok(AssignmentPlan {
        employee_id,
        entries,
        options,
    })
}

/// Checks whether a batch created at `created_at` may still be undone.
///
/// # Errors
///
/// Returns `LeaveError::UndoWindowElapsed` when the window has passed.
pub fn check_undo_window(created_at: DateTime<Utc>, now: DateTime<Utc>) -> Result<(), LeaveError> {
    let elapsed = now - created_at;
    if elapsed > chrono::Duration::minutes(UNDO_WINDOW_MINUTES) {
        return Err(LeaveError::UndoWindowElapsed {
            window_minutes: UNDO_WINDOW_MINUTES,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_build_plan_filters_zero_counts() {
        let policy_a = Uuid::new_v4();
        let policy_b = Uuid::new_v4();
        let counts = vec![(policy_a, dec!(5)), (policy_b, dec!(0))];

        let plan =
            build_plan(Some(Uuid::new_v4()), &counts, BatchOptions::default()).unwrap();
        assert_eq!(plan.entries.len(), 1);
        assert_eq!(plan.entries[0].policy_id, policy_a);
        assert_eq!(plan.entries[0].days, dec!(5));
    }

    #[test]
    fn test_build_plan_filters_negative_counts() {
        let counts = vec![(Uuid::new_v4(), dec!(-3)), (Uuid::new_v4(), dec!(2))];
        let plan =
            build_plan(Some(Uuid::new_v4()), &counts, BatchOptions::default()).unwrap();
        assert_eq!(plan.entries.len(), 1);
    }

    #[test]
    fn test_build_plan_requires_employee() {
        let counts = vec![(Uuid::new_v4(), dec!(5))];
        let result = build_plan(None, &counts, BatchOptions::default());
        assert!(matches!(result, Err(LeaveError::EmployeeRequired)));
    }

    #[test]
    fn test_build_plan_all_zero_is_empty() {
        let counts = vec![(Uuid::new_v4(), dec!(0)), (Uuid::new_v4(), dec!(0))];
        let result = build_plan(Some(Uuid::new_v4()), &counts, BatchOptions::default());
        assert!(matches!(result, Err(LeaveError::EmptyAssignment)));
    }

    #[test]
    fn test_build_plan_no_counts_is_empty() {
        let result = build_plan(Some(Uuid::new_v4()), &[], BatchOptions::default());
        assert!(matches!(result, Err(LeaveError::EmptyAssignment)));
    }

    #[test]
    fn test_undo_within_window() {
        let created = Utc::now();
        let now = created + chrono::Duration::minutes(10);
        assert!(check_undo_window(created, now).is_ok());
    }

    #[test]
    fn test_undo_at_window_boundary() {
        let created = Utc::now();
        let now = created + chrono::Duration::minutes(UNDO_WINDOW_MINUTES);
        assert!(check_undo_window(created, now).is_ok());
    }

    #[test]
    fn test_undo_after_window_fails() {
        let created = Utc::now();
        let now = created + chrono::Duration::minutes(UNDO_WINDOW_MINUTES + 1);
        let result = check_undo_window(created, now);
        assert!(matches!(result, Err(LeaveError::UndoWindowElapsed { .. })));
    }

    #[test]
    fn test_batch_options_default_notifies() {
        assert!(BatchOptions::default().notify);
    }
}

//! Leave request workflow and balance assignment.
//!
//! This module implements the leave request state machine, duration
//! calculation, and the batch assignment of leave balances with a
//! time-windowed undo.

pub mod assignment;
pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use assignment::{
    AssignmentEntry, AssignmentPlan, BatchOptions, UNDO_WINDOW_MINUTES, build_plan,
    check_undo_window,
};
pub use error::LeaveError;
pub use service::{LeaveWorkflow, leave_days};
pub use types::{LeaveAction, LeaveStatus};

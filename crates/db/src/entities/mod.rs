//! `SeaORM` entity definitions.

pub mod bank_details;
pub mod documents;
pub mod employees;
pub mod insurance_records;
pub mod leave_assignment_batches;
pub mod leave_assignments;
pub mod leave_balances;
pub mod leave_policies;
pub mod leave_requests;
pub mod payroll_runs;
pub mod payslips;
pub mod sessions;
pub mod users;

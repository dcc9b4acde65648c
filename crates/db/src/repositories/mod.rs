//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod assignment;
pub mod employee;
pub mod insurance;
pub mod leave;
pub mod payroll;
pub mod session;
pub mod user;

pub use assignment::{AssignmentRepository, BatchWithEntries};
pub use employee::{
    CreateEmployeeInput, EmployeeFilter, EmployeeRepository, UpdateEmployeeInput,
    UpsertBankDetailsInput,
};
pub use insurance::{CreateInsuranceInput, InsuranceRepository, UpdateInsuranceInput};
pub use leave::{CreateLeaveRequestInput, LeaveRepository};
pub use payroll::{GeneratePayslipInput, PayrollRepository};
pub use session::SessionRepository;
pub use user::UserRepository;

//! Payroll computation and payslip generation.
//!
//! Salary math is pure `Decimal` arithmetic; rendering assembles a
//! fixed-layout A4 payslip with Indian currency formatting and the
//! spelled-out amount in words.

pub mod compute;
pub mod document;
pub mod error;
pub mod pdf;
pub mod types;
pub mod words;

#[cfg(test)]
mod words_props;

pub use compute::{DeductionLines, EarningLines, PayslipTotals, compute_totals};
pub use document::{PayslipDocument, payslip_filename, title_case};
pub use error::PayrollError;
pub use pdf::render_payslip;
pub use types::{PayPeriod, PayrollStatus};
pub use words::amount_in_words;

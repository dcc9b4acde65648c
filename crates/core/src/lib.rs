//! Core business logic for Atria HRM.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `leave` - Leave request workflow and balance assignment
//! - `payroll` - Salary computation, amount-in-words, payslip documents
//! - `auth` - Password hashing
//! - `employee` - Employee lifecycle status
//! - `role` - Role hierarchy for access control
//! - `storage` - Object storage for generated documents

pub mod auth;
pub mod employee;
pub mod leave;
pub mod payroll;
pub mod role;
pub mod storage;

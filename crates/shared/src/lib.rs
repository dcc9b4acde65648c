//! Shared types, errors, and configuration for Atria.
//!
//! This crate provides common types used across all other crates:
//! - Indian-format currency rendering
//! - Pagination types for list endpoints
//! - JWT and email services
//! - Configuration management

pub mod auth;
pub mod config;
pub mod email;
pub mod jwt;
pub mod types;

pub use auth::Claims;
pub use config::AppConfig;
pub use email::{EmailError, EmailService};
pub use jwt::{JwtConfig, JwtError, JwtService};

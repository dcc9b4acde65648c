//! Common types used across the application.

pub mod money;
pub mod pagination;

pub use money::format_indian;
pub use pagination::{PageRequest, PageResponse};

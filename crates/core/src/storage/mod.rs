//! Object storage for generated and uploaded documents.
//!
//! Payslip PDFs, insurance files, and employee documents are stored
//! through Apache OpenDAL so the backing store is interchangeable:
//! S3-compatible services in production, local filesystem in
//! development.

mod config;
mod error;
mod service;

pub use config::{StorageConfig, StorageProvider};
pub use error::StorageError;
pub use service::{DocumentKind, DocumentStore, DocumentUpload};

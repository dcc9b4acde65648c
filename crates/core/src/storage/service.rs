//! Document store implementation using Apache OpenDAL.

use opendal::{ErrorKind, Operator, services};
use uuid::Uuid;

use super::config::{StorageConfig, StorageProvider};
use super::error::StorageError;

/// The category a stored document belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// Generated payslip PDFs.
    Payslip,
    /// Insurance policy files.
    Insurance,
    /// Uploaded employee documents (contracts, certificates).
    Employee,
}

impl DocumentKind {
    /// Returns the key prefix for this category.
    #[must_use]
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Payslip => "payslips",
            Self::Insurance => "insurance",
            Self::Employee => "employee-docs",
        }
    }
}

/// A document upload request.
#[derive(Debug, Clone)]
pub struct DocumentUpload {
    /// The employee the document belongs to.
    pub employee_id: Uuid,
    /// The document record identifier.
    pub document_id: Uuid,
    /// The document category.
    pub kind: DocumentKind,
    /// Original filename.
    pub filename: String,
    /// MIME type.
    pub content_type: String,
    /// File size in bytes.
    pub file_size: u64,
}

/// Vendor-agnostic document store.
#[derive(Clone)]
pub struct DocumentStore {
    operator: Operator,
    config: StorageConfig,
}

impl DocumentStore {
    /// Create a new document store from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage provider cannot be initialized.
    pub fn from_config(config: StorageConfig) -> Result<Self, StorageError> {
        let operator = Self::create_operator(&config.provider)?;
        Ok(Self { operator, config })
    }

    fn create_operator(provider: &StorageProvider) -> Result<Operator, StorageError> {
        match provider {
            StorageProvider::S3 {
                endpoint,
                bucket,
                access_key_id,
                secret_access_key,
                region,
            } => {
                let builder = services::S3::default()
                    .endpoint(endpoint)
                    .bucket(bucket)
                    .access_key_id(access_key_id)
                    .secret_access_key(secret_access_key)
                    .region(region);

                Ok(Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish())
            }
            StorageProvider::LocalFs { root } => {
                let builder = services::Fs::default().root(
                    root.to_str()
                        .ok_or_else(|| StorageError::configuration("invalid path"))?,
                );

                Ok(Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish())
            }
        }
    }

    /// Validate an upload against size and MIME constraints.
    ///
    /// # Errors
    ///
    /// Returns an error if the file size or MIME type is not allowed.
    pub fn validate_upload(&self, content_type: &str, size: u64) -> Result<(), StorageError> {
        if size > self.config.max_file_size {
            return Err(StorageError::file_too_large(
                size,
                self.config.max_file_size,
            ));
        }

        if !self.config.is_mime_type_allowed(content_type) {
            return Err(StorageError::invalid_mime_type(content_type));
        }

        Ok(())
    }

    /// Generate the storage key for a document.
    ///
    /// Format: `{kind}/{employee_id}/{document_id}/{sanitized_filename}`
    #[must_use]
    pub fn storage_key(upload: &DocumentUpload) -> String {
        format!(
            "{}/{}/{}/{}",
            upload.kind.prefix(),
            upload.employee_id,
            upload.document_id,
            sanitize_filename(&upload.filename)
        )
    }

    /// Store document bytes, returning the storage key.
    ///
    /// # Errors
    ///
    /// Returns a validation error or the underlying storage error.
    pub async fn put(&self, upload: &DocumentUpload, data: Vec<u8>) -> Result<String, StorageError> {
        self.validate_upload(&upload.content_type, data.len() as u64)?;

        let key = Self::storage_key(upload);
        self.operator.write(&key, data).await?;
        Ok(key)
    }

    /// Read document bytes by storage key.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the key does not exist.
    pub async fn get(&self, key: &str) -> Result<Vec<u8>, StorageError> {
        let buffer = self.operator.read(key).await?;
        Ok(buffer.to_vec())
    }

    /// Delete a document from storage.
    ///
    /// # Errors
    ///
    /// Returns an error if deletion fails.
    pub async fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.operator.delete(key).await.map_err(StorageError::from)
    }

    /// Check if a document exists in storage.
    pub async fn exists(&self, key: &str) -> bool {
        match self.operator.stat(key).await {
            Ok(_) => true,
            Err(e) if e.kind() == ErrorKind::NotFound => false,
            Err(_) => false,
        }
    }

    /// Get the storage provider name.
    #[must_use]
    pub fn provider_name(&self) -> &'static str {
        self.config.provider.name()
    }
}

/// Sanitize a filename for use in a storage key.
///
/// Only ASCII alphanumerics, dots, hyphens, and underscores survive.
fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload(kind: DocumentKind, filename: &str) -> DocumentUpload {
        DocumentUpload {
            employee_id: Uuid::parse_str("550e8400-e29b-41d4-a716-446655440000").unwrap(),
            document_id: Uuid::parse_str("6ba7b810-9dad-11d1-80b4-00c04fd430c8").unwrap(),
            kind,
            filename: filename.to_string(),
            content_type: "application/pdf".to_string(),
            file_size: 1024,
        }
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("Jane Doe_December_2025.pdf"), "Jane_Doe_December_2025.pdf");
        assert_eq!(sanitize_filename("policy (1).pdf"), "policy__1_.pdf");
        assert_eq!(sanitize_filename("résumé.pdf"), "r_sum_.pdf");
    }

    #[test]
    fn test_storage_key_layout() {
        let up = upload(DocumentKind::Payslip, "Jane Doe_December_2025.pdf");
        let key = DocumentStore::storage_key(&up);

        let parts: Vec<&str> = key.split('/').collect();
        assert_eq!(parts.len(), 4);
        assert_eq!(parts[0], "payslips");
        assert_eq!(parts[1], up.employee_id.to_string());
        assert_eq!(parts[2], up.document_id.to_string());
        assert_eq!(parts[3], "Jane_Doe_December_2025.pdf");
    }

    #[test]
    fn test_kind_prefixes_are_distinct() {
        assert_ne!(DocumentKind::Payslip.prefix(), DocumentKind::Insurance.prefix());
        assert_ne!(DocumentKind::Insurance.prefix(), DocumentKind::Employee.prefix());
    }

    #[test]
    fn test_validate_upload_size() {
        let config = StorageConfig::new(StorageProvider::local_fs("./test")).with_max_file_size(1024);
        let store = DocumentStore::from_config(config).expect("should create store");

        assert!(store.validate_upload("application/pdf", 512).is_ok());
        let err = store.validate_upload("application/pdf", 2048).unwrap_err();
        assert!(matches!(err, StorageError::FileTooLarge { .. }));
    }

    #[test]
    fn test_validate_upload_mime_type() {
        let config = StorageConfig::new(StorageProvider::local_fs("./test"));
        let store = DocumentStore::from_config(config).expect("should create store");

        assert!(store.validate_upload("application/pdf", 1024).is_ok());
        let err = store
            .validate_upload("application/x-executable", 1024)
            .unwrap_err();
        assert!(matches!(err, StorageError::InvalidMimeType { .. }));
    }

    #[tokio::test]
    async fn test_put_get_roundtrip_on_local_fs() {
        let dir = std::env::temp_dir().join(format!("atria-store-{}", Uuid::new_v4()));
        let config = StorageConfig::new(StorageProvider::local_fs(&dir));
        let store = DocumentStore::from_config(config).expect("should create store");

        let up = upload(DocumentKind::Payslip, "slip.pdf");
        let key = store.put(&up, b"%PDF-sample".to_vec()).await.unwrap();

        assert!(store.exists(&key).await);
        let bytes = store.get(&key).await.unwrap();
        assert_eq!(bytes, b"%PDF-sample");

        store.delete(&key).await.unwrap();
        assert!(!store.exists(&key).await);
    }
}

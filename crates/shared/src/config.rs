//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// JWT configuration.
    pub jwt: JwtSettings,
    /// Email (SMTP) configuration.
    #[serde(default)]
    pub email: EmailConfig,
    /// Document storage configuration.
    #[serde(default)]
    pub storage: StorageSettings,
    /// Organization identity printed on payslips.
    #[serde(default)]
    pub organization: OrganizationConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// JWT configuration section.
#[derive(Debug, Clone, Deserialize)]
pub struct JwtSettings {
    /// Secret key for signing tokens.
    pub secret: String,
    /// Access token expiration in seconds.
    #[serde(default = "default_access_token_expiry")]
    pub access_token_expiry_secs: u64,
    /// Refresh token expiration in seconds.
    #[serde(default = "default_refresh_token_expiry")]
    pub refresh_token_expiry_secs: u64,
}

fn default_access_token_expiry() -> u64 {
    900 // 15 minutes
}

fn default_refresh_token_expiry() -> u64 {
    604800 // 7 days
}

/// Email (SMTP) configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct EmailConfig {
    /// SMTP host.
    pub smtp_host: String,
    /// SMTP port.
    pub smtp_port: u16,
    /// SMTP username.
    #[serde(default)]
    pub smtp_username: String,
    /// SMTP password.
    #[serde(default)]
    pub smtp_password: String,
    /// From address for outgoing mail.
    pub from_email: String,
    /// Display name for outgoing mail.
    pub from_name: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            smtp_host: "localhost".to_string(),
            smtp_port: 1025,
            smtp_username: String::new(),
            smtp_password: String::new(),
            from_email: "hr@atria.local".to_string(),
            from_name: "Atria HR".to_string(),
        }
    }
}

/// Document storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    /// Provider name: "fs" or "s3".
    #[serde(default = "default_storage_provider")]
    pub provider: String,
    /// Root directory for the "fs" provider.
    #[serde(default = "default_storage_root")]
    pub root: String,
    /// Bucket name for the "s3" provider.
    #[serde(default)]
    pub bucket: String,
    /// Endpoint URL for the "s3" provider.
    #[serde(default)]
    pub endpoint: String,
    /// Region for the "s3" provider.
    #[serde(default)]
    pub region: String,
    /// Access key id for the "s3" provider.
    #[serde(default)]
    pub access_key_id: String,
    /// Secret access key for the "s3" provider.
    #[serde(default)]
    pub secret_access_key: String,
}

fn default_storage_provider() -> String {
    "fs".to_string()
}

fn default_storage_root() -> String {
    "./data/documents".to_string()
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            provider: default_storage_provider(),
            root: default_storage_root(),
            bucket: String::new(),
            endpoint: String::new(),
            region: String::new(),
            access_key_id: String::new(),
            secret_access_key: String::new(),
        }
    }
}

/// Organization identity printed on generated payslips.
#[derive(Debug, Clone, Deserialize)]
pub struct OrganizationConfig {
    /// Legal name shown in the payslip header.
    pub name: String,
    /// Postal address shown under the name.
    pub address: String,
}

impl Default for OrganizationConfig {
    fn default() -> Self {
        Self {
            name: "Atria Technologies Pvt. Ltd.".to_string(),
            address: "Bengaluru, Karnataka".to_string(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("ATRIA").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

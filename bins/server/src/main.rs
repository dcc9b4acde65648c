//! Atria HRM API Server
//!
//! Main entry point for the Atria backend service.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use atria_api::{AppState, create_router};
use atria_core::storage::{DocumentStore, StorageConfig, StorageProvider};
use atria_db::connect;
use atria_shared::config::StorageSettings;
use atria_shared::{AppConfig, EmailService, JwtConfig, JwtService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "atria=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Connect to database
    let db = connect(&config.database.url).await?;
    info!("Connected to database");

    // Create JWT service
    let jwt_config = JwtConfig {
        secret: config.jwt.secret.clone(),
        #[allow(clippy::cast_possible_wrap)]
        access_token_expires_minutes: (config.jwt.access_token_expiry_secs / 60) as i64,
        #[allow(clippy::cast_possible_wrap)]
        refresh_token_expires_days: (config.jwt.refresh_token_expiry_secs / 86400) as i64,
    };
    let jwt_service = JwtService::new(jwt_config);

    // Create email service
    let email_service = EmailService::new(config.email.clone());
    info!(
        smtp_host = %config.email.smtp_host,
        smtp_port = %config.email.smtp_port,
        "Email service configured"
    );

    // Create document store
    let document_store = build_document_store(&config.storage)?;
    info!(provider = %config.storage.provider, "Document store configured");

    // Create application state
    let state = AppState {
        db: Arc::new(db),
        jwt_service: Arc::new(jwt_service),
        email_service: Arc::new(email_service),
        document_store: Arc::new(document_store),
        organization: config.organization.clone(),
    };

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Maps the flat storage settings onto a concrete provider.
fn build_document_store(settings: &StorageSettings) -> anyhow::Result<DocumentStore> {
    let provider = match settings.provider.as_str() {
        "s3" => StorageProvider::s3(
            settings.endpoint.clone(),
            settings.bucket.clone(),
            settings.access_key_id.clone(),
            settings.secret_access_key.clone(),
            settings.region.clone(),
        ),
        _ => StorageProvider::local_fs(settings.root.clone()),
    };

    Ok(DocumentStore::from_config(StorageConfig::new(provider))?)
}

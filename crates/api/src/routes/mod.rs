//! API route definitions.

use axum::{Router, middleware};

use crate::{AppState, middleware::auth::auth_middleware};

pub mod assignments;
pub mod auth;
pub mod employees;
pub mod health;
pub mod insurance;
pub mod leave;
pub mod payroll;

/// Creates the API router with protected routes that need state for middleware.
#[allow(clippy::needless_pass_by_value)]
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    let protected_routes = Router::new()
        .merge(auth::protected_routes())
        .merge(employees::routes())
        .merge(leave::routes())
        .merge(assignments::routes())
        .merge(payroll::routes())
        .merge(insurance::routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .merge(health::routes())
        .merge(auth::routes())
        .merge(protected_routes)
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header::AUTHORIZATION};
    use http_body_util::BodyExt;
    use std::sync::Arc;
    use tower::ServiceExt;

    use atria_core::storage::{DocumentStore, StorageConfig, StorageProvider};
    use atria_shared::config::{EmailConfig, OrganizationConfig};
    use atria_shared::{EmailService, JwtConfig, JwtService};

    use crate::AppState;

    /// State with a disconnected database; enough for routing and
    /// auth-layer behavior that never reaches a repository.
    fn test_state() -> AppState {
        let storage = StorageConfig::new(StorageProvider::local_fs(
            std::env::temp_dir().join("atria-route-tests"),
        ));

        AppState {
            db: Arc::new(sea_orm::DatabaseConnection::default()),
            jwt_service: Arc::new(JwtService::new(JwtConfig::default())),
            email_service: Arc::new(EmailService::new(EmailConfig::default())),
            document_store: Arc::new(
                DocumentStore::from_config(storage).expect("should create store"),
            ),
            organization: OrganizationConfig::default(),
        }
    }

    fn test_app() -> axum::Router {
        crate::create_router(test_state())
    }

    #[tokio::test]
    async fn test_health_is_public() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "healthy");
    }

    #[tokio::test]
    async fn test_protected_route_requires_token() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/employees")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_garbage_token_is_rejected() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/leave/requests")
                    .header(AUTHORIZATION, "Bearer not-a-jwt")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_logout_all_requires_token() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/auth/logout-all")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/nope")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}

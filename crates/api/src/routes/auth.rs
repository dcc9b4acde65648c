//! Authentication routes for login, token refresh, and logout.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::json;
use tracing::{error, info};

use crate::AppState;
use crate::middleware::auth::AuthUser;
use atria_core::auth::verify_password;
use atria_db::{SessionRepository, UserRepository};
use atria_shared::auth::{LoginRequest, LoginResponse, LogoutRequest, RefreshRequest, UserInfo};

/// Creates the public auth router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/refresh", post(refresh))
        .route("/auth/logout", post(logout))
}

/// Creates auth routes that require a valid token.
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/me", get(me))
        .route("/auth/logout-all", post(logout_all))
}

fn internal_error(context: &str) -> axum::response::Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "error": "internal_error",
            "message": format!("An error occurred during {context}")
        })),
    )
        .into_response()
}

fn invalid_credentials() -> axum::response::Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "error": "invalid_credentials",
            "message": "Invalid email or password"
        })),
    )
        .into_response()
}

/// POST /auth/login - Authenticate user and return tokens.
async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> impl IntoResponse {
    let user_repo = UserRepository::new((*state.db).clone());

    let user = match user_repo.find_by_email(&payload.email).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            info!(email = %payload.email, "Login attempt for non-existent user");
            return invalid_credentials();
        }
        Err(e) => {
            error!(error = %e, "Database error during login");
            return internal_error("login");
        }
    };

    if !user.is_active {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "account_disabled",
                "message": "This account has been disabled"
            })),
        )
            .into_response();
    }

    match verify_password(&payload.password, &user.password_hash) {
        Ok(true) => {}
        Ok(false) => {
            info!(user_id = %user.id, "Failed login attempt");
            return invalid_credentials();
        }
        Err(e) => {
            error!(error = %e, "Password verification error");
            return internal_error("login");
        }
    }

    let access_token =
        match state
            .jwt_service
            .generate_access_token(user.id, user.employee_id, &user.role)
        {
            Ok(t) => t,
            Err(e) => {
                error!(error = %e, "Failed to generate access token");
                return internal_error("login");
            }
        };

    let refresh_token =
        match state
            .jwt_service
            .generate_refresh_token(user.id, user.employee_id, &user.role)
        {
            Ok(t) => t,
            Err(e) => {
                error!(error = %e, "Failed to generate refresh token");
                return internal_error("login");
            }
        };

    let session_repo = SessionRepository::new((*state.db).clone());
    let expires_at =
        chrono::Utc::now() + chrono::Duration::days(state.jwt_service.refresh_token_expires_days());
    if let Err(e) = session_repo
        .create(user.id, &refresh_token, expires_at, None, None)
        .await
    {
        error!(error = %e, "Failed to create session");
        return internal_error("login");
    }

    // Opportunistic cleanup; failure only leaves stale rows behind.
    if let Err(e) = session_repo.delete_expired(chrono::Utc::now()).await {
        error!(error = %e, "Failed to prune expired sessions");
    }

    info!(user_id = %user.id, "User logged in");

    let response = LoginResponse {
        user: UserInfo {
            id: user.id,
            email: user.email,
            full_name: user.full_name,
            role: user.role,
            employee_id: user.employee_id,
        },
        access_token,
        refresh_token,
        expires_in: state.jwt_service.access_token_expires_in(),
    };

    (StatusCode::OK, Json(response)).into_response()
}

/// POST /auth/refresh - Refresh access token using refresh token.
async fn refresh(
    State(state): State<AppState>,
    Json(payload): Json<RefreshRequest>,
) -> impl IntoResponse {
    let claims = match state.jwt_service.validate_token(&payload.refresh_token) {
        Ok(c) => c,
        Err(e) => {
            let (error, message) = match e {
                atria_shared::JwtError::Expired => ("token_expired", "Refresh token has expired"),
                _ => ("invalid_token", "Invalid refresh token"),
            };
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": error, "message": message })),
            )
                .into_response();
        }
    };

    // The token must also map to a live session; logout revokes it.
    let session_repo = SessionRepository::new((*state.db).clone());
    match session_repo.find_by_token(&payload.refresh_token).await {
        Ok(Some(session)) if session.expires_at.to_utc() > chrono::Utc::now() => {}
        Ok(_) => {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({
                    "error": "session_revoked",
                    "message": "Session is no longer active"
                })),
            )
                .into_response();
        }
        Err(e) => {
            error!(error = %e, "Database error during token refresh");
            return internal_error("token refresh");
        }
    }

    let access_token = match state.jwt_service.generate_access_token(
        claims.user_id(),
        claims.employee_id(),
        &claims.role,
    ) {
        Ok(t) => t,
        Err(e) => {
            error!(error = %e, "Failed to generate access token");
            return internal_error("token refresh");
        }
    };

    (
        StatusCode::OK,
        Json(json!({
            "access_token": access_token,
            "expires_in": state.jwt_service.access_token_expires_in()
        })),
    )
        .into_response()
}

/// POST /auth/logout - Revoke the session behind a refresh token.
async fn logout(
    State(state): State<AppState>,
    Json(payload): Json<LogoutRequest>,
) -> impl IntoResponse {
    let session_repo = SessionRepository::new((*state.db).clone());

    match session_repo.find_by_token(&payload.refresh_token).await {
        Ok(Some(session)) => {
            if let Err(e) = session_repo.revoke(session.id).await {
                error!(error = %e, "Failed to revoke session");
                return internal_error("logout");
            }
        }
        // Logout is idempotent; an unknown token is already logged out.
        Ok(None) => {}
        Err(e) => {
            error!(error = %e, "Database error during logout");
            return internal_error("logout");
        }
    }

    (StatusCode::OK, Json(json!({ "message": "Logged out" }))).into_response()
}

/// POST /auth/logout-all - Revoke every session the caller holds.
async fn logout_all(State(state): State<AppState>, user: AuthUser) -> impl IntoResponse {
    let session_repo = SessionRepository::new((*state.db).clone());

    match session_repo.revoke_all_for_user(user.user_id()).await {
        Ok(revoked) => {
            info!(user_id = %user.user_id(), revoked, "All sessions revoked");
            (
                StatusCode::OK,
                Json(json!({ "message": "Logged out everywhere", "revoked": revoked })),
            )
                .into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to revoke sessions");
            internal_error("logout")
        }
    }
}

/// GET /auth/me - Return the authenticated user's profile.
async fn me(State(state): State<AppState>, user: AuthUser) -> impl IntoResponse {
    let user_repo = UserRepository::new((*state.db).clone());

    match user_repo.find_by_id(user.user_id()).await {
        Ok(Some(u)) => (
            StatusCode::OK,
            Json(json!({
                "user": UserInfo {
                    id: u.id,
                    email: u.email,
                    full_name: u.full_name,
                    role: u.role,
                    employee_id: u.employee_id,
                }
            })),
        )
            .into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_found",
                "message": "User account no longer exists"
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Database error loading profile");
            internal_error("profile lookup")
        }
    }
}

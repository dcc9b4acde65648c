//! Leave policy, balance, and request routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use crate::AppState;
use crate::middleware::auth::{AuthUser, forbidden};
use atria_core::leave::{LeaveError, LeaveStatus};
use atria_db::{CreateLeaveRequestInput, LeaveRepository};
use atria_shared::types::{PageRequest, PageResponse};

/// Creates the leave routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/leave/policies", get(list_policies).post(create_policy))
        .route("/leave/balances", get(my_balances))
        .route("/leave/balances/{employee_id}", get(employee_balances))
        .route("/leave/requests", get(list_requests).post(create_request))
        .route("/leave/requests/{id}", get(get_request))
        .route("/leave/requests/{id}/approve", post(approve_request))
        .route("/leave/requests/{id}/reject", post(reject_request))
        .route("/leave/requests/{id}/cancel", post(cancel_request))
}

/// Maps a `LeaveError` onto the API error envelope.
pub fn leave_error_response(err: &LeaveError) -> axum::response::Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if status.is_server_error() {
        error!(error = %err, "Leave operation failed");
    }

    (
        status,
        Json(json!({
            "error": err.error_code(),
            "message": err.to_string()
        })),
    )
        .into_response()
}

fn missing_employee_link() -> axum::response::Response {
    (
        StatusCode::FORBIDDEN,
        Json(json!({
            "error": "no_employee_record",
            "message": "This account is not linked to an employee record"
        })),
    )
        .into_response()
}

/// Request body for creating a leave policy.
#[derive(Debug, Deserialize)]
struct CreatePolicyRequest {
    name: String,
    period: String,
    #[serde(default)]
    max_per_period: Option<Decimal>,
}

/// Request body for submitting a leave request.
#[derive(Debug, Deserialize)]
struct CreateRequestBody {
    policy_id: Option<Uuid>,
    start_date: Option<NaiveDate>,
    #[serde(default)]
    end_date: Option<NaiveDate>,
    #[serde(default)]
    half_day: bool,
    #[serde(default)]
    reason: Option<String>,
}

/// Request body for rejecting a request.
#[derive(Debug, Default, Deserialize)]
struct RejectBody {
    #[serde(default)]
    review_note: Option<String>,
}

/// Query parameters for request listing.
#[derive(Debug, Deserialize)]
struct RequestListQuery {
    #[serde(flatten)]
    page: PageRequest,
    #[serde(default)]
    employee_id: Option<Uuid>,
    #[serde(default)]
    status: Option<String>,
}

/// GET /leave/policies - List leave policies.
async fn list_policies(State(state): State<AppState>, _user: AuthUser) -> impl IntoResponse {
    let repo = LeaveRepository::new((*state.db).clone());

    match repo.list_policies().await {
        Ok(policies) => (StatusCode::OK, Json(json!({ "policies": policies }))).into_response(),
        Err(e) => leave_error_response(&e),
    }
}

/// POST /leave/policies - Create a leave policy.
async fn create_policy(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreatePolicyRequest>,
) -> impl IntoResponse {
    if !user.role().can_manage_hr() {
        return forbidden("Creating leave policies requires an HR role");
    }

    let repo = LeaveRepository::new((*state.db).clone());

    match repo
        .create_policy(&payload.name, &payload.period, payload.max_per_period)
        .await
    {
        Ok(policy) => {
            info!(policy_id = %policy.id, name = %policy.name, "Leave policy created");
            (StatusCode::CREATED, Json(policy)).into_response()
        }
        Err(e) => leave_error_response(&e),
    }
}

fn balances_payload(
    balances: Vec<(
        atria_db::entities::leave_balances::Model,
        Option<atria_db::entities::leave_policies::Model>,
    )>,
) -> serde_json::Value {
    let items: Vec<serde_json::Value> = balances
        .into_iter()
        .map(|(balance, policy)| {
            json!({
                "policy_id": balance.policy_id,
                "policy_name": policy.as_ref().map(|p| p.name.clone()),
                "period": policy.as_ref().map(|p| p.period.clone()),
                "available": balance.available,
                "used": balance.used,
                "updated_at": balance.updated_at,
            })
        })
        .collect();

    json!({ "balances": items })
}

/// GET /leave/balances - The caller's own balances.
async fn my_balances(State(state): State<AppState>, user: AuthUser) -> impl IntoResponse {
    let Some(employee_id) = user.employee_id() else {
        return missing_employee_link();
    };

    let repo = LeaveRepository::new((*state.db).clone());
    match repo.get_balances(employee_id).await {
        Ok(balances) => (StatusCode::OK, Json(balances_payload(balances))).into_response(),
        Err(e) => leave_error_response(&e),
    }
}

/// GET /leave/balances/{employee_id} - Another employee's balances.
async fn employee_balances(
    State(state): State<AppState>,
    user: AuthUser,
    Path(employee_id): Path<Uuid>,
) -> impl IntoResponse {
    if !user.role().can_review_requests() && user.employee_id() != Some(employee_id) {
        return forbidden("Viewing other employees' balances requires a manager role");
    }

    let repo = LeaveRepository::new((*state.db).clone());
    match repo.get_balances(employee_id).await {
        Ok(balances) => (StatusCode::OK, Json(balances_payload(balances))).into_response(),
        Err(e) => leave_error_response(&e),
    }
}

/// GET /leave/requests - List leave requests.
///
/// Employees see their own history; reviewers may scope to any
/// employee or see everything.
async fn list_requests(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<RequestListQuery>,
) -> impl IntoResponse {
    let scope = if user.role().can_review_requests() {
        query.employee_id
    } else {
        match user.employee_id() {
            Some(id) => Some(id),
            None => return missing_employee_link(),
        }
    };

    let status = match query.status.as_deref().map(LeaveStatus::parse) {
        Some(None) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "invalid_status",
                    "message": "Unknown leave status filter"
                })),
            )
                .into_response();
        }
        Some(some) => some,
        None => None,
    };

    let repo = LeaveRepository::new((*state.db).clone());
    match repo
        .list_requests(scope, status, query.page.offset(), query.page.limit())
        .await
    {
        Ok((rows, total)) => {
            let response = PageResponse::new(rows, query.page.page, query.page.per_page, total);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => leave_error_response(&e),
    }
}

/// POST /leave/requests - Submit a new leave request.
async fn create_request(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateRequestBody>,
) -> impl IntoResponse {
    let Some(employee_id) = user.employee_id() else {
        return missing_employee_link();
    };

    // The form-level gates: a policy and a start date must be chosen.
    let Some(policy_id) = payload.policy_id else {
        return leave_error_response(&LeaveError::PolicyRequired);
    };
    let Some(start_date) = payload.start_date else {
        return leave_error_response(&LeaveError::StartDateRequired);
    };

    let repo = LeaveRepository::new((*state.db).clone());
    let input = CreateLeaveRequestInput {
        employee_id,
        policy_id,
        start_date,
        end_date: payload.end_date,
        half_day: payload.half_day,
        reason: payload.reason,
    };

    match repo.create_request(input).await {
        Ok(request) => {
            info!(request_id = %request.id, employee_id = %employee_id, "Leave request submitted");
            (StatusCode::CREATED, Json(request)).into_response()
        }
        Err(e) => leave_error_response(&e),
    }
}

/// GET /leave/requests/{id} - Fetch one request.
async fn get_request(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = LeaveRepository::new((*state.db).clone());

    match repo.find_request(id).await {
        Ok(request) => {
            let owns = user.employee_id() == Some(request.employee_id);
            if !owns && !user.role().can_review_requests() {
                return forbidden("You may only view your own leave requests");
            }
            (StatusCode::OK, Json(request)).into_response()
        }
        Err(e) => leave_error_response(&e),
    }
}

/// POST /leave/requests/{id}/approve - Approve a pending request.
async fn approve_request(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    if !user.role().can_review_requests() {
        return leave_error_response(&LeaveError::NotAuthorizedToReview {
            user_id: user.user_id(),
        });
    }

    let repo = LeaveRepository::new((*state.db).clone());
    match repo.approve_request(id, user.user_id()).await {
        Ok(request) => {
            info!(request_id = %id, reviewer = %user.user_id(), "Leave request approved");
            (StatusCode::OK, Json(request)).into_response()
        }
        Err(e) => leave_error_response(&e),
    }
}

/// POST /leave/requests/{id}/reject - Reject a pending request.
async fn reject_request(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<RejectBody>,
) -> impl IntoResponse {
    if !user.role().can_review_requests() {
        return leave_error_response(&LeaveError::NotAuthorizedToReview {
            user_id: user.user_id(),
        });
    }

    let repo = LeaveRepository::new((*state.db).clone());
    match repo
        .reject_request(id, user.user_id(), payload.review_note)
        .await
    {
        Ok(request) => {
            info!(request_id = %id, reviewer = %user.user_id(), "Leave request rejected");
            (StatusCode::OK, Json(request)).into_response()
        }
        Err(e) => leave_error_response(&e),
    }
}

/// POST /leave/requests/{id}/cancel - Withdraw one's own pending request.
async fn cancel_request(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let Some(employee_id) = user.employee_id() else {
        return missing_employee_link();
    };

    let repo = LeaveRepository::new((*state.db).clone());
    match repo.cancel_request(id, employee_id).await {
        Ok(request) => {
            info!(request_id = %id, employee_id = %employee_id, "Leave request cancelled");
            (StatusCode::OK, Json(request)).into_response()
        }
        Err(e) => leave_error_response(&e),
    }
}

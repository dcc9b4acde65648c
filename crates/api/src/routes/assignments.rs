//! Batch leave assignment routes.

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
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::AppState;
use crate::middleware::auth::{AuthUser, forbidden};
use crate::routes::leave::leave_error_response;
use atria_core::leave::{BatchOptions, build_plan};
use atria_db::{AssignmentRepository, BatchWithEntries, EmployeeRepository, LeaveRepository};

/// Creates the assignment routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/leave/assignments", get(list_batches).post(assign))
        .route("/leave/assignments/{batch_id}/undo", post(undo))
}

/// One per-policy count in the assignment form.
#[derive(Debug, Deserialize)]
struct CountEntry {
    policy_id: Uuid,
    #[serde(default)]
    days: Decimal,
}

/// Request body for a batch assignment.
#[derive(Debug, Deserialize)]
struct AssignRequest {
    employee_id: Option<Uuid>,
    #[serde(default)]
    counts: Vec<CountEntry>,
    #[serde(default)]
    allow_carry_forward: bool,
    #[serde(default)]
    allow_encashment: bool,
    #[serde(default)]
    valid_from: Option<NaiveDate>,
    #[serde(default)]
    valid_until: Option<NaiveDate>,
    #[serde(default = "default_notify")]
    notify: bool,
}

fn default_notify() -> bool {
    true
}

/// Query parameters for batch listing.
#[derive(Debug, Deserialize)]
struct BatchListQuery {
    employee_id: Uuid,
}

fn batch_payload(result: &BatchWithEntries) -> serde_json::Value {
    json!({
        "batch": result.batch,
        "entries": result.entries,
    })
}

/// POST /leave/assignments - Grant leave days across policies.
async fn assign(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<AssignRequest>,
) -> impl IntoResponse {
    if !user.role().can_manage_hr() {
        return forbidden("Assigning leave balances requires an HR role");
    }

    let counts: Vec<(Uuid, Decimal)> = payload
        .counts
        .iter()
        .map(|entry| (entry.policy_id, entry.days))
        .collect();
    let options = BatchOptions {
        allow_carry_forward: payload.allow_carry_forward,
        allow_encashment: payload.allow_encashment,
        valid_from: payload.valid_from,
        valid_until: payload.valid_until,
        notify: payload.notify,
    };

    let plan = match build_plan(payload.employee_id, &counts, options) {
        Ok(plan) => plan,
        Err(e) => return leave_error_response(&e),
    };

    let repo = AssignmentRepository::new((*state.db).clone());
    let result = match repo.assign_batch(&plan, user.user_id()).await {
        Ok(result) => result,
        Err(e) => return leave_error_response(&e),
    };

    info!(
        batch_id = %result.batch.id,
        employee_id = %plan.employee_id,
        entries = result.entries.len(),
        "Leave balances assigned"
    );

    if plan.options.notify {
        notify_employee(&state, &plan.employee_id, &result).await;
    }

    (StatusCode::CREATED, Json(batch_payload(&result))).into_response()
}

/// Emails the employee a summary of the assigned days. Failures are
/// logged, never surfaced; the assignment itself already committed.
async fn notify_employee(state: &AppState, employee_id: &Uuid, result: &BatchWithEntries) {
    let employee_repo = EmployeeRepository::new((*state.db).clone());
    let employee = match employee_repo.find_by_id(*employee_id).await {
        Ok(Some(employee)) => employee,
        Ok(None) => return,
        Err(e) => {
            warn!(error = %e, "Could not load employee for assignment notice");
            return;
        }
    };

    let leave_repo = LeaveRepository::new((*state.db).clone());
    let policies = leave_repo.list_policies().await.unwrap_or_default();
    let policy_name = |id: Uuid| {
        policies
            .iter()
            .find(|p| p.id == id)
            .map_or_else(|| id.to_string(), |p| p.name.clone())
    };

    let summary: Vec<String> = result
        .entries
        .iter()
        .map(|entry| format!("- {}: +{} days", policy_name(entry.policy_id), entry.days))
        .collect();

    if let Err(e) = state
        .email_service
        .send_leave_assignment_notice(&employee.work_email, &employee.full_name(), &summary)
        .await
    {
        warn!(error = %e, employee_id = %employee_id, "Failed to send assignment notice");
    }
}

/// POST /leave/assignments/{batch_id}/undo - Reverse a recent batch.
async fn undo(
    State(state): State<AppState>,
    user: AuthUser,
    Path(batch_id): Path<Uuid>,
) -> impl IntoResponse {
    if !user.role().can_manage_hr() {
        return forbidden("Reversing assignments requires an HR role");
    }

    let repo = AssignmentRepository::new((*state.db).clone());
    match repo.undo_batch(batch_id).await {
        Ok(result) => {
            info!(batch_id = %batch_id, "Assignment batch reversed");
            (StatusCode::OK, Json(batch_payload(&result))).into_response()
        }
        Err(e) => leave_error_response(&e),
    }
}

/// GET /leave/assignments?employee_id= - List an employee's batches.
async fn list_batches(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<BatchListQuery>,
) -> impl IntoResponse {
    if !user.role().can_manage_hr() {
        return forbidden("Viewing assignment history requires an HR role");
    }

    let repo = AssignmentRepository::new((*state.db).clone());
    match repo.list_batches(query.employee_id).await {
        Ok(batches) => (StatusCode::OK, Json(json!({ "batches": batches }))).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to list assignment batches");
            leave_error_response(&e)
        }
    }
}

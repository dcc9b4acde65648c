//! Payroll run and payslip routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::{get, post},
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::AppState;
use crate::middleware::auth::{AuthUser, forbidden};
use atria_core::payroll::{
    DeductionLines, EarningLines, PayPeriod, PayrollError, PayrollStatus, PayslipDocument,
    PayslipTotals, payslip_filename, render_payslip, title_case,
};
use atria_core::storage::{DocumentKind, DocumentUpload};
use atria_db::entities::{employees, payroll_runs, payslips};
use atria_db::{EmployeeRepository, GeneratePayslipInput, PayrollRepository};
use atria_shared::types::{PageRequest, PageResponse};

/// Creates the payroll routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/payroll/runs", get(list_runs).post(create_run))
        .route("/payroll/runs/{id}", get(get_run))
        .route("/payroll/runs/{id}/status", post(set_run_status))
        .route("/payroll/runs/{id}/payslips", post(generate_payslip))
        .route("/payroll/payslips/my-current", get(my_current_payslip))
        .route("/payroll/payslips/{id}/download", get(download_payslip))
}

/// Maps a `PayrollError` onto the API error envelope.
fn payroll_error_response(err: &PayrollError) -> axum::response::Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if status.is_server_error() {
        error!(error = %err, "Payroll operation failed");
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

/// Request body for creating a payroll run.
#[derive(Debug, Deserialize)]
struct CreateRunRequest {
    period_start: NaiveDate,
    period_end: NaiveDate,
    pay_date: NaiveDate,
}

/// Request body for advancing a run's status.
#[derive(Debug, Deserialize)]
struct SetStatusRequest {
    status: String,
}

/// Request body for generating a payslip.
#[derive(Debug, Deserialize)]
struct GeneratePayslipRequest {
    employee_id: Uuid,
    #[serde(default)]
    earnings: EarningLines,
    #[serde(default)]
    deductions: DeductionLines,
}

/// Query parameters for run listing.
#[derive(Debug, Deserialize)]
struct RunListQuery {
    #[serde(flatten)]
    page: PageRequest,
}

/// POST /payroll/runs - Open a payroll run in draft.
async fn create_run(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateRunRequest>,
) -> impl IntoResponse {
    if !user.role().can_manage_hr() {
        return forbidden("Managing payroll requires an HR role");
    }

    let period = match PayPeriod::new(payload.period_start, payload.period_end, payload.pay_date) {
        Ok(period) => period,
        Err(e) => return payroll_error_response(&e),
    };

    let repo = PayrollRepository::new((*state.db).clone());
    match repo.create_run(period, user.user_id()).await {
        Ok(run) => {
            info!(run_id = %run.id, "Payroll run created");
            (StatusCode::CREATED, Json(run)).into_response()
        }
        Err(e) => payroll_error_response(&e),
    }
}

/// GET /payroll/runs - List payroll runs.
async fn list_runs(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<RunListQuery>,
) -> impl IntoResponse {
    if !user.role().can_manage_hr() {
        return forbidden("Managing payroll requires an HR role");
    }

    let repo = PayrollRepository::new((*state.db).clone());
    match repo.list_runs(query.page.offset(), query.page.limit()).await {
        Ok((rows, total)) => {
            let response = PageResponse::new(rows, query.page.page, query.page.per_page, total);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => payroll_error_response(&e),
    }
}

/// GET /payroll/runs/{id} - Fetch a run with its payslips.
async fn get_run(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    if !user.role().can_manage_hr() {
        return forbidden("Managing payroll requires an HR role");
    }

    let repo = PayrollRepository::new((*state.db).clone());
    let run = match repo.find_run(id).await {
        Ok(run) => run,
        Err(e) => return payroll_error_response(&e),
    };

    match repo.list_payslips(id).await {
        Ok(slips) => (
            StatusCode::OK,
            Json(json!({ "run": run, "payslips": slips })),
        )
            .into_response(),
        Err(e) => payroll_error_response(&e),
    }
}

/// POST /payroll/runs/{id}/status - Advance a run's status.
async fn set_run_status(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<SetStatusRequest>,
) -> impl IntoResponse {
    if !user.role().can_manage_hr() {
        return forbidden("Managing payroll requires an HR role");
    }

    let Some(status) = PayrollStatus::parse(&payload.status) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_status",
                "message": "Status must be DRAFT, APPROVED, or PAID"
            })),
        )
            .into_response();
    };

    let repo = PayrollRepository::new((*state.db).clone());
    match repo.set_run_status(id, status).await {
        Ok(run) => {
            info!(run_id = %id, status = %status, "Payroll run status changed");
            (StatusCode::OK, Json(run)).into_response()
        }
        Err(e) => payroll_error_response(&e),
    }
}

/// POST /payroll/runs/{id}/payslips - Generate one employee's payslip.
///
/// Persists the ledger, renders the PDF, and stores it. A failed
/// render leaves the payslip row in place without a storage key.
async fn generate_payslip(
    State(state): State<AppState>,
    user: AuthUser,
    Path(run_id): Path<Uuid>,
    Json(payload): Json<GeneratePayslipRequest>,
) -> impl IntoResponse {
    if !user.role().can_manage_hr() {
        return forbidden("Managing payroll requires an HR role");
    }

    let employee_repo = EmployeeRepository::new((*state.db).clone());
    let (employee, bank_details) = match employee_repo
        .find_with_bank_details(payload.employee_id)
        .await
    {
        Ok(Some(pair)) => pair,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(json!({
                    "error": "not_found",
                    "message": "Employee not found"
                })),
            )
                .into_response();
        }
        Err(e) => {
            error!(error = %e, "Failed to fetch employee for payslip");
            return payroll_error_response(&PayrollError::Database(e.to_string()));
        }
    };

    let repo = PayrollRepository::new((*state.db).clone());
    let run = match repo.find_run(run_id).await {
        Ok(run) => run,
        Err(e) => return payroll_error_response(&e),
    };

    let input = GeneratePayslipInput {
        employee_id: payload.employee_id,
        earnings: payload.earnings,
        deductions: payload.deductions,
    };
    let mut slip = match repo.generate_payslip(run_id, input).await {
        Ok(slip) => slip,
        Err(e) => return payroll_error_response(&e),
    };

    match render_and_store(&state, &run, &slip, &employee, bank_details.as_ref()).await {
        Ok(key) => match repo.set_payslip_storage_key(slip.id, &key).await {
            Ok(updated) => slip = updated,
            Err(e) => warn!(error = %e, "Failed to record payslip storage key"),
        },
        Err(message) => {
            warn!(payslip_id = %slip.id, error = %message, "Payslip PDF not stored");
        }
    }

    info!(run_id = %run_id, payslip_id = %slip.id, "Payslip generated");
    (StatusCode::CREATED, Json(slip)).into_response()
}

fn document_from_models(
    state: &AppState,
    run: &payroll_runs::Model,
    slip: &payslips::Model,
    employee: &employees::Model,
    account_number: Option<String>,
) -> Result<PayslipDocument, PayrollError> {
    let period = PayPeriod::new(run.period_start, run.period_end, run.pay_date)?;

    Ok(PayslipDocument {
        organization: state.organization.name.clone(),
        employee_name: title_case(&employee.full_name()),
        person_no: employee.person_no.clone(),
        designation: employee.designation.clone(),
        department: employee.department.clone(),
        account_number,
        period,
        earnings: EarningLines {
            basic: slip.basic,
            hra: slip.hra,
            conveyance: slip.conveyance,
            medical: slip.medical,
            bonus: slip.bonus,
            other: slip.other_earnings,
        },
        deductions: DeductionLines {
            epf: slip.epf,
            professional_tax: slip.professional_tax,
            other: slip.other_deductions,
        },
        totals: PayslipTotals {
            gross: slip.gross,
            total_deductions: slip.total_deductions,
            net: slip.net,
        },
    })
}

/// Renders a payslip PDF and writes it to the document store,
/// returning the storage key.
async fn render_and_store(
    state: &AppState,
    run: &payroll_runs::Model,
    slip: &payslips::Model,
    employee: &employees::Model,
    bank_details: Option<&atria_db::entities::bank_details::Model>,
) -> Result<String, String> {
    let document = document_from_models(
        state,
        run,
        slip,
        employee,
        bank_details.map(|b| b.account_number.clone()),
    )
    .map_err(|e| e.to_string())?;

    let bytes = render_payslip(&document).map_err(|e| e.to_string())?;
    let filename = payslip_filename(&employee.full_name(), run.period_end);

    let upload = DocumentUpload {
        employee_id: employee.id,
        document_id: slip.id,
        kind: DocumentKind::Payslip,
        filename,
        content_type: "application/pdf".to_string(),
        file_size: bytes.len() as u64,
    };

    state
        .document_store
        .put(&upload, bytes)
        .await
        .map_err(|e| e.to_string())
}

/// Streams a payslip PDF with its canonical download filename.
async fn payslip_download_response(
    state: &AppState,
    slip: payslips::Model,
    run: payroll_runs::Model,
) -> axum::response::Response {
    let employee_repo = EmployeeRepository::new((*state.db).clone());
    let (employee, bank_details) = match employee_repo.find_with_bank_details(slip.employee_id).await
    {
        Ok(Some(pair)) => pair,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(json!({
                    "error": "not_found",
                    "message": "Employee not found"
                })),
            )
                .into_response();
        }
        Err(e) => {
            error!(error = %e, "Failed to fetch employee for download");
            return payroll_error_response(&PayrollError::Database(e.to_string()));
        }
    };

    // Prefer the stored PDF; fall back to rendering when the slip
    // predates storage or the blob is gone.
    let bytes = match &slip.storage_key {
        Some(key) => match state.document_store.get(key).await {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                warn!(error = %e, key = %key, "Stored payslip unreadable, re-rendering");
                None
            }
        },
        None => None,
    };

    let bytes = match bytes {
        Some(bytes) => bytes,
        None => {
            let document = match document_from_models(
                state,
                &run,
                &slip,
                &employee,
                bank_details.map(|b| b.account_number),
            ) {
                Ok(document) => document,
                Err(e) => return payroll_error_response(&e),
            };
            match render_payslip(&document) {
                Ok(bytes) => bytes,
                Err(e) => return payroll_error_response(&e),
            }
        }
    };

    // The filename month comes from the period end, not the pay date.
    let filename = payslip_filename(&employee.full_name(), run.period_end);
    let disposition = format!("attachment; filename=\"{filename}\"");

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response()
}

/// GET /payroll/payslips/{id}/download - Download a payslip PDF.
async fn download_payslip(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = PayrollRepository::new((*state.db).clone());
    let (slip, run) = match repo.find_payslip_with_run(id).await {
        Ok(pair) => pair,
        Err(e) => return payroll_error_response(&e),
    };

    let owns = user.employee_id() == Some(slip.employee_id);
    if !owns && !user.role().can_manage_hr() {
        return forbidden("You may only download your own payslips");
    }

    payslip_download_response(&state, slip, run).await
}

/// GET /payroll/payslips/my-current - The caller's latest payslip.
async fn my_current_payslip(State(state): State<AppState>, user: AuthUser) -> impl IntoResponse {
    let Some(employee_id) = user.employee_id() else {
        return (
            StatusCode::FORBIDDEN,
            Json(json!({
                "error": "no_employee_record",
                "message": "This account is not linked to an employee record"
            })),
        )
            .into_response();
    };

    let repo = PayrollRepository::new((*state.db).clone());
    match repo.latest_payslip_for_employee(employee_id).await {
        Ok(Some((slip, run))) => (
            StatusCode::OK,
            Json(json!({ "payslip": slip, "run": run })),
        )
            .into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_found",
                "message": "No payslip has been generated yet"
            })),
        )
            .into_response(),
        Err(e) => payroll_error_response(&e),
    }
}

//! Employee master data, bank details, and document routes.

use axum::{
    Json, Router,
    extract::{Multipart, Path, Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use crate::AppState;
use crate::middleware::auth::{AuthUser, forbidden};
use atria_core::employee::EmployeeStatus;
use atria_core::storage::{DocumentKind, DocumentUpload};
use atria_db::{
    CreateEmployeeInput, EmployeeFilter, EmployeeRepository, UpdateEmployeeInput,
    UpsertBankDetailsInput,
};
use atria_shared::types::{PageRequest, PageResponse};

/// Creates the employee routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/employees", get(list_employees).post(create_employee))
        .route(
            "/employees/{id}",
            get(get_employee).put(update_employee).delete(delete_employee),
        )
        .route("/employees/{id}/bank-details", put(upsert_bank_details))
        .route(
            "/employees/{id}/documents",
            get(list_documents).post(upload_document),
        )
        .route(
            "/employees/{id}/documents/{doc_id}/download",
            get(download_document),
        )
        .route("/employees/{id}/documents/{doc_id}", delete(delete_document))
}

/// Query parameters for employee listing.
#[derive(Debug, Deserialize)]
struct ListQuery {
    #[serde(flatten)]
    page: PageRequest,
    status: Option<String>,
    department: Option<String>,
}

/// Request body for creating an employee.
#[derive(Debug, Deserialize)]
struct CreateEmployeeRequest {
    person_no: String,
    first_name: String,
    last_name: String,
    work_email: String,
    #[serde(default)]
    personal_email: Option<String>,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    department: Option<String>,
    #[serde(default)]
    designation: Option<String>,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    hire_date: Option<NaiveDate>,
    #[serde(default)]
    gender: Option<String>,
    #[serde(default)]
    address: Option<String>,
    #[serde(default)]
    emergency_contact: Option<String>,
    #[serde(default)]
    education_qualification: Option<String>,
    #[serde(default)]
    birthdate: Option<NaiveDate>,
    #[serde(default)]
    manager_id: Option<Uuid>,
}

/// Request body for updating an employee.
#[derive(Debug, Default, Deserialize)]
struct UpdateEmployeeRequest {
    first_name: Option<String>,
    last_name: Option<String>,
    work_email: Option<String>,
    personal_email: Option<String>,
    phone: Option<String>,
    department: Option<String>,
    designation: Option<String>,
    location: Option<String>,
    status: Option<String>,
    hire_date: Option<NaiveDate>,
    gender: Option<String>,
    address: Option<String>,
    emergency_contact: Option<String>,
    education_qualification: Option<String>,
    birthdate: Option<NaiveDate>,
    manager_id: Option<Option<Uuid>>,
}

/// Request body for bank details.
#[derive(Debug, Deserialize)]
struct BankDetailsRequest {
    bank_name: String,
    account_number: String,
    ifsc_code: String,
    #[serde(default)]
    branch: Option<String>,
    #[serde(default)]
    pf_number: Option<String>,
    #[serde(default)]
    uan: Option<String>,
}

fn internal_error() -> axum::response::Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "error": "internal_error",
            "message": "An error occurred"
        })),
    )
        .into_response()
}

fn invalid_status(raw: &str) -> axum::response::Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "error": "invalid_status",
            "message": format!("'{raw}' is not a valid employee status")
        })),
    )
        .into_response()
}

fn not_found(what: &str) -> axum::response::Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "not_found",
            "message": format!("{what} not found")
        })),
    )
        .into_response()
}

/// Returns true when the caller may view the given employee's data.
fn can_view(user: &AuthUser, employee_id: Uuid) -> bool {
    user.role().can_review_requests() || user.employee_id() == Some(employee_id)
}

/// GET /employees - List employees with filters and pagination.
async fn list_employees(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<ListQuery>,
) -> impl IntoResponse {
    if !user.role().can_review_requests() {
        return forbidden("Listing employees requires a manager role");
    }

    let status = match query.status.as_deref() {
        Some(raw) => match EmployeeStatus::parse(raw) {
            Some(status) => Some(status),
            None => return invalid_status(raw),
        },
        None => None,
    };

    let repo = EmployeeRepository::new((*state.db).clone());
    let filter = EmployeeFilter {
        status,
        department: query.department,
    };

    match repo
        .list(&filter, query.page.offset(), query.page.limit())
        .await
    {
        Ok((rows, total)) => {
            let response = PageResponse::new(rows, query.page.page, query.page.per_page, total);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list employees");
            internal_error()
        }
    }
}

/// POST /employees - Create an employee record.
async fn create_employee(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateEmployeeRequest>,
) -> impl IntoResponse {
    if !user.role().can_manage_hr() {
        return forbidden("Creating employees requires an HR role");
    }

    let repo = EmployeeRepository::new((*state.db).clone());

    match repo.person_no_exists(&payload.person_no).await {
        Ok(true) => {
            return (
                StatusCode::CONFLICT,
                Json(json!({
                    "error": "person_no_taken",
                    "message": "An employee with this person number already exists"
                })),
            )
                .into_response();
        }
        Ok(false) => {}
        Err(e) => {
            error!(error = %e, "Failed to check person number");
            return internal_error();
        }
    }

    let input = CreateEmployeeInput {
        person_no: payload.person_no,
        first_name: payload.first_name,
        last_name: payload.last_name,
        work_email: payload.work_email,
        personal_email: payload.personal_email,
        phone: payload.phone,
        department: payload.department,
        designation: payload.designation,
        location: payload.location,
        hire_date: payload.hire_date,
        gender: payload.gender,
        address: payload.address,
        emergency_contact: payload.emergency_contact,
        education_qualification: payload.education_qualification,
        birthdate: payload.birthdate,
        manager_id: payload.manager_id,
    };

    match repo.create(input).await {
        Ok(employee) => {
            info!(employee_id = %employee.id, person_no = %employee.person_no, "Employee created");
            (StatusCode::CREATED, Json(employee)).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to create employee");
            internal_error()
        }
    }
}

/// GET /employees/{id} - Fetch one employee with bank details.
async fn get_employee(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    if !can_view(&user, id) {
        return forbidden("You may only view your own employee record");
    }

    let repo = EmployeeRepository::new((*state.db).clone());

    match repo.find_with_bank_details(id).await {
        Ok(Some((employee, bank_details))) => (
            StatusCode::OK,
            Json(json!({
                "employee": employee,
                "bank_details": bank_details
            })),
        )
            .into_response(),
        Ok(None) => not_found("Employee"),
        Err(e) => {
            error!(error = %e, "Failed to fetch employee");
            internal_error()
        }
    }
}

/// PUT /employees/{id} - Update an employee record.
async fn update_employee(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateEmployeeRequest>,
) -> impl IntoResponse {
    if !user.role().can_manage_hr() {
        return forbidden("Updating employees requires an HR role");
    }

    let status = match payload.status.as_deref() {
        Some(raw) => match EmployeeStatus::parse(raw) {
            Some(status) => Some(status),
            None => return invalid_status(raw),
        },
        None => None,
    };

    let repo = EmployeeRepository::new((*state.db).clone());
    let input = UpdateEmployeeInput {
        first_name: payload.first_name,
        last_name: payload.last_name,
        work_email: payload.work_email,
        personal_email: payload.personal_email,
        phone: payload.phone,
        department: payload.department,
        designation: payload.designation,
        location: payload.location,
        status,
        hire_date: payload.hire_date,
        gender: payload.gender,
        address: payload.address,
        emergency_contact: payload.emergency_contact,
        education_qualification: payload.education_qualification,
        birthdate: payload.birthdate,
        manager_id: payload.manager_id,
    };

    match repo.update(id, input).await {
        Ok(Some(employee)) => {
            info!(employee_id = %employee.id, "Employee updated");
            (StatusCode::OK, Json(employee)).into_response()
        }
        Ok(None) => not_found("Employee"),
        Err(e) => {
            error!(error = %e, "Failed to update employee");
            internal_error()
        }
    }
}

/// DELETE /employees/{id} - Remove an employee record.
async fn delete_employee(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    if !user.role().can_manage_users() {
        return forbidden("Deleting employees requires an admin role");
    }

    let repo = EmployeeRepository::new((*state.db).clone());

    match repo.delete(id).await {
        Ok(true) => {
            info!(employee_id = %id, "Employee deleted");
            (StatusCode::NO_CONTENT, ()).into_response()
        }
        Ok(false) => not_found("Employee"),
        Err(e) => {
            error!(error = %e, "Failed to delete employee");
            internal_error()
        }
    }
}

/// PUT /employees/{id}/bank-details - Create or replace bank details.
async fn upsert_bank_details(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<BankDetailsRequest>,
) -> impl IntoResponse {
    if !user.role().can_manage_hr() {
        return forbidden("Managing bank details requires an HR role");
    }

    let repo = EmployeeRepository::new((*state.db).clone());

    match repo.find_by_id(id).await {
        Ok(Some(_)) => {}
        Ok(None) => return not_found("Employee"),
        Err(e) => {
            error!(error = %e, "Failed to fetch employee");
            return internal_error();
        }
    }

    let input = UpsertBankDetailsInput {
        bank_name: payload.bank_name,
        account_number: payload.account_number,
        ifsc_code: payload.ifsc_code,
        branch: payload.branch,
        pf_number: payload.pf_number,
        uan: payload.uan,
    };

    match repo.upsert_bank_details(id, input).await {
        Ok(details) => (StatusCode::OK, Json(details)).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to upsert bank details");
            internal_error()
        }
    }
}

/// GET /employees/{id}/documents - List an employee's documents.
async fn list_documents(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    if !can_view(&user, id) {
        return forbidden("You may only view your own documents");
    }

    let repo = EmployeeRepository::new((*state.db).clone());

    match repo.list_documents(id).await {
        Ok(documents) => (StatusCode::OK, Json(json!({ "documents": documents }))).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to list documents");
            internal_error()
        }
    }
}

/// POST /employees/{id}/documents - Upload a document for an employee.
///
/// Accepts a multipart form with a single `file` part; the part's
/// filename and content type drive validation and the storage key.
async fn upload_document(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    if !user.role().can_manage_hr() {
        return forbidden("Uploading documents requires an HR role");
    }

    let repo = EmployeeRepository::new((*state.db).clone());
    match repo.find_by_id(id).await {
        Ok(Some(_)) => {}
        Ok(None) => return not_found("Employee"),
        Err(e) => {
            error!(error = %e, "Failed to fetch employee");
            return internal_error();
        }
    }

    let field = match multipart.next_field().await {
        Ok(Some(field)) => field,
        Ok(None) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "missing_file",
                    "message": "A file part is required"
                })),
            )
                .into_response();
        }
        Err(e) => {
            error!(error = %e, "Failed to read multipart body");
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "invalid_multipart",
                    "message": "Could not parse multipart body"
                })),
            )
                .into_response();
        }
    };

    let filename = field.file_name().unwrap_or("document").to_string();
    let content_type = field
        .content_type()
        .unwrap_or("application/octet-stream")
        .to_string();

    let data = match field.bytes().await {
        Ok(bytes) => bytes.to_vec(),
        Err(e) => {
            error!(error = %e, "Failed to read file bytes");
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "invalid_multipart",
                    "message": "Could not read file contents"
                })),
            )
                .into_response();
        }
    };

    let document_id = Uuid::new_v4();
    let upload = DocumentUpload {
        employee_id: id,
        document_id,
        kind: DocumentKind::Employee,
        filename: filename.clone(),
        content_type: content_type.clone(),
        file_size: data.len() as u64,
    };
    let file_size = i64::try_from(data.len()).unwrap_or(i64::MAX);

    let key = match state.document_store.put(&upload, data).await {
        Ok(key) => key,
        Err(e) => {
            error!(error = %e, "Failed to store document");
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "storage_rejected",
                    "message": e.to_string()
                })),
            )
                .into_response();
        }
    };

    match repo
        .add_document(
            document_id,
            id,
            None,
            &filename,
            &key,
            &content_type,
            file_size,
            "EMPLOYEE",
        )
        .await
    {
        Ok(document) => {
            info!(employee_id = %id, document_id = %document.id, "Document uploaded");
            (StatusCode::CREATED, Json(document)).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to record document");
            internal_error()
        }
    }
}

/// GET /employees/{id}/documents/{doc_id}/download - Stream a stored document.
async fn download_document(
    State(state): State<AppState>,
    user: AuthUser,
    Path((id, doc_id)): Path<(Uuid, Uuid)>,
) -> impl IntoResponse {
    if !can_view(&user, id) {
        return forbidden("You may only download your own documents");
    }

    let repo = EmployeeRepository::new((*state.db).clone());

    let document = match repo.find_document(doc_id).await {
        Ok(Some(doc)) if doc.employee_id == id => doc,
        Ok(_) => return not_found("Document"),
        Err(e) => {
            error!(error = %e, "Failed to fetch document");
            return internal_error();
        }
    };

    match state.document_store.get(&document.storage_key).await {
        Ok(bytes) => {
            let disposition = format!("attachment; filename=\"{}\"", document.title);
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, document.content_type),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                bytes,
            )
                .into_response()
        }
        Err(e) => {
            error!(error = %e, key = %document.storage_key, "Failed to read document");
            internal_error()
        }
    }
}

/// DELETE /employees/{id}/documents/{doc_id} - Remove a document.
async fn delete_document(
    State(state): State<AppState>,
    user: AuthUser,
    Path((id, doc_id)): Path<(Uuid, Uuid)>,
) -> impl IntoResponse {
    if !user.role().can_manage_hr() {
        return forbidden("Deleting documents requires an HR role");
    }

    let repo = EmployeeRepository::new((*state.db).clone());

    let document = match repo.find_document(doc_id).await {
        Ok(Some(doc)) if doc.employee_id == id => doc,
        Ok(_) => return not_found("Document"),
        Err(e) => {
            error!(error = %e, "Failed to fetch document");
            return internal_error();
        }
    };

    if let Err(e) = repo.delete_document(doc_id).await {
        error!(error = %e, "Failed to delete document record");
        return internal_error();
    }

    // Best effort: a dangling blob is preferable to a dangling row.
    if let Err(e) = state.document_store.delete(&document.storage_key).await {
        error!(error = %e, key = %document.storage_key, "Failed to delete stored file");
    }

    info!(employee_id = %id, document_id = %doc_id, "Document deleted");
    (StatusCode::NO_CONTENT, ()).into_response()
}

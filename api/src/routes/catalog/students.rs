use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use services::catalog::{self, NewStudent};
use util::state::AppState;

use crate::auth::guards::Empty;
use crate::response::{ApiResponse, service_error};

#[derive(Debug, Deserialize)]
pub struct StudentFilter {
    pub section_id: Option<i64>,
}

/// POST /students
///
/// ### Request Body
/// ```json
/// { "name": "Meera", "enrollment_no": "E002", "rfid_uid": "04A1B2C3", "section_id": 1 }
/// ```
///
/// ### Responses
/// - `201 Created`
/// - `400 Bad Request` (blank field or unknown section)
/// - `409 Conflict` (enrollment number or RFID already registered)
pub async fn create_student(
    State(state): State<AppState>,
    Json(req): Json<NewStudent>,
) -> Response {
    match catalog::create_student(&state, req).await {
        Ok(created) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(created, "Student created successfully")),
        )
            .into_response(),
        Err(e) => service_error(e),
    }
}

/// GET /students?section_id=
pub async fn list_students(
    State(state): State<AppState>,
    Query(filter): Query<StudentFilter>,
) -> Response {
    match catalog::list_students(&state, filter.section_id).await {
        Ok(all) => (
            StatusCode::OK,
            Json(ApiResponse::success(all, "Students retrieved successfully")),
        )
            .into_response(),
        Err(e) => service_error(e),
    }
}

/// GET /students/{id}
pub async fn get_student(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    match catalog::get_student(&state, id).await {
        Ok(found) => (
            StatusCode::OK,
            Json(ApiResponse::success(found, "Student retrieved successfully")),
        )
            .into_response(),
        Err(e) => service_error(e),
    }
}

/// DELETE /students/{id}
///
/// Students with recorded attendance cannot be deleted (`409`).
pub async fn delete_student(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    match catalog::delete_student(&state, id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse::success(Empty, "Student deleted successfully")),
        )
            .into_response(),
        Err(e) => service_error(e),
    }
}

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use services::catalog;
use util::state::AppState;

use crate::auth::guards::Empty;
use crate::response::{ApiResponse, service_error};

#[derive(Debug, Deserialize)]
pub struct SubjectRequest {
    pub code: String,
    pub name: String,
}

/// POST /subjects
///
/// Codes are stored upper case; `cs101` and `CS101` collide.
pub async fn create_subject(
    State(state): State<AppState>,
    Json(req): Json<SubjectRequest>,
) -> Response {
    match catalog::create_subject(&state, &req.code, &req.name).await {
        Ok(created) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(created, "Subject created successfully")),
        )
            .into_response(),
        Err(e) => service_error(e),
    }
}

/// GET /subjects
pub async fn list_subjects(State(state): State<AppState>) -> Response {
    match catalog::list_subjects(&state).await {
        Ok(all) => (
            StatusCode::OK,
            Json(ApiResponse::success(all, "Subjects retrieved successfully")),
        )
            .into_response(),
        Err(e) => service_error(e),
    }
}

/// GET /subjects/{id}
pub async fn get_subject(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    match catalog::get_subject(&state, id).await {
        Ok(found) => (
            StatusCode::OK,
            Json(ApiResponse::success(found, "Subject retrieved successfully")),
        )
            .into_response(),
        Err(e) => service_error(e),
    }
}

/// DELETE /subjects/{id}
pub async fn delete_subject(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    match catalog::delete_subject(&state, id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse::success(Empty, "Subject deleted successfully")),
        )
            .into_response(),
        Err(e) => service_error(e),
    }
}

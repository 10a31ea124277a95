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
pub struct SectionRequest {
    pub name: String,
}

/// POST /sections
pub async fn create_section(
    State(state): State<AppState>,
    Json(req): Json<SectionRequest>,
) -> Response {
    match catalog::create_section(&state, &req.name).await {
        Ok(created) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(created, "Section created successfully")),
        )
            .into_response(),
        Err(e) => service_error(e),
    }
}

/// GET /sections
pub async fn list_sections(State(state): State<AppState>) -> Response {
    match catalog::list_sections(&state).await {
        Ok(all) => (
            StatusCode::OK,
            Json(ApiResponse::success(all, "Sections retrieved successfully")),
        )
            .into_response(),
        Err(e) => service_error(e),
    }
}

/// GET /sections/{id}
pub async fn get_section(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    match catalog::get_section(&state, id).await {
        Ok(found) => (
            StatusCode::OK,
            Json(ApiResponse::success(found, "Section retrieved successfully")),
        )
            .into_response(),
        Err(e) => service_error(e),
    }
}

/// DELETE /sections/{id}
///
/// Refused with `409` while students still belong to the section.
pub async fn delete_section(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    match catalog::delete_section(&state, id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse::success(Empty, "Section deleted successfully")),
        )
            .into_response(),
        Err(e) => service_error(e),
    }
}

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use services::catalog::{self, NewSubjectInstance};
use util::state::AppState;

use crate::auth::guards::Empty;
use crate::response::{ApiResponse, service_error};

/// POST /subject-instances
///
/// Assigns a faculty member to teach a subject to a section.
pub async fn create_subject_instance(
    State(state): State<AppState>,
    Json(req): Json<NewSubjectInstance>,
) -> Response {
    match catalog::create_subject_instance(&state, req).await {
        Ok(created) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                created,
                "Subject instance created successfully",
            )),
        )
            .into_response(),
        Err(e) => service_error(e),
    }
}

/// GET /subject-instances
pub async fn list_subject_instances(State(state): State<AppState>) -> Response {
    match catalog::list_subject_instances(&state).await {
        Ok(all) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                all,
                "Subject instances retrieved successfully",
            )),
        )
            .into_response(),
        Err(e) => service_error(e),
    }
}

/// GET /subject-instances/{id}
pub async fn get_subject_instance(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Response {
    match catalog::get_subject_instance(&state, id).await {
        Ok(found) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                found,
                "Subject instance retrieved successfully",
            )),
        )
            .into_response(),
        Err(e) => service_error(e),
    }
}

/// DELETE /subject-instances/{id}
pub async fn delete_subject_instance(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Response {
    match catalog::delete_subject_instance(&state, id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                Empty,
                "Subject instance deleted successfully",
            )),
        )
            .into_response(),
        Err(e) => service_error(e),
    }
}

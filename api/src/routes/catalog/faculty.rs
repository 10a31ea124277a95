use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use services::catalog::{self, NewFaculty};
use util::state::AppState;

use crate::response::{ApiResponse, service_error};

/// POST /faculty
///
/// Registers a faculty member. When `email` and `password` are both given a
/// TEACHER login is created and linked to the profile.
pub async fn create_faculty(
    State(state): State<AppState>,
    Json(req): Json<NewFaculty>,
) -> Response {
    match catalog::create_faculty(&state, req).await {
        Ok(created) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(created, "Faculty created successfully")),
        )
            .into_response(),
        Err(e) => service_error(e),
    }
}

/// GET /faculty
pub async fn list_faculty(State(state): State<AppState>) -> Response {
    match catalog::list_faculty(&state).await {
        Ok(all) => (
            StatusCode::OK,
            Json(ApiResponse::success(all, "Faculty retrieved successfully")),
        )
            .into_response(),
        Err(e) => service_error(e),
    }
}

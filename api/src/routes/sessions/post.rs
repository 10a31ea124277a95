use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use services::{ServiceError, session};
use util::state::AppState;

use crate::auth::AuthUser;
use crate::response::{ApiResponse, service_error};

#[derive(Debug, Deserialize)]
pub struct StartSessionRequest {
    pub subject_instance_id: i64,
}

/// POST /sessions/start
///
/// Opens a session for one of the caller's subject instances. `start_at` is
/// taken from the server clock.
///
/// ### Responses
/// - `201 Created`
/// - `403 Forbidden` (instance assigned to someone else)
/// - `404 Not Found` (unknown instance)
/// - `409 Conflict` (an open session already exists for the instance)
pub async fn start_session(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<StartSessionRequest>,
) -> Response {
    let Some(faculty_id) = user.0.faculty_id else {
        return service_error(ServiceError::Forbidden(
            "A faculty profile is required".into(),
        ));
    };

    match session::start_session(&state, faculty_id, req.subject_instance_id).await {
        Ok(started) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(started, "Session started successfully")),
        )
            .into_response(),
        Err(e) => service_error(e),
    }
}

/// POST /sessions/{id}/close
///
/// Teachers may close their own sessions; coordinators may close any.
pub async fn close_session(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> Response {
    let owner = match session::get_session(&state, id).await {
        Ok(found) => found.teacher_id,
        Err(e) => return service_error(e),
    };
    if !user.is_coordinator() && user.0.faculty_id != Some(owner) {
        return service_error(ServiceError::Forbidden(
            "You can only close your own sessions".into(),
        ));
    }

    match session::close_session(&state, id).await {
        Ok(closed) => (
            StatusCode::OK,
            Json(ApiResponse::success(closed, "Session closed successfully")),
        )
            .into_response(),
        Err(e) => service_error(e),
    }
}

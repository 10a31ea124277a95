use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use services::{ServiceError, catalog, session};
use util::state::AppState;

use crate::auth::{AuthUser, DeviceAuth};
use crate::response::{ApiResponse, service_error};

/// GET /sessions/active
pub async fn active_sessions(State(state): State<AppState>) -> Response {
    match session::list_active_sessions(&state).await {
        Ok(open) => (
            StatusCode::OK,
            Json(ApiResponse::success(open, "Active sessions retrieved")),
        )
            .into_response(),
        Err(e) => service_error(e),
    }
}

/// GET /sessions/teacher-instances
pub async fn teacher_instances(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Response {
    let Some(faculty_id) = user.0.faculty_id else {
        return service_error(ServiceError::Forbidden(
            "A faculty profile is required".into(),
        ));
    };

    match catalog::teacher_instances(&state, faculty_id).await {
        Ok(all) => (
            StatusCode::OK,
            Json(ApiResponse::success(all, "Subject instances retrieved")),
        )
            .into_response(),
        Err(e) => service_error(e),
    }
}

/// GET /sessions/active-by-teacher/{teacher_id}
///
/// Polled by readers after a teacher tap. `data` is `null` when the teacher
/// has no open session.
pub async fn active_by_teacher(
    State(state): State<AppState>,
    _reader: DeviceAuth,
    Path(teacher_id): Path<i64>,
) -> Response {
    match session::active_session_for_teacher(&state, teacher_id).await {
        Ok(Some(found)) => (
            StatusCode::OK,
            Json(ApiResponse::success(Some(found), "Active session found")),
        )
            .into_response(),
        Ok(None) => (
            StatusCode::OK,
            Json(ApiResponse::<Option<session::SessionDetail>>::success(
                None,
                "No active session",
            )),
        )
            .into_response(),
        Err(e) => service_error(e),
    }
}

/// GET /sessions/{id}
pub async fn get_session(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    match session::get_session(&state, id).await {
        Ok(found) => (
            StatusCode::OK,
            Json(ApiResponse::success(found, "Session retrieved successfully")),
        )
            .into_response(),
        Err(e) => service_error(e),
    }
}

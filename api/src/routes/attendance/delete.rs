use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use services::attendance;
use util::state::AppState;

use crate::response::{ApiResponse, service_error};

#[derive(Debug, Serialize)]
pub struct DeletedLogs {
    pub deleted: u64,
}

/// DELETE /attendance/sessions/{session_id}/logs
pub async fn delete_logs(State(state): State<AppState>, Path(session_id): Path<i64>) -> Response {
    match attendance::delete_session_logs(&state, session_id).await {
        Ok(deleted) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                DeletedLogs { deleted },
                "Attendance logs deleted",
            )),
        )
            .into_response(),
        Err(e) => service_error(e),
    }
}

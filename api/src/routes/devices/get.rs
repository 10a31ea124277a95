use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use services::{attendance, device};
use util::state::AppState;

use crate::response::{ApiResponse, service_error};

/// GET /devices
pub async fn list_devices(State(state): State<AppState>) -> Response {
    match device::list_devices(&state).await {
        Ok(all) => (
            StatusCode::OK,
            Json(ApiResponse::success(all, "Devices retrieved successfully")),
        )
            .into_response(),
        Err(e) => service_error(e),
    }
}

/// GET /devices/auth-status/{session_id}
///
/// ### Response
/// ```json
/// {
///   "success": true,
///   "data": {
///     "is_authenticated": true,
///     "authenticated_by": "Asha Rao",
///     "device_mac_address": "AA:BB:CC:DD:EE:01",
///     "message": "Device authenticated and ready (Lab 1)"
///   },
///   "message": "Device status retrieved"
/// }
/// ```
pub async fn auth_status(State(state): State<AppState>, Path(session_id): Path<i64>) -> Response {
    match attendance::device_status(&state, session_id).await {
        Ok(status) => (
            StatusCode::OK,
            Json(ApiResponse::success(status, "Device status retrieved")),
        )
            .into_response(),
        Err(e) => service_error(e),
    }
}

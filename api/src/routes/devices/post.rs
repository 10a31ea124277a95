use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use services::device::{self, NewDevice};
use util::state::AppState;

use crate::auth::DeviceAuth;
use crate::response::{ApiResponse, service_error};

/// POST /devices/register
///
/// ### Request Body
/// ```json
/// { "mac_address": "AA:BB:CC:DD:EE:01", "secret": "s3cret", "name": "Lab 1", "location": "Block A" }
/// ```
///
/// The secret is stored hashed and never returned.
pub async fn register_device(
    State(state): State<AppState>,
    Json(req): Json<NewDevice>,
) -> Response {
    match device::register_device(&state, req).await {
        Ok(created) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(created, "Device registered successfully")),
        )
            .into_response(),
        Err(e) => service_error(e),
    }
}

/// POST /devices/heartbeat
///
/// Sent by a reader on boot. Stamps `last_boot_at` with the server clock.
pub async fn heartbeat(State(state): State<AppState>, DeviceAuth(reader): DeviceAuth) -> Response {
    match device::record_heartbeat(&state, &reader.mac_addr).await {
        Ok(updated) => (
            StatusCode::OK,
            Json(ApiResponse::success(updated, "Heartbeat recorded")),
        )
            .into_response(),
        Err(e) => service_error(e),
    }
}

#[derive(Debug, Deserialize)]
pub struct TeacherTapRequest {
    pub teacher_rfid: String,
}

/// POST /devices/authenticate-teacher
///
/// A teacher taps their card on the calling reader. The reader is linked to
/// every open session of that teacher.
///
/// ### Responses
/// - `200 OK` with `{ id, name, emp_id, linked_sessions }`
/// - `401 Unauthorized` (no faculty with that card)
pub async fn authenticate_teacher(
    State(state): State<AppState>,
    DeviceAuth(reader): DeviceAuth,
    Json(req): Json<TeacherTapRequest>,
) -> Response {
    match device::authenticate_teacher(&state, &reader.mac_addr, &req.teacher_rfid).await {
        Ok(teacher) => (
            StatusCode::OK,
            Json(ApiResponse::success(teacher, "Teacher authenticated")),
        )
            .into_response(),
        Err(e) => service_error(e),
    }
}

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use services::attendance::{self, ScanRequest};
use util::state::AppState;

use crate::auth::DeviceAuth;
use crate::response::{ApiResponse, service_error};

#[derive(Debug, Deserialize)]
pub struct ScanBody {
    pub rfid_uid: String,
    pub session_id: i64,
    /// Reader's own clock reading. Omit to use the server clock.
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// POST /attendance/scan
///
/// ### Request Body
/// ```json
/// { "rfid_uid": "04A1B2C3", "session_id": 7, "timestamp": "2025-09-24 11:54:31" }
/// ```
///
/// `timestamp` may be RFC 3339 with an offset, epoch milliseconds, or the
/// reader's local wall-clock digits (interpreted at the host offset).
///
/// ### Responses
/// - `201 Created` with the stored log and the display-zone time
/// - `400 Bad Request` (session closed or missing, unreadable timestamp)
/// - `404 Not Found` (unknown card)
/// - `409 Conflict` (student already marked present)
pub async fn scan(
    State(state): State<AppState>,
    DeviceAuth(reader): DeviceAuth,
    Json(body): Json<ScanBody>,
) -> Response {
    let req = ScanRequest {
        rfid_uid: body.rfid_uid,
        device_mac: reader.mac_addr,
        session_id: body.session_id,
        reading: body.timestamp,
    };

    match attendance::process_scan(&state, req).await {
        Ok(outcome) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(outcome, "Attendance marked")),
        )
            .into_response(),
        Err(e) => service_error(e),
    }
}

use axum::{
    Router,
    middleware::from_fn,
    routing::{delete, get, post},
};
use util::state::AppState;

use crate::auth::guards::{allow_admin, allow_authenticated};

pub mod delete;
pub mod get;
pub mod post;

/// Builds the `/attendance` route group.
///
/// - `POST /attendance/scan` → record a card scan (reader credentials)
/// - `GET /attendance/snapshot/{session_id}` → present and absent lists
/// - `GET /attendance/export/{session_id}` → CSV download
/// - `GET /attendance/report/{section_id}?from=&to=&subject_id=` → per-student totals
/// - `GET /attendance/device-status/{session_id}` → reader linked to the session
/// - `DELETE /attendance/sessions/{session_id}/logs` → wipe a session's scans (admin)
pub fn attendance_routes() -> Router<AppState> {
    Router::new()
        .route("/scan", post(post::scan))
        .route(
            "/snapshot/{session_id}",
            get(get::snapshot).route_layer(from_fn(allow_authenticated)),
        )
        .route(
            "/export/{session_id}",
            get(get::export_csv).route_layer(from_fn(allow_authenticated)),
        )
        .route(
            "/report/{section_id}",
            get(get::report).route_layer(from_fn(allow_authenticated)),
        )
        .route(
            "/device-status/{session_id}",
            get(get::device_status).route_layer(from_fn(allow_authenticated)),
        )
        .route(
            "/sessions/{session_id}/logs",
            delete(delete::delete_logs).route_layer(from_fn(allow_admin)),
        )
}

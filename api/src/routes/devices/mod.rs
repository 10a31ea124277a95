use axum::{
    Router,
    middleware::from_fn,
    routing::{get, post},
};
use util::state::AppState;

use crate::auth::guards::{allow_authenticated, allow_coordinator};

pub mod get;
pub mod post;

/// Builds the `/devices` route group.
///
/// - `POST /devices/register` → register a reader (coordinators)
/// - `GET /devices` → list readers, newest first (coordinators)
/// - `POST /devices/heartbeat` → reader boot/keep-alive (reader credentials)
/// - `POST /devices/authenticate-teacher` → teacher taps their card (reader credentials)
/// - `GET /devices/auth-status/{session_id}` → which reader serves a session (users)
pub fn devices_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/register",
            post(post::register_device).route_layer(from_fn(allow_coordinator)),
        )
        .route(
            "/",
            get(get::list_devices).route_layer(from_fn(allow_coordinator)),
        )
        .route("/heartbeat", post(post::heartbeat))
        .route("/authenticate-teacher", post(post::authenticate_teacher))
        .route(
            "/auth-status/{session_id}",
            get(get::auth_status).route_layer(from_fn(allow_authenticated)),
        )
}

use axum::{
    Router,
    middleware::from_fn,
    routing::{get, post},
};
use util::state::AppState;

use crate::auth::guards::{allow_authenticated, allow_faculty};

pub mod get;
pub mod post;

/// Builds the `/sessions` route group.
///
/// - `POST /sessions/start` → open a session for one of the caller's classes
/// - `POST /sessions/{id}/close` → close it
/// - `GET /sessions/active` → every open session
/// - `GET /sessions/teacher-instances` → the caller's subject instances
/// - `GET /sessions/active-by-teacher/{teacher_id}` → latest open session (reader credentials)
/// - `GET /sessions/{id}` → one session
pub fn sessions_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/start",
            post(post::start_session).route_layer(from_fn(allow_faculty)),
        )
        .route(
            "/teacher-instances",
            get(get::teacher_instances).route_layer(from_fn(allow_faculty)),
        )
        .route(
            "/{id}/close",
            post(post::close_session).route_layer(from_fn(allow_authenticated)),
        )
        .route(
            "/active",
            get(get::active_sessions).route_layer(from_fn(allow_authenticated)),
        )
        .route(
            "/active-by-teacher/{teacher_id}",
            get(get::active_by_teacher),
        )
        .route(
            "/{id}",
            get(get::get_session).route_layer(from_fn(allow_authenticated)),
        )
}

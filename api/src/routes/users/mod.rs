use axum::{Router, routing::post};
use util::state::AppState;

pub mod post;

use post::create_user;

/// Builds the `/users` route group. Mounted behind the coordinator guard.
pub fn users_routes() -> Router<AppState> {
    Router::new().route("/", post(create_user))
}

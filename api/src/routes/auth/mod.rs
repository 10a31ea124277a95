use axum::{Router, routing::post};
use util::state::AppState;

pub mod post;

use post::login;

/// Builds the `/auth` route group.
///
/// - `POST /auth/login` → exchange email and password for a JWT
pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

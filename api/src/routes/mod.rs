//! HTTP route entry point for `/api/...`.
//!
//! Route groups:
//! - `/health` → database probe (public)
//! - `/auth` → login (public)
//! - `/users` → account creation (coordinators)
//! - `/faculty`, `/sections`, `/subjects`, `/students`, `/subject-instances` → catalog CRUD (coordinators)
//! - `/devices` → reader registration, heartbeat and teacher tap
//! - `/sessions` → class session lifecycle
//! - `/attendance` → scans, snapshots, exports and reports
//!
//! Groups that mix user and reader callers pick a guard per route instead of
//! one `route_layer` for the whole group.

use crate::auth::guards::allow_coordinator;
use crate::routes::{
    attendance::attendance_routes, auth::auth_routes, catalog::catalog_routes,
    devices::devices_routes, health::health_routes, sessions::sessions_routes,
    users::users_routes,
};
use axum::{Router, middleware::from_fn};
use util::state::AppState;

pub mod attendance;
pub mod auth;
pub mod catalog;
pub mod devices;
pub mod health;
pub mod sessions;
pub mod users;

/// Builds the complete application router for all HTTP endpoints.
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .nest("/health", health_routes())
        .nest("/auth", auth_routes())
        .nest("/users", users_routes().route_layer(from_fn(allow_coordinator)))
        .merge(catalog_routes().route_layer(from_fn(allow_coordinator)))
        .nest("/devices", devices_routes())
        .nest("/sessions", sessions_routes())
        .nest("/attendance", attendance_routes())
        .with_state(app_state)
}

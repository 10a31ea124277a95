use crate::response::ApiResponse;
use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::get};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Instant;
use util::{config, state::AppState};

/// Builds the `/health` route group.
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/", get(health_check))
}

#[derive(Debug, Serialize, Default)]
pub struct HealthReport {
    pub status: String,
    pub database: String,
    pub latency_ms: u64,
    pub env: String,
    pub display_timezone: String,
    pub server_time: Option<DateTime<Utc>>,
}

/// GET /health
///
/// Probes the database and reports how long the round trip took.
///
/// ### Responses
/// - `200 OK` when the database answers
/// - `503 Service Unavailable` otherwise, with `database` set to the error
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let started = Instant::now();
    let probe = state.db().ping().await;
    let latency_ms = started.elapsed().as_millis() as u64;

    let mut report = HealthReport {
        status: "ok".into(),
        database: "ok".into(),
        latency_ms,
        env: config::env(),
        display_timezone: state.display().name().to_owned(),
        server_time: Some(state.clock().now()),
    };

    match probe {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse::success(report, "Health check passed")),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Database health probe failed");
            report.status = "degraded".into();
            report.database = e.to_string();
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ApiResponse {
                    success: false,
                    data: report,
                    message: "Database unreachable".into(),
                }),
            )
        }
    }
}

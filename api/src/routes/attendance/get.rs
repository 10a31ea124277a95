use axum::{
    Json,
    extract::{Path, Query, State},
    http::{
        StatusCode,
        header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    },
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use serde::Deserialize;
use services::{attendance, report};
use util::state::AppState;

use crate::response::{ApiResponse, service_error};

/// GET /attendance/snapshot/{session_id}
///
/// Present students in scan order with stored instant and display time,
/// then absent students by name.
pub async fn snapshot(State(state): State<AppState>, Path(session_id): Path<i64>) -> Response {
    match attendance::snapshot(&state, session_id).await {
        Ok(snap) => (
            StatusCode::OK,
            Json(ApiResponse::success(snap, "Attendance snapshot retrieved")),
        )
            .into_response(),
        Err(e) => service_error(e),
    }
}

/// GET /attendance/export/{session_id}
///
/// Streams the session roster as `text/csv`, one row per student.
pub async fn export_csv(State(state): State<AppState>, Path(session_id): Path<i64>) -> Response {
    match report::session_report_csv(&state, session_id).await {
        Ok(csv) => (
            StatusCode::OK,
            [
                (CONTENT_TYPE, "text/csv; charset=utf-8".to_owned()),
                (
                    CONTENT_DISPOSITION,
                    format!("attachment; filename=\"attendance_session_{session_id}.csv\""),
                ),
            ],
            csv,
        )
            .into_response(),
        Err(e) => service_error(e),
    }
}

#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub subject_id: Option<i64>,
}

/// GET /attendance/report/{section_id}?from=2025-09-01&to=2025-09-30&subject_id=3
///
/// Dates are calendar days in the display zone, both ends inclusive.
pub async fn report(
    State(state): State<AppState>,
    Path(section_id): Path<i64>,
    Query(q): Query<ReportQuery>,
) -> Response {
    match report::aggregated_report(&state, section_id, q.from, q.to, q.subject_id).await {
        Ok(rep) => (
            StatusCode::OK,
            Json(ApiResponse::success(rep, "Attendance report generated")),
        )
            .into_response(),
        Err(e) => service_error(e),
    }
}

/// GET /attendance/device-status/{session_id}
pub async fn device_status(
    State(state): State<AppState>,
    Path(session_id): Path<i64>,
) -> Response {
    match attendance::device_status(&state, session_id).await {
        Ok(status) => (
            StatusCode::OK,
            Json(ApiResponse::success(status, "Device status retrieved")),
        )
            .into_response(),
        Err(e) => service_error(e),
    }
}

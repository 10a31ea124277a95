//! Session export and date-range reports.
//!
//! Report dates are calendar days in the display zone. A session belongs to
//! the day its `start_at` falls on there, not to its UTC date.

use crate::error::{ServiceError, ServiceResult};
use chrono::NaiveDate;
use db::models::{attendance_log, class_session, section, student, subject_instance};
use sea_orm::EntityTrait;
use serde::Serialize;
use std::collections::HashMap;
use util::state::AppState;
use util::time::{DisplayZone, UNKNOWN_TIME};

const CSV_HEADER: &str = "S. No.,Student Name,Enrollment No.,Status,Scanned At";
const NOT_SCANNED: &str = "N/A";

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StudentAttendance {
    pub student_id: i64,
    pub name: String,
    pub enrollment_no: String,
    pub present_count: u32,
    pub absent_count: u32,
    pub total_sessions: u32,
    /// Rounded to two decimals. Zero when no session took place.
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AggregatedReport {
    pub section_id: i64,
    pub section_name: String,
    pub subject_id: Option<i64>,
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub total_sessions: u32,
    pub students: Vec<StudentAttendance>,
}

/// One row per student of the session's section, sorted by name.
pub async fn session_report_csv(state: &AppState, session_id: i64) -> ServiceResult<String> {
    let db = state.db();
    let session = class_session::Entity::find_by_id(session_id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("Session not found"))?;
    let instance = subject_instance::Entity::find_by_id(session.subject_instance_id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("Subject instance not found"))?;

    let roster = student::Model::list_by_section(db, instance.section_id).await?;
    let scans: HashMap<i64, attendance_log::StoredScan> =
        attendance_log::Model::list_stored_for_session(db, session_id)
            .await?
            .into_iter()
            .map(|log| (log.student_id, log))
            .collect();

    let mut out = String::from(CSV_HEADER);
    out.push('\n');
    for (i, s) in roster.iter().enumerate() {
        let (status, at) = match scans.get(&s.id) {
            Some(log) => (
                log.status.clone(),
                state
                    .display()
                    .format_stored_with(&log.scanned_at, DisplayZone::format_date_time_seconds),
            ),
            None => ("ABSENT".to_owned(), NOT_SCANNED.to_owned()),
        };
        out.push_str(&format!(
            "{},{},{},{},{}\n",
            i + 1,
            csv_field(&s.name),
            csv_field(&s.enrollment_no),
            status,
            csv_field(&at)
        ));
    }
    Ok(out)
}

/// Per-student totals over closed sessions of a section whose local start
/// date lies in `[from, to]`, optionally narrowed to one subject.
pub async fn aggregated_report(
    state: &AppState,
    section_id: i64,
    from: NaiveDate,
    to: NaiveDate,
    subject_id: Option<i64>,
) -> ServiceResult<AggregatedReport> {
    let db = state.db();
    let (start, end) = state
        .display()
        .day_bounds(from, to)
        .ok_or_else(|| ServiceError::bad_request("Invalid date range provided"))?;

    let section = section::Entity::find_by_id(section_id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("Section not found"))?;

    let instance_ids: Vec<i64> = subject_instance::Model::list_for_section(db, section_id)
        .await?
        .into_iter()
        .filter(|i| subject_id.is_none_or(|sid| i.subject_id == sid))
        .map(|i| i.id)
        .collect();

    let sessions = class_session::Model::list_closed_between(db, instance_ids, start, end).await?;
    let total = sessions.len() as u32;

    let mut present: HashMap<i64, u32> = HashMap::new();
    let attended =
        attendance_log::Model::student_ids_for_sessions(db, sessions.iter().map(|s| s.id).collect())
            .await?;
    for student_id in attended {
        *present.entry(student_id).or_default() += 1;
    }

    let students = student::Model::list_by_section(db, section_id)
        .await?
        .into_iter()
        .map(|s| {
            let present_count = present.get(&s.id).copied().unwrap_or(0);
            StudentAttendance {
                student_id: s.id,
                name: s.name,
                enrollment_no: s.enrollment_no,
                present_count,
                absent_count: total.saturating_sub(present_count),
                total_sessions: total,
                percentage: percentage(present_count, total),
            }
        })
        .collect();

    Ok(AggregatedReport {
        section_id,
        section_name: section.name,
        subject_id,
        from,
        to,
        total_sessions: total,
        students,
    })
}

fn percentage(present: u32, total: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (f64::from(present) / f64::from(total) * 10_000.0).round() / 100.0
}

fn csv_field(raw: &str) -> String {
    if raw.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", raw.replace('"', "\"\""))
    } else {
        raw.to_owned()
    }
}

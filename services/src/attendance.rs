//! Scan processing and live attendance views.
//!
//! A scan's instant is fixed once, at the write boundary, by the normalizer:
//! either from a reading the device supplied or from the injected clock.
//! Everything stored is UTC; the display zone is applied only when building
//! responses.

use crate::error::{ServiceError, ServiceResult, conflict_on_duplicate, require};
use chrono::{DateTime, Utc};
use db::models::{attendance_log, class_session, device, faculty, student, subject_instance};
use sea_orm::EntityTrait;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use util::state::AppState;
use util::time::parse_stored;

const DUPLICATE_SCAN: &str = "Student already marked present for this session";

#[derive(Debug, Clone, Deserialize)]
pub struct ScanRequest {
    pub rfid_uid: String,
    pub device_mac: String,
    pub session_id: i64,
    /// Device clock reading: RFC 3339 with offset, epoch milliseconds, or
    /// host-local wall-clock digits. Absent means "use the server clock".
    #[serde(default)]
    pub reading: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScanOutcome {
    pub log: attendance_log::Model,
    pub student_name: String,
    pub enrollment_no: String,
    /// `log.scanned_at` rendered in the display zone.
    pub display_time: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SnapshotEntry {
    pub student_id: i64,
    pub name: String,
    pub enrollment_no: String,
    pub status: String,
    pub scanned_at: Option<DateTime<Utc>>,
    pub display_time: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Snapshot {
    pub session_id: i64,
    pub present: Vec<SnapshotEntry>,
    pub absent: Vec<SnapshotEntry>,
    pub total_students: usize,
    pub present_count: usize,
    pub absent_count: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DeviceStatus {
    pub is_authenticated: bool,
    pub authenticated_by: Option<String>,
    pub device_mac_address: Option<String>,
    pub message: String,
}

/// Records one PRESENT log.
///
/// Checks run in order: device known, session open, student known, not yet
/// marked. An unreadable device reading rejects the scan before anything is
/// written.
pub async fn process_scan(state: &AppState, req: ScanRequest) -> ServiceResult<ScanOutcome> {
    let db = state.db();
    let rfid = require(&req.rfid_uid, "rfid_uid")?;
    let mac = require(&req.device_mac, "device_mac")?;

    let reader = device::Model::find_by_mac(db, &mac)
        .await?
        .ok_or_else(|| ServiceError::not_found("Device not found"))?;

    let session = match class_session::Entity::find_by_id(req.session_id).one(db).await? {
        Some(s) if !s.is_closed => s,
        _ => {
            return Err(ServiceError::bad_request(
                "Session is not active or does not exist",
            ));
        }
    };

    let scanned = student::Model::find_by_rfid(db, &rfid)
        .await?
        .ok_or_else(|| ServiceError::not_found("Student with this RFID UID not found"))?;

    if attendance_log::Model::find_for_student(db, session.id, scanned.id)
        .await?
        .is_some()
    {
        return Err(ServiceError::conflict(DUPLICATE_SCAN));
    }

    let scanned_at = state
        .normalizer()
        .normalize_supplied(req.reading.as_deref(), state.clock())
        .inspect_err(|e| {
            tracing::warn!(
                session_id = session.id,
                reading = ?req.reading,
                error = %e,
                "Scan rejected: unusable clock reading"
            )
        })?;

    let log = attendance_log::Model::create(
        db,
        session.id,
        scanned.id,
        scanned_at,
        Some(&reader.mac_addr),
        Some(reader.id),
    )
    .await
    .map_err(|e| conflict_on_duplicate(e, DUPLICATE_SCAN))?;

    if session.device_id.is_none() {
        class_session::Model::set_device(db, session.id, reader.id).await?;
    }

    let display_time = state.display().format_time(&log.scanned_at);
    tracing::info!(
        session_id = session.id,
        student_id = scanned.id,
        scanned_at = %log.scanned_at,
        display_time = %display_time,
        "Attendance recorded"
    );

    Ok(ScanOutcome {
        log,
        student_name: scanned.name,
        enrollment_no: scanned.enrollment_no,
        display_time,
    })
}

/// Present students in scan order and absent students by name.
pub async fn snapshot(state: &AppState, session_id: i64) -> ServiceResult<Snapshot> {
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
    let logs = attendance_log::Model::list_stored_for_session(db, session_id).await?;

    let mut present = Vec::with_capacity(logs.len());
    let mut seen = HashSet::new();
    for log in &logs {
        let Some(s) = student::Entity::find_by_id(log.student_id).one(db).await? else {
            continue;
        };
        seen.insert(s.id);
        present.push(SnapshotEntry {
            student_id: s.id,
            name: s.name,
            enrollment_no: s.enrollment_no,
            status: log.status.clone(),
            scanned_at: parse_stored(&log.scanned_at).ok(),
            display_time: Some(state.display().format_stored(&log.scanned_at)),
        });
    }

    let absent: Vec<SnapshotEntry> = roster
        .iter()
        .filter(|s| !seen.contains(&s.id))
        .map(|s| SnapshotEntry {
            student_id: s.id,
            name: s.name.clone(),
            enrollment_no: s.enrollment_no.clone(),
            status: "ABSENT".into(),
            scanned_at: None,
            display_time: None,
        })
        .collect();

    Ok(Snapshot {
        session_id,
        present_count: present.len(),
        absent_count: absent.len(),
        total_students: roster.len(),
        present,
        absent,
    })
}

/// Whether a reader is bound to the session and who bound it.
pub async fn device_status(state: &AppState, session_id: i64) -> ServiceResult<DeviceStatus> {
    let db = state.db();
    let session = class_session::Entity::find_by_id(session_id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("Session not found"))?;

    let bound = match session.device_id {
        Some(id) if !session.is_closed => device::Entity::find_by_id(id).one(db).await?,
        _ => None,
    };

    let Some(reader) = bound else {
        return Ok(DeviceStatus {
            is_authenticated: false,
            authenticated_by: None,
            device_mac_address: None,
            message: "Device not authenticated - teacher needs to scan RFID card".into(),
        });
    };

    let teacher = faculty::Entity::find_by_id(session.teacher_id).one(db).await?;
    Ok(DeviceStatus {
        is_authenticated: true,
        authenticated_by: teacher.map(|t| t.name),
        message: format!(
            "Device authenticated and ready ({})",
            reader.name.as_deref().unwrap_or("Unnamed device")
        ),
        device_mac_address: Some(reader.mac_addr),
    })
}

/// Administrative cleanup of one session's logs.
pub async fn delete_session_logs(state: &AppState, session_id: i64) -> ServiceResult<u64> {
    class_session::Entity::find_by_id(session_id)
        .one(state.db())
        .await?
        .ok_or_else(|| ServiceError::not_found("Session not found"))?;

    let removed = attendance_log::Model::delete_for_session(state.db(), session_id).await?;
    tracing::warn!(session_id, removed, "Attendance logs deleted");
    Ok(removed)
}

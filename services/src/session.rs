//! Class session lifecycle.
//!
//! Session boundaries are stamped from the injected clock, so `start_at` and
//! `end_at` are absolute instants and are never shifted by a zone offset.

use crate::catalog::{InstanceDetail, describe_instances};
use crate::error::{ServiceError, ServiceResult};
use chrono::{DateTime, Utc};
use db::models::{class_session, faculty, subject_instance};
use sea_orm::EntityTrait;
use serde::Serialize;
use util::state::AppState;

/// A session with the names and display strings a client needs.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SessionDetail {
    pub id: i64,
    pub subject_instance_id: i64,
    pub subject_code: String,
    pub subject_name: String,
    pub section_id: i64,
    pub section_name: String,
    pub teacher_id: i64,
    pub teacher_name: String,
    pub device_id: Option<i64>,
    pub start_at: DateTime<Utc>,
    pub end_at: Option<DateTime<Utc>>,
    pub is_closed: bool,
    /// `start_at` rendered in the display zone.
    pub start_display: String,
    pub date_display: String,
}

pub async fn start_session(
    state: &AppState,
    faculty_id: i64,
    subject_instance_id: i64,
) -> ServiceResult<class_session::Model> {
    let db = state.db();

    faculty::Entity::find_by_id(faculty_id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("Faculty not found"))?;

    let instance = subject_instance::Entity::find_by_id(subject_instance_id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("Subject instance not found"))?;

    if instance.faculty_id != faculty_id {
        return Err(ServiceError::Forbidden(
            "This subject instance is not assigned to you".into(),
        ));
    }

    if let Some(open) = class_session::Model::find_open_for_instance(db, subject_instance_id).await? {
        return Err(ServiceError::conflict(format!(
            "An active session ({}) already exists for this class",
            open.id
        )));
    }

    // A reader the teacher already authenticated stays with them.
    let inherited_device = class_session::Model::list_open_for_teacher(db, faculty_id)
        .await?
        .into_iter()
        .find_map(|s| s.device_id);

    let start_at = state.normalizer().normalize_now(state.clock());
    let session =
        class_session::Model::create(db, subject_instance_id, faculty_id, inherited_device, start_at)
            .await?;

    tracing::info!(
        session_id = session.id,
        faculty_id,
        subject_instance_id,
        device_id = ?session.device_id,
        "Session started"
    );
    Ok(session)
}

pub async fn close_session(state: &AppState, session_id: i64) -> ServiceResult<class_session::Model> {
    let db = state.db();
    let session = class_session::Entity::find_by_id(session_id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("Session not found"))?;

    if session.is_closed {
        return Err(ServiceError::conflict("Session is already closed"));
    }

    let end_at = state.normalizer().normalize_now(state.clock());
    let closed = class_session::Model::close(db, session_id, end_at).await?;
    tracing::info!(session_id, "Session closed");
    Ok(closed)
}

pub async fn get_session(state: &AppState, session_id: i64) -> ServiceResult<SessionDetail> {
    let session = class_session::Entity::find_by_id(session_id)
        .one(state.db())
        .await?
        .ok_or_else(|| ServiceError::not_found("Session not found"))?;
    describe(state, vec![session])
        .await?
        .pop()
        .ok_or_else(|| ServiceError::not_found("Session not found"))
}

pub async fn list_active_sessions(state: &AppState) -> ServiceResult<Vec<SessionDetail>> {
    let open = class_session::Model::list_open(state.db()).await?;
    describe(state, open).await
}

/// The teacher's most recently started open session, if any.
pub async fn active_session_for_teacher(
    state: &AppState,
    teacher_id: i64,
) -> ServiceResult<Option<SessionDetail>> {
    let latest = class_session::Model::list_open_for_teacher(state.db(), teacher_id)
        .await?
        .into_iter()
        .next();
    match latest {
        Some(session) => Ok(describe(state, vec![session]).await?.pop()),
        None => Ok(None),
    }
}

/// Closes every session still open. Returns how many were closed.
pub async fn close_stale_sessions(state: &AppState) -> ServiceResult<u64> {
    let end_at = state.normalizer().normalize_now(state.clock());
    let closed = class_session::Model::close_all_open(state.db(), end_at).await?;
    if closed > 0 {
        tracing::info!(closed, at = %end_at, "Auto-closed stale sessions");
    }
    Ok(closed)
}

async fn describe(
    state: &AppState,
    sessions: Vec<class_session::Model>,
) -> ServiceResult<Vec<SessionDetail>> {
    let db = state.db();
    let mut out = Vec::with_capacity(sessions.len());

    for session in sessions {
        let instance = subject_instance::Entity::find_by_id(session.subject_instance_id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Subject instance not found"))?;
        let detail: Option<InstanceDetail> = describe_instances(state, vec![instance]).await?.pop();
        let Some(detail) = detail else { continue };

        out.push(SessionDetail {
            id: session.id,
            subject_instance_id: session.subject_instance_id,
            subject_code: detail.subject_code,
            subject_name: detail.subject_name,
            section_id: detail.section_id,
            section_name: detail.section_name,
            teacher_id: session.teacher_id,
            teacher_name: detail.faculty_name,
            device_id: session.device_id,
            start_display: state.display().format_time(&session.start_at),
            date_display: state.display().format_date(&session.start_at),
            start_at: session.start_at,
            end_at: session.end_at,
            is_closed: session.is_closed,
        });
    }

    Ok(out)
}

use crate::error::{ServiceError, ServiceResult, conflict_on_duplicate, require};
use db::models::{class_session, device, faculty};
use serde::{Deserialize, Serialize};
use util::state::AppState;

const DUPLICATE_MAC: &str = "Device with this MAC address already registered";

#[derive(Debug, Clone, Deserialize)]
pub struct NewDevice {
    pub mac_address: String,
    pub secret: String,
    pub name: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AuthenticatedTeacher {
    pub id: i64,
    pub name: String,
    pub emp_id: String,
    /// Open sessions now bound to the reader.
    pub linked_sessions: u64,
}

pub async fn register_device(state: &AppState, input: NewDevice) -> ServiceResult<device::Model> {
    let mac = require(&input.mac_address, "mac_address")?;
    let secret = require(&input.secret, "secret")?;

    if device::Model::find_by_mac(state.db(), &mac).await?.is_some() {
        return Err(ServiceError::conflict(DUPLICATE_MAC));
    }

    let created = device::Model::create(
        state.db(),
        &mac,
        &secret,
        input.name.as_deref(),
        input.location.as_deref(),
        state.clock().now(),
    )
    .await
    .map_err(|e| conflict_on_duplicate(e, DUPLICATE_MAC))?;
    tracing::info!(device_id = created.id, mac = %created.mac_addr, "Device registered");
    Ok(created)
}

pub async fn list_devices(state: &AppState) -> ServiceResult<Vec<device::Model>> {
    Ok(device::Model::list(state.db()).await?)
}

/// Checks the reader's credentials.
pub async fn authenticate_device(
    state: &AppState,
    mac: &str,
    secret: &str,
) -> ServiceResult<device::Model> {
    if mac.trim().is_empty() || secret.is_empty() {
        return Err(ServiceError::bad_request("MAC address and secret are required"));
    }

    match device::Model::find_by_mac(state.db(), mac).await? {
        Some(found) if found.verify_secret(secret) => Ok(found),
        _ => {
            tracing::warn!(mac, "Rejected device credentials");
            Err(ServiceError::Unauthorized("Invalid device credentials".into()))
        }
    }
}

/// Stamps `last_boot_at` with the current clock instant.
pub async fn record_heartbeat(state: &AppState, mac: &str) -> ServiceResult<device::Model> {
    let mac = require(mac, "mac_address")?;
    let found = device::Model::find_by_mac(state.db(), &mac)
        .await?
        .ok_or_else(|| ServiceError::not_found("Device not found"))?;

    let at = state.normalizer().normalize_now(state.clock());
    Ok(device::Model::record_boot(state.db(), found.id, at).await?)
}

/// A teacher taps their card on a reader; the reader is bound to every open
/// session of that teacher.
pub async fn authenticate_teacher(
    state: &AppState,
    mac: &str,
    teacher_rfid: &str,
) -> ServiceResult<AuthenticatedTeacher> {
    let mac = require(mac, "mac_address")?;
    let teacher_rfid = require(teacher_rfid, "teacher_rfid")?;

    let reader = device::Model::find_by_mac(state.db(), &mac)
        .await?
        .ok_or_else(|| ServiceError::not_found("Device not found"))?;

    let Some(teacher) = faculty::Model::find_by_rfid(state.db(), &teacher_rfid).await? else {
        return Err(ServiceError::Unauthorized(
            "Teacher with this RFID not found or not registered".into(),
        ));
    };

    let linked =
        class_session::Model::link_device_to_teacher_sessions(state.db(), teacher.id, reader.id)
            .await?;
    tracing::info!(
        device_id = reader.id,
        teacher_id = teacher.id,
        linked,
        "Teacher authenticated on device"
    );

    Ok(AuthenticatedTeacher {
        id: teacher.id,
        name: teacher.name,
        emp_id: teacher.emp_id,
        linked_sessions: linked,
    })
}

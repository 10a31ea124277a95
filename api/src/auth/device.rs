//! Reader authentication.
//!
//! RFID readers do not hold user tokens. They send their MAC address and the
//! shared secret issued at registration in two headers on every call.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
};
use db::models::device;
use services::device::authenticate_device;
use util::state::AppState;

use crate::auth::guards::Empty;
use crate::response::{ApiResponse, status_of};

pub const DEVICE_MAC_HEADER: &str = "x-device-mac";
pub const DEVICE_SECRET_HEADER: &str = "x-device-secret";

/// A reader whose credentials were verified for this request.
#[derive(Debug, Clone)]
pub struct DeviceAuth(pub device::Model);

fn header<'a>(parts: &'a Parts, name: &str) -> Option<&'a str> {
    parts.headers.get(name).and_then(|v| v.to_str().ok())
}

impl FromRequestParts<AppState> for DeviceAuth {
    type Rejection = (StatusCode, Json<ApiResponse<Empty>>);

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let (Some(mac), Some(secret)) = (
            header(parts, DEVICE_MAC_HEADER),
            header(parts, DEVICE_SECRET_HEADER),
        ) else {
            return Err((
                StatusCode::UNAUTHORIZED,
                Json(ApiResponse::error("Device credentials required")),
            ));
        };

        authenticate_device(state, mac, secret)
            .await
            .map(DeviceAuth)
            .map_err(|e| (status_of(&e), Json(ApiResponse::error(e.to_string()))))
    }
}

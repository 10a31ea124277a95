use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use services::user::{self, Role};
use util::state::AppState;
use validator::Validate;

use crate::response::{ApiResponse, bad_request, format_validation_errors, service_error};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    pub role: Role,
}

/// POST /users
///
/// Creates an account. `role` is one of `ADMIN`, `PCOORD`, `TEACHER`.
///
/// ### Responses
/// - `201 Created` with the new user (no password hash)
/// - `400 Bad Request` (validation failure)
/// - `409 Conflict` (email taken)
pub async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> Response {
    if let Err(errors) = req.validate() {
        return bad_request(format_validation_errors(&errors));
    }

    match user::create_user(&state, &req.email, &req.password, req.role).await {
        Ok(created) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(created, "User created successfully")),
        )
            .into_response(),
        Err(e) => service_error(e),
    }
}

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use services::user::{UserSummary, login as check_credentials};
use util::state::AppState;
use validator::Validate;

use crate::auth::generate_jwt;
use crate::response::{ApiResponse, bad_request, format_validation_errors, service_error};

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: String,
    pub user: UserSummary,
}

/// POST /auth/login
///
/// ### Request Body
/// ```json
/// { "email": "teacher@example.edu", "password": "secret" }
/// ```
///
/// ### Responses
/// - `200 OK` with `{ token, expires_at, user }`
/// - `400 Bad Request` (validation failure)
/// - `401 Unauthorized` (unknown email or wrong password)
pub async fn login(State(state): State<AppState>, Json(req): Json<LoginRequest>) -> Response {
    if let Err(errors) = req.validate() {
        return bad_request(format_validation_errors(&errors));
    }

    let user = match check_credentials(&state, &req.email, &req.password).await {
        Ok(user) => user,
        Err(e) => return service_error(e),
    };

    match generate_jwt(user.id, user.role, user.faculty_id) {
        Ok((token, expires_at)) => {
            tracing::info!(user_id = user.id, role = %user.role, "User logged in");
            (
                StatusCode::OK,
                Json(ApiResponse::success(
                    LoginResponse {
                        token,
                        expires_at,
                        user,
                    },
                    "Login successful",
                )),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Token encoding failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<crate::auth::guards::Empty>::error(
                    "Could not issue token",
                )),
            )
                .into_response()
        }
    }
}

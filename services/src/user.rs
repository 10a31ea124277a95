//! Accounts and credential checks. Token issuing lives in the API layer.

use crate::error::{ServiceError, ServiceResult, require};
use db::models::{faculty, user};
use serde::Serialize;
use util::state::AppState;

pub use db::models::user::Role;

/// What a successful login exposes about the account.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct UserSummary {
    pub id: i64,
    pub email: String,
    pub role: Role,
    pub faculty_id: Option<i64>,
    pub rfid_uid: Option<String>,
}

pub async fn create_user(
    state: &AppState,
    email: &str,
    password: &str,
    role: Role,
) -> ServiceResult<user::Model> {
    let email = require(email, "email")?;
    if password.is_empty() {
        return Err(ServiceError::bad_request("password is required"));
    }

    if user::Model::find_by_email(state.db(), &email).await?.is_some() {
        return Err(ServiceError::conflict("User with this email already exists"));
    }

    let created = user::Model::create(state.db(), &email, password, role, state.clock().now()).await?;
    tracing::info!(user_id = created.id, role = %created.role, "User created");
    Ok(created)
}

pub async fn login(state: &AppState, email: &str, password: &str) -> ServiceResult<UserSummary> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(ServiceError::bad_request("Email and password are required"));
    }

    let Some(account) = user::Model::find_by_email(state.db(), email).await? else {
        return Err(ServiceError::Unauthorized("Invalid credentials".into()));
    };
    if !account.verify_password(password) {
        return Err(ServiceError::Unauthorized("Invalid credentials".into()));
    }

    let profile = faculty::Model::find_by_user_id(state.db(), account.id).await?;

    Ok(UserSummary {
        id: account.id,
        email: account.email,
        role: account.role,
        faculty_id: profile.as_ref().map(|f| f.id),
        rfid_uid: profile.and_then(|f| f.rfid_uid),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::fixture;
    use util::time::Clock;

    #[tokio::test]
    async fn login_returns_faculty_link() {
        let fx = fixture().await;

        let summary = login(&fx.state, "teacher@example.edu", "pw").await.unwrap();
        assert_eq!(summary.role, Role::Teacher);
        assert_eq!(summary.faculty_id, Some(fx.teacher.id));
        assert_eq!(summary.rfid_uid.as_deref(), Some("FAC-RFID-1"));
    }

    #[tokio::test]
    async fn bad_credentials_are_unauthorized() {
        let fx = fixture().await;

        let wrong_pw = login(&fx.state, "teacher@example.edu", "nope").await;
        let unknown = login(&fx.state, "ghost@example.edu", "pw").await;
        let blank = login(&fx.state, " ", "pw").await;

        assert!(matches!(wrong_pw, Err(ServiceError::Unauthorized(_))));
        assert!(matches!(unknown, Err(ServiceError::Unauthorized(_))));
        assert!(matches!(blank, Err(ServiceError::BadRequest(_))));
    }

    #[tokio::test]
    async fn duplicate_user_conflicts() {
        let fx = fixture().await;

        let created = create_user(&fx.state, "admin@example.edu", "pw", Role::Admin)
            .await
            .unwrap();
        assert_eq!(created.created_at, fx.clock.now());

        let again = create_user(&fx.state, "ADMIN@example.edu", "pw", Role::Admin).await;
        assert!(matches!(again, Err(ServiceError::Conflict(_))));
    }
}

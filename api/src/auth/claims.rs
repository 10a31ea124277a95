use serde::{Deserialize, Serialize};
use services::user::Role;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: i64,
    pub role: Role,
    /// Set when the account belongs to a faculty member.
    pub faculty_id: Option<i64>,
    pub exp: usize,
}

#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.0.role == Role::Admin
    }

    pub fn is_coordinator(&self) -> bool {
        self.0.role.is_coordinator()
    }
}

//! User domain model.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role assigned to a user account.
///
/// Serialized lowercase (`"admin"`, `"resident"`) — the same strings that
/// travel in the token's role claim.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Resident,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Resident => "resident",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    /// Argon2id PHC-format hash.
    pub password_hash: String,
    pub role: Role,
}

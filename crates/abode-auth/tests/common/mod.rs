//! Shared fixtures for the auth integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use uuid::Uuid;

use abode_auth::config::AuthConfig;
use abode_auth::password;
use abode_core::error::AbodeResult;
use abode_core::models::fingerprint::Fingerprint;
use abode_core::models::user::{Role, User};
use abode_core::repository::UserRepository;

pub const ALICE_PASSWORD: &str = "correct-horse-battery";
pub const MARTA_PASSWORD: &str = "staple-gun-quartz";

/// In-memory subject directory keyed by username.
#[derive(Clone, Default)]
pub struct MemoryUsers {
    users: Arc<HashMap<String, User>>,
}

impl MemoryUsers {
    pub fn with(users: Vec<User>) -> Self {
        Self {
            users: Arc::new(
                users
                    .into_iter()
                    .map(|u| (u.username.clone(), u))
                    .collect(),
            ),
        }
    }
}

impl UserRepository for MemoryUsers {
    async fn find_by_username(&self, username: &str) -> AbodeResult<Option<User>> {
        Ok(self.users.get(username).cloned())
    }
}

pub fn test_config() -> AuthConfig {
    AuthConfig {
        jwt_secret: "integration-test-secret".into(),
        store_timeout_ms: 1_000,
        ..AuthConfig::default()
    }
}

pub fn resident_alice() -> User {
    User {
        id: Uuid::new_v4(),
        username: "alice".into(),
        email: "alice@example.com".into(),
        password_hash: password::hash_password(ALICE_PASSWORD).unwrap(),
        role: Role::Resident,
    }
}

pub fn admin_marta() -> User {
    User {
        id: Uuid::new_v4(),
        username: "marta".into(),
        email: "marta@example.com".into(),
        password_hash: password::hash_password(MARTA_PASSWORD).unwrap(),
        role: Role::Admin,
    }
}

pub fn device_fingerprint() -> Fingerprint {
    Fingerprint::new("device-1", "TestAgent/1.0", "127.0.0.1")
}

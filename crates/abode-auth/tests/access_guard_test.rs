//! Integration tests for the access guard: blacklist enforcement and
//! role-gated authorization.

mod common;

use common::{
    ALICE_PASSWORD, MARTA_PASSWORD, MemoryUsers, admin_marta, device_fingerprint, resident_alice,
    test_config,
};

use abode_auth::config::AuthConfig;
use abode_auth::error::AuthError;
use abode_auth::guard::AccessGuard;
use abode_auth::session::{Credentials, SessionManager};
use abode_auth::token;
use abode_core::error::{AbodeError, AbodeResult};
use abode_core::models::user::Role;
use abode_core::store::SessionStore;
use abode_store::MemoryStore;

fn setup() -> (
    SessionManager<MemoryUsers, MemoryStore>,
    AccessGuard<MemoryStore>,
) {
    let users = MemoryUsers::with(vec![resident_alice(), admin_marta()]);
    let store = MemoryStore::new();
    let manager = SessionManager::new(users, store.clone(), test_config());
    let guard = AccessGuard::new(store, test_config());
    (manager, guard)
}

async fn access_token_for(
    manager: &SessionManager<MemoryUsers, MemoryStore>,
    username: &str,
    password: &str,
) -> String {
    manager
        .login(
            Credentials {
                username: username.into(),
                password: password.into(),
            },
            device_fingerprint(),
        )
        .await
        .unwrap()
        .access_token
}

#[tokio::test]
async fn valid_token_with_allowed_role_passes() {
    let (manager, guard) = setup();
    let access = access_token_for(&manager, "alice", ALICE_PASSWORD).await;

    let identity = guard
        .authorize(Some(&access), &[Role::Resident])
        .await
        .unwrap();
    assert_eq!(identity.role, Role::Resident);
    assert!(!identity.subject_id.is_empty());
}

#[tokio::test]
async fn any_of_several_allowed_roles_passes() {
    let (manager, guard) = setup();
    let access = access_token_for(&manager, "marta", MARTA_PASSWORD).await;

    let identity = guard
        .authorize(Some(&access), &[Role::Admin, Role::Resident])
        .await
        .unwrap();
    assert_eq!(identity.role, Role::Admin);
}

#[tokio::test]
async fn missing_token_is_unauthorized() {
    let (_manager, guard) = setup();

    let err = guard.authorize(None, &[Role::Resident]).await.unwrap_err();
    assert!(matches!(err, AuthError::Unauthorized), "got: {err:?}");

    let err = guard
        .authorize(Some(""), &[Role::Resident])
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::Unauthorized), "got: {err:?}");
}

#[tokio::test]
async fn tampered_token_is_unauthorized() {
    let (manager, guard) = setup();
    let access = access_token_for(&manager, "alice", ALICE_PASSWORD).await;
    let tampered = format!("{access}x");

    let err = guard
        .authorize(Some(&tampered), &[Role::Resident])
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::Unauthorized), "got: {err:?}");
}

#[tokio::test]
async fn disallowed_role_is_forbidden_not_unauthorized() {
    let (manager, guard) = setup();
    let access = access_token_for(&manager, "alice", ALICE_PASSWORD).await;

    // A resident hitting an admin-only gate is a distinct outcome from a
    // missing or unverifiable token.
    let err = guard
        .authorize(Some(&access), &[Role::Admin])
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::Forbidden), "got: {err:?}");
}

#[tokio::test]
async fn token_without_role_claim_is_unauthorized() {
    let (_manager, guard) = setup();
    let config = test_config();

    let roleless = token::issue("subject-1", None, 3_600, &config).unwrap();
    let err = guard
        .authorize(Some(&roleless), &[Role::Resident])
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::Unauthorized), "got: {err:?}");
}

#[tokio::test]
async fn blacklisted_token_is_rejected_while_still_verifiable() {
    let (manager, guard) = setup();
    let config = test_config();

    let login_out = manager
        .login(
            Credentials {
                username: "alice".into(),
                password: ALICE_PASSWORD.into(),
            },
            device_fingerprint(),
        )
        .await
        .unwrap();

    manager.logout(Some(&login_out.access_token), None).await;

    // Signature and expiry still check out; only the blacklist rejects it.
    assert!(token::verify(&login_out.access_token, &config).is_ok());

    let err = guard
        .authorize(Some(&login_out.access_token), &[Role::Resident])
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::TokenInvalid), "got: {err:?}");
}

#[tokio::test]
async fn misconfigured_signing_secret_is_internal_not_unauthorized() {
    let config = test_config();
    // Default config carries an empty secret, which is a boot-time fault.
    let guard = AccessGuard::new(MemoryStore::new(), AuthConfig::default());

    let access = token::issue("subject-1", Some(Role::Resident), 3_600, &config).unwrap();
    let err = guard
        .authorize(Some(&access), &[Role::Resident])
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::Internal(_)), "got: {err:?}");
}

/// Store double whose operations always fail.
#[derive(Clone)]
struct BrokenStore;

impl SessionStore for BrokenStore {
    async fn get(&self, _key: &str) -> AbodeResult<Option<String>> {
        Err(AbodeError::Store("connection refused".into()))
    }

    async fn set(&self, _key: &str, _value: &str, _ttl_secs: u64) -> AbodeResult<()> {
        Err(AbodeError::Store("connection refused".into()))
    }

    async fn delete(&self, _key: &str) -> AbodeResult<()> {
        Err(AbodeError::Store("connection refused".into()))
    }
}

#[tokio::test]
async fn unreachable_blacklist_fails_closed() {
    let config = test_config();
    let guard = AccessGuard::new(BrokenStore, config.clone());

    let access = token::issue("subject-1", Some(Role::Resident), 3_600, &config).unwrap();
    let err = guard
        .authorize(Some(&access), &[Role::Resident])
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::Internal(_)), "got: {err:?}");
}

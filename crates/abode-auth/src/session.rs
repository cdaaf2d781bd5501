//! Session manager — login, refresh rotation, and logout orchestration.
//!
//! Every refresh token moves through a two-state lifecycle: `ACTIVE` while
//! its session record exists in the store, then terminal once rotated or
//! revoked. The store never records the terminal state; a lookup miss is
//! all the evidence there is, and it is treated as reuse or expiry.

use std::time::Duration;

use tokio::time::timeout;
use tracing::{error, warn};
use uuid::Uuid;

use abode_core::models::fingerprint::Fingerprint;
use abode_core::models::session::SessionRecord;
use abode_core::models::user::Role;
use abode_core::repository::UserRepository;
use abode_core::store::{SessionStore, blacklist_key};

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::password;
use crate::token::{self, TokenError};

/// Login credentials as presented by the client.
#[derive(Debug)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Successful login result.
#[derive(Debug)]
pub struct LoginOutput {
    pub subject_id: Uuid,
    pub username: String,
    pub email: String,
    pub role: Role,
    /// Short-lived signed access token.
    pub access_token: String,
    /// Long-lived, single-use refresh token (rotated on every refresh).
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: u64,
}

/// Successful refresh result (rotated token pair).
#[derive(Debug)]
pub struct RefreshOutput {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: u64,
}

/// Session manager.
///
/// Generic over the subject repository and session store so the lifecycle
/// logic has no dependency on any particular database or Redis client.
pub struct SessionManager<U: UserRepository, S: SessionStore> {
    users: U,
    store: S,
    config: AuthConfig,
}

impl<U: UserRepository, S: SessionStore> SessionManager<U, S> {
    pub fn new(users: U, store: S, config: AuthConfig) -> Self {
        Self {
            users,
            store,
            config,
        }
    }

    /// Authenticate a subject and issue an access/refresh token pair.
    ///
    /// Binds the new session to the presented fingerprint; every later
    /// refresh must present the same one.
    pub async fn login(
        &self,
        credentials: Credentials,
        fingerprint: Fingerprint,
    ) -> Result<LoginOutput, AuthError> {
        let user = self
            .users
            .find_by_username(&credentials.username)
            .await
            .map_err(|e| AuthError::Internal(format!("subject lookup: {e}")))?
            .ok_or(AuthError::NotFound)?;

        let valid = password::verify_password(&credentials.password, &user.password_hash)?;
        if !valid {
            return Err(AuthError::InvalidCredential);
        }

        let subject = user.id.to_string();
        let access_token = self.issue(
            &subject,
            Some(user.role),
            self.config.access_token_lifetime_secs,
        )?;
        let refresh_token = self.issue(
            &subject,
            Some(user.role),
            self.config.refresh_token_lifetime_secs,
        )?;

        self.write_session(&refresh_token, &subject, &fingerprint)
            .await?;

        Ok(LoginOutput {
            subject_id: user.id,
            username: user.username,
            email: user.email,
            role: user.role,
            access_token,
            refresh_token,
            expires_in: self.config.access_token_lifetime_secs,
        })
    }

    /// Rotate a refresh token: validate the stored session against the
    /// presented fingerprint, consume the old token, and issue a new pair.
    ///
    /// Rotation is mandatory — the old token becomes unusable even while
    /// unexpired. A second use of a rotated token is indistinguishable
    /// from a stolen token being replayed, and both are rejected.
    pub async fn refresh(
        &self,
        presented: &str,
        fingerprint: Fingerprint,
    ) -> Result<RefreshOutput, AuthError> {
        if presented.is_empty() {
            return Err(AuthError::TokenRequired);
        }

        let Some(raw) = self.store_get(presented).await? else {
            warn!(
                token_prefix = %token_prefix(presented),
                "refresh token has no session record: reuse or expiry"
            );
            return Err(AuthError::InvalidOrReusedToken);
        };

        // Store corruption must not crash the caller.
        let record: SessionRecord = match serde_json::from_str(&raw) {
            Ok(record) => record,
            Err(e) => {
                error!(error = %e, "stored session record is malformed");
                return Err(AuthError::InvalidOrReusedToken);
            }
        };

        let claims = match token::verify(presented, &self.config) {
            Ok(claims) => claims,
            Err(TokenError::Invalid) => {
                warn!(
                    subject = %record.subject_id,
                    "refresh token with a live session failed verification"
                );
                return Err(AuthError::InvalidOrReusedToken);
            }
            Err(TokenError::Signing(msg)) => return Err(AuthError::Internal(msg)),
        };

        if !record.matches(&fingerprint) {
            warn!(
                subject = %record.subject_id,
                expected = ?record.fingerprint(),
                received = ?fingerprint,
                "fingerprint mismatch on refresh: possible session hijack"
            );
            return Err(AuthError::InvalidOrReusedToken);
        }

        // Rotate: write the new record before deleting the old key, so a
        // failure in between leaves both tokens briefly valid, never
        // neither.
        let new_refresh = self.issue(
            &record.subject_id,
            claims.role,
            self.config.refresh_token_lifetime_secs,
        )?;
        self.write_session(&new_refresh, &record.subject_id, &fingerprint)
            .await?;

        if let Err(e) = self.store_delete(presented).await {
            warn!(
                subject = %record.subject_id,
                error = %e,
                "failed to delete rotated refresh token; it will expire naturally"
            );
        }

        let access_token = self.issue(
            &record.subject_id,
            claims.role,
            self.config.access_token_lifetime_secs,
        )?;

        Ok(RefreshOutput {
            access_token,
            refresh_token: new_refresh,
            expires_in: self.config.access_token_lifetime_secs,
        })
    }

    /// Tear down a session.
    ///
    /// Deletes the refresh token's session record (idempotent) and
    /// blacklists the access token for its remaining validity. Never
    /// fails from the caller's perspective: store errors are logged and
    /// swallowed, since failing to blacklist is preferable to failing a
    /// user-visible logout.
    pub async fn logout(&self, access_token: Option<&str>, refresh_token: Option<&str>) {
        if let Some(refresh) = refresh_token.filter(|t| !t.is_empty()) {
            match timeout(self.store_timeout(), self.store.delete(refresh)).await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => error!(error = %e, "logout: session record delete failed"),
                Err(_) => error!("logout: session record delete timed out"),
            }
        }

        if let Some(access) = access_token.filter(|t| !t.is_empty()) {
            let ttl = self.remaining_validity(access);
            if ttl == 0 {
                return;
            }
            let key = blacklist_key(access);
            match timeout(self.store_timeout(), self.store.set(&key, "revoked", ttl)).await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => error!(error = %e, "logout: blacklist write failed"),
                Err(_) => error!("logout: blacklist write timed out"),
            }
        }
    }

    fn issue(
        &self,
        subject: &str,
        role: Option<Role>,
        ttl_secs: u64,
    ) -> Result<String, AuthError> {
        token::issue(subject, role, ttl_secs, &self.config)
            .map_err(|e| AuthError::Internal(e.to_string()))
    }

    async fn write_session(
        &self,
        refresh_token: &str,
        subject: &str,
        fingerprint: &Fingerprint,
    ) -> Result<(), AuthError> {
        let record = SessionRecord::new(subject, fingerprint);
        let value = serde_json::to_string(&record)
            .map_err(|e| AuthError::Internal(format!("session record encode: {e}")))?;
        self.store_set(
            refresh_token,
            &value,
            self.config.refresh_token_lifetime_secs,
        )
        .await
    }

    /// Seconds until the access token's natural expiry, clamped at zero.
    /// Falls back to the nominal access lifetime when the token cannot be
    /// decoded (the exact remaining time is unknown).
    fn remaining_validity(&self, access_token: &str) -> u64 {
        match token::verify(access_token, &self.config) {
            Ok(claims) => {
                let now = chrono::Utc::now().timestamp();
                claims.exp.saturating_sub(now).max(0) as u64
            }
            Err(_) => self.config.access_token_lifetime_secs,
        }
    }

    fn store_timeout(&self) -> Duration {
        Duration::from_millis(self.config.store_timeout_ms)
    }

    // Bounded store calls. A timeout is a failure of the operation, never
    // an implicit "session valid" default.
    async fn store_get(&self, key: &str) -> Result<Option<String>, AuthError> {
        match timeout(self.store_timeout(), self.store.get(key)).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(AuthError::Internal(format!("session store get: {e}"))),
            Err(_) => Err(AuthError::Internal("session store get timed out".into())),
        }
    }

    async fn store_set(&self, key: &str, value: &str, ttl_secs: u64) -> Result<(), AuthError> {
        match timeout(self.store_timeout(), self.store.set(key, value, ttl_secs)).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(AuthError::Internal(format!("session store set: {e}"))),
            Err(_) => Err(AuthError::Internal("session store set timed out".into())),
        }
    }

    async fn store_delete(&self, key: &str) -> Result<(), AuthError> {
        match timeout(self.store_timeout(), self.store.delete(key)).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(AuthError::Internal(format!("session store delete: {e}"))),
            Err(_) => Err(AuthError::Internal("session store delete timed out".into())),
        }
    }
}

/// First few characters of a token, for audit logs. Enough to correlate,
/// not enough to replay.
fn token_prefix(token: &str) -> &str {
    let end = token
        .char_indices()
        .nth(10)
        .map_or(token.len(), |(idx, _)| idx);
    &token[..end]
}

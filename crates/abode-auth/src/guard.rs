//! Access guard — per-request verification of access tokens and role
//! membership.

use std::time::Duration;

use tokio::time::timeout;

use abode_core::models::user::Role;
use abode_core::store::{SessionStore, blacklist_key};

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::token::{self, TokenError};

/// Verified identity attached to a request after authorization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub subject_id: String,
    pub role: Role,
}

/// Per-request gate over access tokens.
///
/// Checks the blacklist before anything else: a revoked token is
/// well-formed and would otherwise pass signature and expiry checks.
pub struct AccessGuard<S: SessionStore> {
    store: S,
    config: AuthConfig,
}

impl<S: SessionStore> AccessGuard<S> {
    pub fn new(store: S, config: AuthConfig) -> Self {
        Self { store, config }
    }

    /// Verify an access token and require its role to be in `allowed_roles`.
    ///
    /// On success the verified identity is returned for the caller to
    /// attach to its request context.
    pub async fn authorize(
        &self,
        access_token: Option<&str>,
        allowed_roles: &[Role],
    ) -> Result<Identity, AuthError> {
        let access_token = access_token
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::Unauthorized)?;

        if self.is_blacklisted(access_token).await? {
            return Err(AuthError::TokenInvalid);
        }

        let claims = match token::verify(access_token, &self.config) {
            Ok(claims) => claims,
            Err(TokenError::Invalid) => return Err(AuthError::Unauthorized),
            Err(TokenError::Signing(msg)) => return Err(AuthError::Internal(msg)),
        };

        // Role-gated access needs both identity claims present.
        let role = claims.role.ok_or(AuthError::Unauthorized)?;

        if !allowed_roles.contains(&role) {
            return Err(AuthError::Forbidden);
        }

        Ok(Identity {
            subject_id: claims.sub,
            role,
        })
    }

    // Fail closed: an unreachable blacklist never defaults to "not
    // revoked".
    async fn is_blacklisted(&self, access_token: &str) -> Result<bool, AuthError> {
        let key = blacklist_key(access_token);
        let store_timeout = Duration::from_millis(self.config.store_timeout_ms);
        match timeout(store_timeout, self.store.get(&key)).await {
            Ok(Ok(marker)) => Ok(marker.is_some()),
            Ok(Err(e)) => Err(AuthError::Internal(format!("blacklist get: {e}"))),
            Err(_) => Err(AuthError::Internal("blacklist get timed out".into())),
        }
    }
}

/// Pick the access token out of transport metadata.
///
/// The cookie value takes precedence over an `Authorization: Bearer`
/// header. Returns `None` when neither carries a token.
pub fn extract_token<'a>(
    cookie: Option<&'a str>,
    authorization: Option<&'a str>,
) -> Option<&'a str> {
    if let Some(value) = cookie.filter(|v| !v.is_empty()) {
        return Some(value);
    }
    authorization
        .and_then(|header| header.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

//! Signed, time-bounded identity tokens.
//!
//! Access and refresh tokens use the same HS256 signer and the same claim
//! shape; they differ only in lifetime and in which store namespace checks
//! them. They are not cryptographically distinguishable from each other —
//! see DESIGN.md for why this is flagged rather than changed.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use abode_core::models::user::Role;

use crate::config::AuthConfig;

#[derive(Debug, Error)]
pub enum TokenError {
    /// The signing key is misconfigured. Fatal configuration problem,
    /// never caused by caller input.
    #[error("signing key misconfigured: {0}")]
    Signing(String),

    /// Bad signature, malformed payload, or expiry in the past.
    #[error("invalid token")]
    Invalid,
}

/// Claims embedded in every token, access and refresh alike.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject — user ID (UUID string).
    pub sub: String,
    /// Role, when the token authorizes role-gated access.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    /// Issued-at (Unix timestamp).
    pub iat: i64,
    /// Expiration (Unix timestamp).
    pub exp: i64,
    /// Unique token ID. Guarantees two tokens minted for the same subject
    /// in the same second still differ, which rotation depends on.
    pub jti: String,
}

/// Issue a signed token for `subject_id` with the given lifetime.
pub fn issue(
    subject_id: &str,
    role: Option<Role>,
    ttl_secs: u64,
    config: &AuthConfig,
) -> Result<String, TokenError> {
    if config.jwt_secret.is_empty() {
        return Err(TokenError::Signing("empty JWT secret".into()));
    }

    let now = Utc::now().timestamp();
    let claims = TokenClaims {
        sub: subject_id.to_owned(),
        role,
        iat: now,
        exp: now + ttl_secs as i64,
        jti: Uuid::new_v4().to_string(),
    };

    let key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
    jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &key)
        .map_err(|e| TokenError::Signing(format!("JWT encode: {e}")))
}

/// Decode and verify a token's signature and expiry.
///
/// Zero leeway: a token whose expiry is in the past is invalid, full stop.
/// An empty signing secret is a configuration fault, the same as at
/// issuance — never a caller-facing rejection.
pub fn verify(token: &str, config: &AuthConfig) -> Result<TokenClaims, TokenError> {
    if config.jwt_secret.is_empty() {
        return Err(TokenError::Signing("empty JWT secret".into()));
    }

    let key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation.set_required_spec_claims(&["sub", "exp", "iat"]);

    let claims = jsonwebtoken::decode::<TokenClaims>(token, &key, &validation)
        .map_err(|_| TokenError::Invalid)?
        .claims;

    if claims.sub.is_empty() {
        return Err(TokenError::Invalid);
    }

    Ok(claims)
}

//! Authentication error taxonomy.
//!
//! This enum is the complete public error surface of the subsystem: the
//! session manager and access guard re-map every internal failure (store
//! timeouts, malformed stored records, signing errors) into one of these
//! variants before returning. `InvalidOrReusedToken` deliberately covers
//! missing, expired, malformed, and fingerprint-mismatched refresh tokens
//! alike, so the caller cannot learn which sub-check failed.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    /// No subject exists for the presented identifier.
    #[error("subject not found")]
    NotFound,

    /// The subject exists but the secret does not match.
    #[error("invalid credentials")]
    InvalidCredential,

    /// No refresh token was presented.
    #[error("refresh token required")]
    TokenRequired,

    /// The refresh token is missing from the store, expired, malformed,
    /// or bound to a different fingerprint.
    #[error("invalid or reused refresh token")]
    InvalidOrReusedToken,

    /// The access token is well-formed but has been revoked.
    #[error("token has been revoked")]
    TokenInvalid,

    /// The access token is absent or fails verification.
    #[error("unauthorized")]
    Unauthorized,

    /// The verified role is not in the allowed set.
    #[error("forbidden")]
    Forbidden,

    /// Store or codec failure unrelated to the credential itself.
    #[error("internal error: {0}")]
    Internal(String),
}

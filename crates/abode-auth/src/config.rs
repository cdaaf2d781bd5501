//! Authentication configuration.

/// Configuration for the session/token subsystem.
///
/// Constructed once at startup and passed explicitly to
/// [`SessionManager`](crate::session::SessionManager) and
/// [`AccessGuard`](crate::guard::AccessGuard) — there is no ambient global
/// signing key or store client.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Shared HS256 signing secret for both token classes.
    /// Must be non-empty; token issuance fails otherwise.
    pub jwt_secret: String,
    /// Access token lifetime in seconds (default: 3600 = 1 hour).
    pub access_token_lifetime_secs: u64,
    /// Refresh token lifetime in seconds (default: 604_800 = 7 days).
    pub refresh_token_lifetime_secs: u64,
    /// Upper bound on any single session-store call, in milliseconds
    /// (default: 2000). An elapsed timeout fails the operation closed.
    pub store_timeout_ms: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            access_token_lifetime_secs: 3_600,
            refresh_token_lifetime_secs: 604_800,
            store_timeout_ms: 2_000,
        }
    }
}

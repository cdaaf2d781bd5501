//! Session store contract.
//!
//! The store is an external key-value service (Redis in production) with
//! independent per-key TTLs. It holds two kinds of entries in one keyspace,
//! separated by namespace: raw refresh-token strings mapping to session
//! records, and `blacklist:`-prefixed access tokens mapping to revocation
//! markers.

use crate::error::AbodeResult;

/// Namespace prefix for revoked access tokens.
pub const BLACKLIST_PREFIX: &str = "blacklist:";

/// Store key for an access token's blacklist entry.
pub fn blacklist_key(access_token: &str) -> String {
    format!("{BLACKLIST_PREFIX}{access_token}")
}

/// Key-value store with per-key expiry.
///
/// All operations are potentially blocking I/O; callers are expected to
/// bound them with a timeout and fail closed on elapse.
pub trait SessionStore: Send + Sync {
    /// Fetch a value. `None` means the key is absent or has expired.
    fn get(&self, key: &str) -> impl Future<Output = AbodeResult<Option<String>>> + Send;

    /// Write a value with a TTL in seconds, replacing any existing entry.
    fn set(
        &self,
        key: &str,
        value: &str,
        ttl_secs: u64,
    ) -> impl Future<Output = AbodeResult<()>> + Send;

    /// Remove a key. Deleting an absent key is not an error.
    fn delete(&self, key: &str) -> impl Future<Output = AbodeResult<()>> + Send;
}

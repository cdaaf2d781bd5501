//! Repository trait definitions for subject resolution.
//!
//! The auth subsystem never touches relational storage directly; it
//! resolves subjects through this contract so that the session manager can
//! be exercised against an in-memory double in tests.

use crate::error::AbodeResult;
use crate::models::user::User;

pub trait UserRepository: Send + Sync {
    /// Resolve a subject by its login identifier. `None` when absent.
    fn find_by_username(
        &self,
        username: &str,
    ) -> impl Future<Output = AbodeResult<Option<User>>> + Send;
}

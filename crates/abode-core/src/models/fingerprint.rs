//! Client fingerprint — the device/user-agent/IP tuple bound to a session.

/// Per-request device fingerprint derived from transport metadata.
///
/// Empty string is a valid (if weak) value for any field, not an error.
/// Fingerprints are only ever compared for equality against a stored
/// session record; they are never persisted on their own, which is why
/// this type has no serde shape — the session record flattens the fields
/// itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fingerprint {
    pub device_id: String,
    pub user_agent: String,
    pub ip: String,
}

impl Fingerprint {
    pub fn new(
        device_id: impl Into<String>,
        user_agent: impl Into<String>,
        ip: impl Into<String>,
    ) -> Self {
        Self {
            device_id: device_id.into(),
            user_agent: user_agent.into(),
            ip: ip.into(),
        }
    }

    /// Build a fingerprint from optional transport fields.
    ///
    /// Absent fields normalize to the empty string — never to a wildcard.
    pub fn from_parts(
        device_id: Option<&str>,
        user_agent: Option<&str>,
        ip: Option<&str>,
    ) -> Self {
        Self {
            device_id: device_id.unwrap_or_default().to_owned(),
            user_agent: user_agent.unwrap_or_default().to_owned(),
            ip: ip.unwrap_or_default().to_owned(),
        }
    }
}

//! Session record — the state bound to a live refresh token.

use serde::{Deserialize, Serialize};

use crate::models::fingerprint::Fingerprint;

/// Metadata persisted in the session store, keyed by the raw refresh-token
/// string, with a TTL equal to the refresh token's remaining validity.
///
/// Wire layout is camelCase JSON: `{subjectId, deviceId, userAgent, ip}`.
/// At most one live record exists per currently-valid, unrotated refresh
/// token; a rotated or logged-out token has no record, and a lookup miss is
/// treated as reuse or expiry by the caller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub subject_id: String,
    pub device_id: String,
    pub user_agent: String,
    pub ip: String,
}

impl SessionRecord {
    pub fn new(subject_id: impl Into<String>, fingerprint: &Fingerprint) -> Self {
        Self {
            subject_id: subject_id.into(),
            device_id: fingerprint.device_id.clone(),
            user_agent: fingerprint.user_agent.clone(),
            ip: fingerprint.ip.clone(),
        }
    }

    /// The fingerprint this session was bound to at issuance.
    pub fn fingerprint(&self) -> Fingerprint {
        Fingerprint {
            device_id: self.device_id.clone(),
            user_agent: self.user_agent.clone(),
            ip: self.ip.clone(),
        }
    }

    /// Field-by-field equality against a presented fingerprint.
    pub fn matches(&self, presented: &Fingerprint) -> bool {
        self.device_id == presented.device_id
            && self.user_agent == presented.user_agent
            && self.ip == presented.ip
    }
}

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::services::status::IdentityStatus;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub authenticated: bool,
    pub ntlm_info: NtlmInfo,
    pub timestamp: String,
}

/// Raw negotiation fields; `null` when the component did not report them.
#[derive(Debug, Serialize)]
pub struct NtlmInfo {
    pub username: Option<String>,
    pub domain: Option<String>,
    pub workstation: Option<String>,
    pub provider: Option<String>,
}

impl StatusResponse {
    pub fn new(status: IdentityStatus, now: DateTime<Utc>) -> Self {
        Self {
            authenticated: status.authenticated,
            ntlm_info: NtlmInfo {
                username: status.username,
                domain: status.domain,
                workstation: status.workstation,
                provider: status.provider,
            },
            timestamp: super::timestamp(now),
        }
    }
}

//! Negotiation component seam.
//!
//! The NTLM handshake itself happens outside this service. Whatever performs it
//! (a fronting proxy, a native module) is adapted through [`Negotiator`], which
//! only reads what has already been attached to the request.
//!
//! [`ProxyHeaderNegotiator`] is the shipped adapter. It trusts identity headers
//! set by a reverse proxy that terminates NTLM, so it must only be deployed
//! behind a proxy that strips client-supplied copies of those headers.

use axum::http::HeaderMap;

use super::NegotiationResult;

pub const USER_HEADER: &str = "x-ntlm-user";
pub const DOMAIN_HEADER: &str = "x-ntlm-domain";
pub const WORKSTATION_HEADER: &str = "x-ntlm-workstation";
pub const PROVIDER_HEADER: &str = "x-ntlm-provider";

pub trait Negotiator: Send + Sync {
    /// Returns `None` when no negotiation record is attached to the request.
    fn negotiate(&self, headers: &HeaderMap) -> Option<NegotiationResult>;
}

#[derive(Debug, Clone, Default)]
pub struct ProxyHeaderNegotiator {
    default_domain: Option<String>,
}

impl ProxyHeaderNegotiator {
    pub fn new(default_domain: Option<String>) -> Self {
        Self { default_domain }
    }
}

fn header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        // Non-ASCII logon names arrive as raw UTF-8
        .and_then(|v| std::str::from_utf8(v.as_bytes()).ok())
        .map(|s| s.trim().to_string())
}

impl Negotiator for ProxyHeaderNegotiator {
    fn negotiate(&self, headers: &HeaderMap) -> Option<NegotiationResult> {
        let user = header(headers, USER_HEADER);
        let domain = header(headers, DOMAIN_HEADER);
        let workstation = header(headers, WORKSTATION_HEADER);
        let provider = header(headers, PROVIDER_HEADER);

        if user.is_none() && domain.is_none() && workstation.is_none() && provider.is_none() {
            return None;
        }

        // `DOMAIN\user` (down-level logon name) or a bare user name
        let (embedded_domain, user_name) = match user {
            Some(raw) => match raw.split_once('\\') {
                Some((d, u)) => (Some(d.to_string()), Some(u.to_string())),
                None => (None, Some(raw)),
            },
            None => (None, None),
        };

        let domain_name = domain
            .filter(|d| !d.is_empty())
            .or(embedded_domain.filter(|d| !d.is_empty()))
            .or_else(|| user_name.as_ref().and(self.default_domain.clone()));

        Some(NegotiationResult {
            user_name,
            domain_name,
            workstation,
            provider,
        })
    }
}

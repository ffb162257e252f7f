/*
 * Responsibility
 * - NegotiationResult: what the external negotiation component hands us
 * - IdentityContext: the canonical per-request identity derived from it
 *
 * Derivation never fails. "No identity" is a state, not an error; the gate
 * turns it into a 401.
 */

/// Raw record attached by the negotiation component (field names follow the
/// NTLM Type 3 message: UserName / DomainName / Workstation).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NegotiationResult {
    pub user_name: Option<String>,
    pub domain_name: Option<String>,
    pub workstation: Option<String>,
    pub provider: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NegotiationState {
    /// Nothing was attached to the request.
    Absent,
    /// Something was attached but it carries no usable username yet
    /// (handshake still in flight, or a malformed record).
    Incomplete,
    Completed,
}

/// Borrowed view of a completed identity, the only form the gate reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NegotiatedIdentity<'a> {
    pub domain: Option<&'a str>,
    pub username: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityContext {
    state: NegotiationState,
    username: Option<String>,
    domain: Option<String>,
    workstation: Option<String>,
    provider: Option<String>,
}

impl Default for IdentityContext {
    fn default() -> Self {
        Self::absent()
    }
}

fn non_empty(value: Option<&String>) -> Option<String> {
    value
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

impl IdentityContext {
    pub fn absent() -> Self {
        Self {
            state: NegotiationState::Absent,
            username: None,
            domain: None,
            workstation: None,
            provider: None,
        }
    }

    pub fn from_negotiation(result: Option<&NegotiationResult>) -> Self {
        let Some(result) = result else {
            return Self::absent();
        };

        let username = non_empty(result.user_name.as_ref());
        let state = if username.is_some() {
            NegotiationState::Completed
        } else {
            NegotiationState::Incomplete
        };

        Self {
            state,
            username,
            domain: non_empty(result.domain_name.as_ref()),
            workstation: non_empty(result.workstation.as_ref()),
            provider: non_empty(result.provider.as_ref()),
        }
    }

    pub fn state(&self) -> NegotiationState {
        self.state
    }

    pub fn negotiation_completed(&self) -> bool {
        self.state == NegotiationState::Completed
    }

    /// The identity to authorize, or `None` unless negotiation completed.
    pub fn negotiated(&self) -> Option<NegotiatedIdentity<'_>> {
        if !self.negotiation_completed() {
            return None;
        }
        let username = self.username.as_deref()?;
        Some(NegotiatedIdentity {
            domain: self.domain.as_deref(),
            username,
        })
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn domain(&self) -> Option<&str> {
        self.domain.as_deref()
    }

    pub fn workstation(&self) -> Option<&str> {
        self.workstation.as_deref()
    }

    pub fn provider(&self) -> Option<&str> {
        self.provider.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(user: Option<&str>, domain: Option<&str>) -> NegotiationResult {
        NegotiationResult {
            user_name: user.map(str::to_string),
            domain_name: domain.map(str::to_string),
            workstation: Some("TESTPC".into()),
            provider: Some("NTLM".into()),
        }
    }

    #[test]
    fn nothing_attached_is_absent() {
        let ctx = IdentityContext::from_negotiation(None);
        assert_eq!(ctx.state(), NegotiationState::Absent);
        assert!(!ctx.negotiation_completed());
        assert!(ctx.negotiated().is_none());
        assert_eq!(ctx, IdentityContext::default());
    }

    #[test]
    fn username_completes_negotiation() {
        let ctx = IdentityContext::from_negotiation(Some(&result(Some("user1"), Some("TESTDOMAIN"))));
        assert!(ctx.negotiation_completed());
        assert_eq!(
            ctx.negotiated(),
            Some(NegotiatedIdentity {
                domain: Some("TESTDOMAIN"),
                username: "user1",
            })
        );
        assert_eq!(ctx.workstation(), Some("TESTPC"));
    }

    #[test]
    fn missing_or_blank_username_is_incomplete() {
        for user in [None, Some(""), Some("   ")] {
            let ctx = IdentityContext::from_negotiation(Some(&result(user, Some("TESTDOMAIN"))));
            assert_eq!(ctx.state(), NegotiationState::Incomplete);
            assert!(ctx.negotiated().is_none());
            assert_eq!(ctx.username(), None);
            // raw informational fields are still visible for diagnostics
            assert_eq!(ctx.domain(), Some("TESTDOMAIN"));
            assert_eq!(ctx.provider(), Some("NTLM"));
        }
    }

    #[test]
    fn blank_domain_is_dropped() {
        let ctx = IdentityContext::from_negotiation(Some(&result(Some("user1"), Some(" "))));
        assert_eq!(ctx.negotiated().unwrap().domain, None);
    }
}

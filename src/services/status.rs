/*
 * Responsibility
 * - Read-only projection of an IdentityContext for the introspection endpoint
 * - Never consults the authorization gate
 */
use crate::services::identity::{IdentityContext, NegotiationState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityStatus {
    pub authenticated: bool,
    pub negotiation: NegotiationState,
    pub username: Option<String>,
    pub domain: Option<String>,
    pub workstation: Option<String>,
    pub provider: Option<String>,
}

impl IdentityStatus {
    pub fn project(identity: &IdentityContext) -> Self {
        Self {
            authenticated: identity.negotiation_completed(),
            negotiation: identity.state(),
            username: identity.username().map(str::to_string),
            domain: identity.domain().map(str::to_string),
            workstation: identity.workstation().map(str::to_string),
            provider: identity.provider().map(str::to_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::identity::NegotiationResult;

    #[test]
    fn absent_identity_projects_to_nulls() {
        let status = IdentityStatus::project(&IdentityContext::absent());
        assert_eq!(
            status,
            IdentityStatus {
                authenticated: false,
                negotiation: NegotiationState::Absent,
                username: None,
                domain: None,
                workstation: None,
                provider: None,
            }
        );
    }

    #[test]
    fn in_progress_negotiation_is_distinguishable_from_absent() {
        let identity = IdentityContext::from_negotiation(Some(&NegotiationResult {
            provider: Some("NTLM".into()),
            ..Default::default()
        }));
        let status = IdentityStatus::project(&identity);

        assert!(!status.authenticated);
        assert_eq!(status.negotiation, NegotiationState::Incomplete);
        assert_eq!(status.provider.as_deref(), Some("NTLM"));
    }

    #[test]
    fn completed_identity_is_reported_verbatim() {
        let identity = IdentityContext::from_negotiation(Some(&NegotiationResult {
            user_name: Some("User1".into()),
            domain_name: Some("TESTDOMAIN".into()),
            workstation: Some("TESTPC".into()),
            provider: Some("Negotiate".into()),
        }));
        let status = IdentityStatus::project(&identity);

        assert!(status.authenticated);
        assert_eq!(status.username.as_deref(), Some("User1"));
        assert_eq!(status.domain.as_deref(), Some("TESTDOMAIN"));
        assert_eq!(status.workstation.as_deref(), Some("TESTPC"));
    }
}

//! Authorization gate: negotiated identity + principal registry → decision.
//!
//! `evaluate` is pure and never fails. A request without a completed
//! negotiation is denied before the registry is consulted.

use std::sync::Arc;

use crate::services::identity::IdentityContext;

use super::principal::{Principal, PrincipalKey, PrincipalStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Allow,
    DenyUnauthenticated,
    DenyUnauthorized,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorizationDecision {
    /// `principal` is the matched registry entry, with its declared spelling.
    Allow {
        normalized_key: PrincipalKey,
        principal: Principal,
    },
    DenyUnauthenticated,
    DenyUnauthorized {
        normalized_key: PrincipalKey,
        candidates: Vec<PrincipalKey>,
    },
}

impl AuthorizationDecision {
    pub fn outcome(&self) -> Outcome {
        match self {
            Self::Allow { .. } => Outcome::Allow,
            Self::DenyUnauthenticated => Outcome::DenyUnauthenticated,
            Self::DenyUnauthorized { .. } => Outcome::DenyUnauthorized,
        }
    }

    pub fn normalized_key(&self) -> Option<&PrincipalKey> {
        match self {
            Self::Allow { normalized_key, .. } | Self::DenyUnauthorized { normalized_key, .. } => {
                Some(normalized_key)
            }
            Self::DenyUnauthenticated => None,
        }
    }
}

pub fn evaluate<S>(identity: &IdentityContext, store: &S) -> AuthorizationDecision
where
    S: PrincipalStore + ?Sized,
{
    let Some(negotiated) = identity.negotiated() else {
        return AuthorizationDecision::DenyUnauthenticated;
    };

    let normalized_key = PrincipalKey::new(negotiated.domain.unwrap_or(""), negotiated.username);

    match store.find(&normalized_key) {
        Some(principal) => AuthorizationDecision::Allow {
            principal: principal.clone(),
            normalized_key,
        },
        None => AuthorizationDecision::DenyUnauthorized {
            candidates: store.keys(),
            normalized_key,
        },
    }
}

/// Shared handle to the registry the gate evaluates against.
#[derive(Clone)]
pub struct AuthorizationGate {
    store: Arc<dyn PrincipalStore>,
}

impl AuthorizationGate {
    pub fn new(store: Arc<dyn PrincipalStore>) -> Self {
        Self { store }
    }

    pub fn evaluate(&self, identity: &IdentityContext) -> AuthorizationDecision {
        evaluate(identity, self.store.as_ref())
    }

    /// Canonical keys of every authorized principal.
    pub fn authorized_keys(&self) -> Vec<PrincipalKey> {
        self.store.keys()
    }
}

impl std::fmt::Debug for AuthorizationGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthorizationGate")
            .field("principals", &self.store.keys().len())
            .finish()
    }
}

/*
 * Responsibility
 * - Shared context attached to the Router (AppState)
 *   - gate: AuthorizationGate over the startup registry
 *   - negotiator: adapter for the external NTLM negotiation component
 * - Cheap to clone (Arc inside)
 */
use std::sync::Arc;

use crate::config::Config;
use crate::services::authz::AuthorizationGate;
use crate::services::identity::{Negotiator, ProxyHeaderNegotiator};

#[derive(Clone)]
pub struct AppState {
    pub gate: AuthorizationGate,
    pub negotiator: Arc<dyn Negotiator>,
    pub expose_authorized_users: bool,
}

impl AppState {
    pub fn new(
        gate: AuthorizationGate,
        negotiator: Arc<dyn Negotiator>,
        expose_authorized_users: bool,
    ) -> Self {
        Self {
            gate,
            negotiator,
            expose_authorized_users,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let gate = AuthorizationGate::new(Arc::new(config.registry.clone()));
        let negotiator = Arc::new(ProxyHeaderNegotiator::new(config.ntlm_domain.clone()));
        Self::new(gate, negotiator, config.expose_authorized_users)
    }
}

//! AuthorizationGate on protected routes → AuthCtx in extensions
//!
//! Reads the IdentityContext left by the negotiation middleware and evaluates
//! it against the principal registry.
//! - Allow: AuthCtx (matched principal, declared spelling) goes into extensions
//! - DenyUnauthenticated: 401
//! - DenyUnauthorized: 403 with the checked key (and the registry, if exposed)

use axum::{
    Router,
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
};

use crate::api::extractors::AuthCtx;
use crate::error::AppError;
use crate::services::authz::AuthorizationDecision;
use crate::services::identity::IdentityContext;
use crate::state::AppState;

/// Puts the gate in front of every route of `router`.
///
/// ```ignore
/// let protected = Router::new().route("/protected", get(protected));
/// let protected = middleware::auth::access::apply(protected, state.clone());
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // route_layer: unmatched paths fall through to 404 instead of 401
    router.route_layer(middleware::from_fn_with_state(state, access_middleware))
}

async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    // Missing means the negotiation layer was not applied; same as no identity.
    let identity = req
        .extensions()
        .get::<IdentityContext>()
        .cloned()
        .unwrap_or_default();

    let decision = state.gate.evaluate(&identity);
    tracing::debug!(
        outcome = ?decision.outcome(),
        key = ?decision.normalized_key().map(|k| k.as_str()),
        "authorization gate evaluated"
    );

    let auth_ctx = match decision {
        AuthorizationDecision::Allow { principal, .. } => {
            AuthCtx::new(principal.username, principal.domain)
        }
        AuthorizationDecision::DenyUnauthenticated => {
            tracing::warn!(
                negotiation = ?identity.state(),
                path = %req.uri().path(),
                "no completed NTLM identity"
            );
            return Err(AppError::Unauthenticated);
        }
        AuthorizationDecision::DenyUnauthorized {
            normalized_key,
            candidates,
        } => {
            tracing::warn!(user = %normalized_key, "user not in authorized registry");
            return Err(AppError::Forbidden {
                received_user: normalized_key,
                authorized_users: state.expose_authorized_users.then_some(candidates),
            });
        }
    };

    req.extensions_mut().insert(auth_ctx);

    Ok(next.run(req).await)
}

//! Negotiation result → IdentityContext in request extensions.
//!
//! Runs on every route (public ones included) so handlers and the gate read the
//! same per-request identity. Never rejects: an absent or half-finished
//! negotiation is stored as such and left to the gate.

use axum::{
    Router,
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
};

use crate::services::identity::IdentityContext;
use crate::state::AppState;

pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    router.layer(middleware::from_fn_with_state(state, negotiation_middleware))
}

async fn negotiation_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let negotiated = state.negotiator.negotiate(req.headers());
    let identity = IdentityContext::from_negotiation(negotiated.as_ref());

    tracing::trace!(state = ?identity.state(), "identity context attached");

    req.extensions_mut().insert(identity);
    next.run(req).await
}

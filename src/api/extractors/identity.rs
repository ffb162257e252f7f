/*
 * Responsibility
 * - Hand the per-request IdentityContext to handlers that do not go through
 *   the gate (/api/status)
 * - Never rejects: no context in extensions reads as "no identity"
 */
use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::services::identity::IdentityContext;

pub struct Identity(pub IdentityContext);

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Identity(
            parts
                .extensions
                .get::<IdentityContext>()
                .cloned()
                .unwrap_or_default(),
        ))
    }
}

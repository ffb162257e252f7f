/*
 * Responsibility
 * - GET /api/status (no auth)
 * - Reports what the negotiation component attached, without authorizing it
 */
use axum::Json;
use chrono::Utc;

use crate::api::{dto::status::StatusResponse, extractors::Identity};
use crate::services::status::IdentityStatus;

pub async fn status(Identity(identity): Identity) -> Json<StatusResponse> {
    let status = IdentityStatus::project(&identity);
    tracing::debug!(negotiation = ?status.negotiation, "status requested");

    Json(StatusResponse::new(status, Utc::now()))
}

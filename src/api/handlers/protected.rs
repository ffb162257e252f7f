/*
 * Responsibility
 * - GET /api/protected
 * - Only reachable through the access middleware (gate already said Allow)
 */
use axum::Json;
use chrono::Utc;

use crate::api::{dto::protected::ProtectedResponse, extractors::AuthCtxExtractor};

pub async fn protected(AuthCtxExtractor(ctx): AuthCtxExtractor) -> Json<ProtectedResponse> {
    Json(ProtectedResponse::new(ctx, Utc::now()))
}

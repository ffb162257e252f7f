/*
 * Responsibility
 * - GET /api/test-users (no auth)
 * - Lists the registry keys a tester can negotiate as
 */
use axum::{Json, extract::State};

use crate::api::dto::test_users::TestUsersResponse;
use crate::state::AppState;

pub async fn test_users(State(state): State<AppState>) -> Json<TestUsersResponse> {
    Json(TestUsersResponse::new(state.gate.authorized_keys()))
}

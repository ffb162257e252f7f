/*
 * Responsibility
 * - URL layout under /api
 * - Which routes sit behind the authorization gate (only /protected)
 */
use axum::{Router, routing::get};

use crate::api::handlers::{protected::protected, status::status, test_users::test_users};
use crate::middleware;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    let gated = Router::new().route("/protected", get(protected));
    let gated = middleware::auth::access::apply(gated, state);

    Router::new()
        .route("/status", get(status))
        .route("/test-users", get(test_users))
        .merge(gated)
}

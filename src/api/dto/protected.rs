use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::api::extractors::AuthCtx;

const GRANTED_MESSAGE: &str = "Access granted to protected resource";
const SECRET_MESSAGE: &str = "This is protected data only authenticated users can see";

#[derive(Debug, Serialize)]
pub struct ProtectedResponse {
    pub message: &'static str,
    pub user: AuthenticatedUser,
    pub data: ProtectedData,
}

#[derive(Debug, Serialize)]
pub struct AuthenticatedUser {
    pub username: String,
    pub domain: String,
    pub authenticated: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtectedData {
    pub secret_message: &'static str,
    pub timestamp: String,
}

impl ProtectedResponse {
    pub fn new(ctx: AuthCtx, now: DateTime<Utc>) -> Self {
        Self {
            message: GRANTED_MESSAGE,
            user: AuthenticatedUser {
                username: ctx.username,
                domain: ctx.domain,
                authenticated: true,
            },
            data: ProtectedData {
                secret_message: SECRET_MESSAGE,
                timestamp: super::timestamp(now),
            },
        }
    }
}

/*
 * Responsibility
 * - Request-level AppError definition
 * - IntoResponse: status code + the JSON error bodies clients already depend on
 *   (401 / 403)
 */
use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::services::authz::PrincipalKey;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("NTLM authentication required")]
    Unauthenticated,
    #[error("User not authorized")]
    Forbidden {
        received_user: PrincipalKey,
        // None when the deployment hides the registry
        authorized_users: Option<Vec<PrincipalKey>>,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    received_user: Option<PrincipalKey>,
    #[serde(skip_serializing_if = "Option::is_none")]
    authorized_users: Option<Vec<PrincipalKey>>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let error = self.to_string();
        let (status, body) = match self {
            AppError::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                ErrorResponse {
                    error,
                    received_user: None,
                    authorized_users: None,
                },
            ),
            AppError::Forbidden {
                received_user,
                authorized_users,
            } => (
                StatusCode::FORBIDDEN,
                ErrorResponse {
                    error,
                    received_user: Some(received_user),
                    authorized_users,
                },
            ),
        };

        let mut response = (status, Json(body)).into_response();
        if status == StatusCode::UNAUTHORIZED {
            // Prompts the client (or fronting proxy) to (re)start the handshake
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("NTLM"));
        }
        response
    }
}

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::domains::auth::store::StoreError;

/// Errors surfaced by the login flow
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("{0}")]
    InvalidRequest(String),

    #[error("failed to create user profile, try again later")]
    UpstreamUnavailable,

    #[error("token signing failed: {0}")]
    TokenSigning(#[from] jsonwebtoken::errors::Error),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = match &self {
            AuthError::InvalidRequest(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AuthError::UpstreamUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            AuthError::TokenSigning(_) | AuthError::Store(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        // Internal failures get a generic body; the cause stays in the logs.
        let detail = match &self {
            AuthError::TokenSigning(e) => {
                tracing::error!(error = %e, "token signing failed");
                "internal server error".to_string()
            }
            AuthError::Store(e) => {
                tracing::error!(error = %e, "credential store failure");
                "internal server error".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

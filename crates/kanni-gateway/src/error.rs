//! HTTP error surface and startup errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use kanni_core::error::{ClientCode, KanniError};

/// `KanniError` rendered as `{"error": {"code", "message"}}`.
#[derive(Debug)]
pub struct ApiError(pub KanniError);

impl From<KanniError> for ApiError {
    fn from(e: KanniError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.0.client_code();
        let status = match code {
            ClientCode::BadRequest | ClientCode::UnsupportedVersion => StatusCode::BAD_REQUEST,
            ClientCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        } else {
            tracing::debug!(error = %self.0, "request rejected");
        }

        let body = json!({
            "error": {
                "code": code.as_str(),
                "message": self.0.to_string(),
            }
        });
        (status, Json(body)).into_response()
    }
}

/// Errors that stop the gateway from starting or serving.
#[derive(Debug, Error)]
pub enum BootError {
    #[error("config: {0}")]
    Config(#[from] KanniError),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

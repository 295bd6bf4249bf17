use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Every variant renders as `{"error": "<message>"}`. Provider and internal
/// failures all collapse to 500 with their display text as the message.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("{0}")]
    BadRequest(String),

    #[error("Payload too large")]
    PayloadTooLarge,

    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error("{0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Llm(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        match &self {
            AppError::Llm(LlmError::Api { status, message }) => {
                tracing::error!("LLM error: upstream status {status}: {message}")
            }
            AppError::Llm(e) => tracing::error!("LLM error: {e}"),
            AppError::Internal(e) => tracing::error!("Internal error: {e:?}"),
            _ => {}
        }

        let body = Json(json!({ "error": self.to_string() }));

        (status, body).into_response()
    }
}

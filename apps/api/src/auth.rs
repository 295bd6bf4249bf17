//! Static bearer-token check for the agent endpoint.

use axum::http::{header, HeaderMap};

use crate::errors::AppError;

const BEARER_PREFIX: &str = "Bearer ";

/// Verifies the `Authorization` header against the shared secret.
///
/// No secret configured means every request is allowed. Otherwise the header
/// must be exactly `Bearer <secret>`: case-sensitive, no trimming.
pub fn authorize(headers: &HeaderMap, secret: Option<&str>) -> Result<(), AppError> {
    let Some(secret) = secret else {
        return Ok(());
    };

    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix(BEARER_PREFIX));

    match token {
        Some(token) if token == secret => Ok(()),
        _ => Err(AppError::Unauthorized),
    }
}

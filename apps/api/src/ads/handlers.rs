//! Axum route handler for the ads agent endpoint.

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::{HeaderMap, Method, StatusCode},
    Json,
};
use tracing::info;

use crate::ads::models::{parse_body, AgentMode, AgentResponse, NegativesRequest, RsaRequest};
use crate::ads::negatives::suggest_negatives;
use crate::ads::rsa::write_rsa_copy;
use crate::auth::authorize;
use crate::errors::AppError;
use crate::state::AppState;

/// ANY /api/ads-agent-llm
///
/// Method check, then bearer check, then dispatch on `mode`. The body is
/// taken as raw bytes and its rejection is only reported after the first two
/// checks, so an oversized or unreadable body never masks a 405 or 401.
pub async fn handle_ads_agent(
    State(state): State<AppState>,
    method: Method,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<AgentResponse>, AppError> {
    if method != Method::POST {
        return Err(AppError::MethodNotAllowed);
    }

    authorize(&headers, state.config.internal_bearer.as_deref())?;

    let body = body.map_err(body_rejection)?;
    let body = parse_body(&body)?;
    let mode = AgentMode::from_body(&body)
        .ok_or_else(|| AppError::BadRequest("Unknown mode".to_string()))?;

    info!("Ads agent request: mode={mode:?}");

    let response = match mode {
        AgentMode::Negatives => {
            let request = NegativesRequest::from_body(&body);
            AgentResponse::Negatives(suggest_negatives(state.llm.as_ref(), &request).await?)
        }
        AgentMode::Rsa => {
            let request = RsaRequest::from_body(&body);
            AgentResponse::Rsa(write_rsa_copy(state.llm.as_ref(), &request).await?)
        }
    };

    Ok(Json(response))
}

fn body_rejection(rejection: BytesRejection) -> AppError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge
    } else {
        AppError::BadRequest(rejection.body_text())
    }
}

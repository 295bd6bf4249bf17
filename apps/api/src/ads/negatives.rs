//! Negative-keyword flow: search-term report in, negative suggestions and themes out.

use tracing::info;

use crate::ads::models::NegativesRequest;
use crate::ads::prompts::{NEGATIVES_PROMPT_TEMPLATE, NEGATIVES_SYSTEM};
use crate::ads::sanitize::{sanitize_negatives, truncate_chars, NegativesOutput};
use crate::errors::AppError;
use crate::llm_client::prompts::{fill_template, json_system};
use crate::llm_client::CompletionProvider;

/// Serialized search-term data is cut to this many characters before it goes
/// into the prompt.
pub const MAX_SEARCH_TERM_CHARS: usize = 15_000;

/// Builds the prompt, calls the model once and sanitizes its reply.
pub async fn suggest_negatives(
    llm: &dyn CompletionProvider,
    request: &NegativesRequest,
) -> Result<NegativesOutput, AppError> {
    let prompt = build_negatives_prompt(request)?;
    let system = json_system(NEGATIVES_SYSTEM);

    let reply = llm.chat_json(&system, &prompt).await?;
    let output = sanitize_negatives(&reply);

    info!(
        "Negatives flow returned {} suggestions and {} themes",
        output.negatives.len(),
        output.themes.len()
    );

    Ok(output)
}

fn build_negatives_prompt(request: &NegativesRequest) -> Result<String, AppError> {
    let search_terms = serde_json::to_string(&request.search_terms)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize search terms: {e}")))?;

    Ok(fill_template(
        NEGATIVES_PROMPT_TEMPLATE,
        &[
            ("brand_terms", request.brand_terms.as_str()),
            ("always_neg", request.always_neg.as_str()),
            (
                "search_terms",
                truncate_chars(&search_terms, MAX_SEARCH_TERM_CHARS),
            ),
        ],
    ))
}

//! Responsive-search-ad flow: brand, USPs and landing pages in, ad copy per URL out.

use tracing::info;

use crate::ads::models::RsaRequest;
use crate::ads::prompts::{RSA_PROMPT_TEMPLATE, RSA_SYSTEM_TEMPLATE};
use crate::ads::sanitize::{
    sanitize_rsa, RsaOutput, DESCRIPTION_MAX_CHARS, HEADLINE_MAX_CHARS, MAX_DESCRIPTIONS,
    MAX_HEADLINES,
};
use crate::errors::AppError;
use crate::llm_client::prompts::{fill_template, json_system};
use crate::llm_client::CompletionProvider;

/// Builds the prompt, calls the model once and sanitizes its reply.
pub async fn write_rsa_copy(
    llm: &dyn CompletionProvider,
    request: &RsaRequest,
) -> Result<RsaOutput, AppError> {
    let system = json_system(&fill_template(
        RSA_SYSTEM_TEMPLATE,
        &[("language", request.language.as_str())],
    ));
    let prompt = build_rsa_prompt(request);

    let reply = llm.chat_json(&system, &prompt).await?;
    let output = sanitize_rsa(&reply);

    info!(
        "RSA flow returned {} ad items for {} landing URLs",
        output.items.len(),
        request.landing_urls.len()
    );

    Ok(output)
}

fn build_rsa_prompt(request: &RsaRequest) -> String {
    fill_template(
        RSA_PROMPT_TEMPLATE,
        &[
            ("max_headlines", MAX_HEADLINES.to_string().as_str()),
            ("headline_chars", HEADLINE_MAX_CHARS.to_string().as_str()),
            ("max_descriptions", MAX_DESCRIPTIONS.to_string().as_str()),
            ("description_chars", DESCRIPTION_MAX_CHARS.to_string().as_str()),
            ("brand", request.brand.as_str()),
            ("usps", request.usps.join(" | ").as_str()),
            ("landing_urls", request.landing_urls.join(", ").as_str()),
        ],
    )
}

// Prompt templates for the ads agent flows.
// Placeholders in `{braces}` are filled by the flow that owns the template.

/// Role line of the negative-keyword system prompt.
pub const NEGATIVES_SYSTEM: &str = "You are a senior Google Ads strategist. \
    Output strict JSON: {\"negatives\":[...], \"themes\":[...]}.";

/// Negative-keyword prompt.
/// Replace: {brand_terms}, {always_neg}, {search_terms}
pub const NEGATIVES_PROMPT_TEMPLATE: &str = r#"Rules:
- NEVER suggest brand terms as negatives (brandProtected: {brand_terms}).
- ALWAYS suggest terms that match the "alwaysNeg" phrase (alwaysNeg: {always_neg}).
- Suggest as NEGATIVE any term with zero conversions combined with a high cost per click and/or a very low CTR.
- For every suggestion return: { "campaignId": "...", "adGroupId": "...", "term": "...", "match": "PHRASE|EXACT", "reason": "..." }
- Also return "themes": [{"name": "...", "examples": ["..."], "insight": "..."}]

Search term performance data (most recent rows):
{search_terms}"#;

/// Role line of the ad-copy system prompt.
/// Replace: {language}
pub const RSA_SYSTEM_TEMPLATE: &str =
    "You write high-performing Responsive Search Ads in {language}. Output JSON strictly.";

/// Ad-copy prompt.
/// Replace: {brand}, {usps}, {landing_urls}, {max_headlines}, {headline_chars},
///          {max_descriptions}, {description_chars}
pub const RSA_PROMPT_TEMPLATE: &str = r#"Brand: {brand}
USPs: {usps}
Landing URLs: {landing_urls}

Produce one JSON object per URL:
{
  "url": "...",
  "theme": "...",
  "headlines": ["<={headline_chars} characters", ... ({max_headlines} items)],
  "descriptions": ["<={description_chars} characters", ... ({max_descriptions} items)],
  "pinHints": "(optional) H1/H2 pin suggestions"
}
Answer: {"items": [...]}"#;

// Ads agent: one endpoint, two flows (negative keywords, responsive search ad copy).
// All model calls go through llm_client; replies are always passed through sanitize.

pub mod handlers;
pub mod models;
pub mod negatives;
pub mod prompts;
pub mod rsa;
pub mod sanitize;

//! Inbound request shapes for the ads agent endpoint.
//!
//! The body is read leniently: the upstream tool sends loosely-typed JSON, so
//! fields are pulled out of a `serde_json::Value` with defaults rather than
//! deserialized strictly.

use serde::Serialize;
use serde_json::{json, Value};

use crate::ads::sanitize::{string_list, NegativesOutput, RsaOutput};
use crate::errors::AppError;

pub const DEFAULT_BRAND: &str = "Brand";
pub const DEFAULT_AD_LANGUAGE: &str = "Turkish";

/// Which flow a request runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentMode {
    Negatives,
    Rsa,
}

impl AgentMode {
    /// Reads `mode` from the body. Missing, non-string or unknown values give `None`.
    pub fn from_body(body: &Value) -> Option<Self> {
        match body.get("mode").and_then(Value::as_str)? {
            "negatives" => Some(AgentMode::Negatives),
            "rsa" => Some(AgentMode::Rsa),
            _ => None,
        }
    }
}

/// Inputs of the negative-keyword flow.
#[derive(Debug, Clone, PartialEq)]
pub struct NegativesRequest {
    /// Brand terms that must never be suggested as negatives.
    pub brand_terms: String,
    /// Phrase whose matches must always be suggested.
    pub always_neg: String,
    /// Search-term performance rows, forwarded to the model as-is.
    pub search_terms: Value,
}

impl NegativesRequest {
    /// `brandProtected` and `brandTermsProtected` are aliases; the first
    /// non-empty one wins.
    pub fn from_body(body: &Value) -> Self {
        let brand_terms = text_input(body.get("brandProtected"))
            .or_else(|| text_input(body.get("brandTermsProtected")))
            .unwrap_or_default();

        let search_terms = body
            .get("data")
            .and_then(|d| d.get("searchTerms"))
            .filter(|v| !v.is_null())
            .cloned()
            .unwrap_or_else(|| json!([]));

        Self {
            brand_terms,
            always_neg: text_input(body.get("alwaysNeg")).unwrap_or_default(),
            search_terms,
        }
    }
}

/// Inputs of the responsive-search-ad flow.
#[derive(Debug, Clone, PartialEq)]
pub struct RsaRequest {
    pub brand: String,
    pub usps: Vec<String>,
    pub landing_urls: Vec<String>,
    /// Language the ad copy is written in.
    pub language: String,
}

impl RsaRequest {
    pub fn from_body(body: &Value) -> Self {
        let data = body.get("data");
        let field = |name: &str| data.and_then(|d| d.get(name));

        Self {
            brand: text_input(field("brand")).unwrap_or_else(|| DEFAULT_BRAND.to_string()),
            usps: string_list(field("usps")),
            landing_urls: string_list(field("landingUrls")),
            language: text_input(field("language"))
                .unwrap_or_else(|| DEFAULT_AD_LANGUAGE.to_string()),
        }
    }
}

/// Success body: whichever flow ran, serialized without a wrapper.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum AgentResponse {
    Negatives(NegativesOutput),
    Rsa(RsaOutput),
}

/// Parses the raw request body. An empty body counts as `{}`.
pub fn parse_body(bytes: &[u8]) -> Result<Value, AppError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(json!({}));
    }

    serde_json::from_slice(bytes).map_err(|e| {
        tracing::debug!("Rejecting unparseable request body: {e}");
        AppError::BadRequest("Invalid JSON body".to_string())
    })
}

/// A free-text input given either as a string or as a list of strings.
/// Empty values count as absent.
fn text_input(value: Option<&Value>) -> Option<String> {
    let text = match value? {
        Value::String(s) => s.trim().to_string(),
        Value::Array(_) => string_list(value)
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        _ => return None,
    };

    (!text.is_empty()).then_some(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parsing() {
        assert_eq!(
            AgentMode::from_body(&json!({"mode": "negatives"})),
            Some(AgentMode::Negatives)
        );
        assert_eq!(AgentMode::from_body(&json!({"mode": "rsa"})), Some(AgentMode::Rsa));
        assert_eq!(AgentMode::from_body(&json!({"mode": "RSA"})), None);
        assert_eq!(AgentMode::from_body(&json!({"mode": 1})), None);
        assert_eq!(AgentMode::from_body(&json!({})), None);
        assert_eq!(AgentMode::from_body(&json!(["rsa"])), None);
    }

    #[test]
    fn test_brand_aliases_are_equivalent() {
        let primary = NegativesRequest::from_body(&json!({"brandProtected": "acme"}));
        let alias = NegativesRequest::from_body(&json!({"brandTermsProtected": "acme"}));
        assert_eq!(primary.brand_terms, "acme");
        assert_eq!(alias.brand_terms, "acme");
    }

    #[test]
    fn test_empty_primary_brand_falls_back_to_alias() {
        let request = NegativesRequest::from_body(&json!({
            "brandProtected": "",
            "brandTermsProtected": ["acme", "acme shop"]
        }));
        assert_eq!(request.brand_terms, "acme, acme shop");
    }

    #[test]
    fn test_negatives_defaults() {
        let request = NegativesRequest::from_body(&json!({"mode": "negatives"}));
        assert_eq!(request.brand_terms, "");
        assert_eq!(request.always_neg, "");
        assert_eq!(request.search_terms, json!([]));
    }

    #[test]
    fn test_search_terms_are_forwarded_untouched() {
        let rows = json!([{"term": "free acme", "clicks": 12, "conversions": 0, "cost": 8.5}]);
        let request = NegativesRequest::from_body(&json!({"data": {"searchTerms": rows}}));
        assert_eq!(request.search_terms, rows);
    }

    #[test]
    fn test_rsa_request_fields() {
        let request = RsaRequest::from_body(&json!({
            "mode": "rsa",
            "data": {
                "brand": "Acme",
                "usps": ["Fast", null, 24],
                "landingUrls": ["https://a.co", "https://a.co/b"]
            }
        }));
        assert_eq!(request.brand, "Acme");
        assert_eq!(request.usps, vec!["Fast", "24"]);
        assert_eq!(request.landing_urls, vec!["https://a.co", "https://a.co/b"]);
        assert_eq!(request.language, DEFAULT_AD_LANGUAGE);
    }

    #[test]
    fn test_rsa_request_defaults() {
        let request = RsaRequest::from_body(&json!({"mode": "rsa", "data": {"usps": "Fast"}}));
        assert_eq!(request.brand, DEFAULT_BRAND);
        assert!(request.usps.is_empty());
        assert!(request.landing_urls.is_empty());
    }

    #[test]
    fn test_parse_body() {
        assert_eq!(parse_body(b"").unwrap(), json!({}));
        assert_eq!(parse_body(b"  \n").unwrap(), json!({}));
        assert_eq!(parse_body(br#"{"mode":"rsa"}"#).unwrap(), json!({"mode": "rsa"}));
        assert!(matches!(
            parse_body(b"{mode: rsa"),
            Err(AppError::BadRequest(_))
        ));
    }
}

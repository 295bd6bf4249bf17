//! Sanitization of untrusted model replies.
//!
//! The model's JSON is never passed through as-is. Every reply is coerced into
//! the typed output contract here: wrong-typed fields fall back to defaults,
//! malformed entries are dropped and every list and string is clipped to its cap.
//! Nothing in this module fails.

use serde::Serialize;
use serde_json::Value;

pub const MAX_NEGATIVES: usize = 200;
pub const MAX_THEMES: usize = 50;
pub const MAX_RSA_ITEMS: usize = 30;
pub const MAX_HEADLINES: usize = 10;
pub const HEADLINE_MAX_CHARS: usize = 30;
pub const MAX_DESCRIPTIONS: usize = 4;
pub const DESCRIPTION_MAX_CHARS: usize = 90;

// ────────────────────────────────────────────────────────────────────────────
// Output contracts
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MatchType {
    Phrase,
    Exact,
}

impl MatchType {
    /// `EXACT` in any case is exact; everything else is phrase match.
    fn from_value(value: Option<&Value>) -> Self {
        match value.map(scalar_text) {
            Some(text) if text.trim().eq_ignore_ascii_case("exact") => MatchType::Exact,
            _ => MatchType::Phrase,
        }
    }
}

/// A single negative keyword suggestion.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NegativeKeyword {
    pub campaign_id: String,
    pub ad_group_id: String,
    pub term: String,
    #[serde(rename = "match")]
    pub match_type: MatchType,
    pub reason: String,
}

/// A cluster of related search terms the model noticed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Theme {
    pub name: String,
    pub examples: Vec<String>,
    pub insight: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NegativesOutput {
    pub negatives: Vec<NegativeKeyword>,
    pub themes: Vec<Theme>,
}

/// Ad copy for one landing page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RsaItem {
    pub url: String,
    pub theme: String,
    pub headlines: Vec<String>,
    pub descriptions: Vec<String>,
    pub pin_hints: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RsaOutput {
    pub items: Vec<RsaItem>,
}

// ────────────────────────────────────────────────────────────────────────────
// Sanitizers
// ────────────────────────────────────────────────────────────────────────────

pub fn sanitize_negatives(reply: &Value) -> NegativesOutput {
    let negatives = array_items(reply.get("negatives"))
        .filter_map(negative_keyword)
        .take(MAX_NEGATIVES)
        .collect();

    let themes = array_items(reply.get("themes"))
        .filter_map(theme)
        .take(MAX_THEMES)
        .collect();

    NegativesOutput { negatives, themes }
}

pub fn sanitize_rsa(reply: &Value) -> RsaOutput {
    let items = array_items(reply.get("items"))
        .filter_map(rsa_item)
        .take(MAX_RSA_ITEMS)
        .collect();

    RsaOutput { items }
}

fn negative_keyword(value: &Value) -> Option<NegativeKeyword> {
    let entry = value.as_object()?;
    let term = field_text(entry.get("term"));
    if term.trim().is_empty() {
        return None;
    }

    Some(NegativeKeyword {
        campaign_id: field_text(entry.get("campaignId")),
        ad_group_id: field_text(entry.get("adGroupId")),
        term,
        match_type: MatchType::from_value(entry.get("match")),
        reason: field_text(entry.get("reason")),
    })
}

fn theme(value: &Value) -> Option<Theme> {
    let entry = value.as_object()?;
    let name = field_text(entry.get("name"));
    if name.trim().is_empty() {
        return None;
    }

    Some(Theme {
        name,
        examples: string_list(entry.get("examples")),
        insight: field_text(entry.get("insight")),
    })
}

fn rsa_item(value: &Value) -> Option<RsaItem> {
    let entry = value.as_object()?;

    Some(RsaItem {
        url: field_text(entry.get("url")),
        theme: field_text(entry.get("theme")),
        headlines: clipped_list(
            entry.get("headlines"),
            MAX_HEADLINES,
            HEADLINE_MAX_CHARS,
        ),
        descriptions: clipped_list(
            entry.get("descriptions"),
            MAX_DESCRIPTIONS,
            DESCRIPTION_MAX_CHARS,
        ),
        pin_hints: field_text(entry.get("pinHints")),
    })
}

fn clipped_list(value: Option<&Value>, max_len: usize, max_chars: usize) -> Vec<String> {
    string_list(value)
        .into_iter()
        .take(max_len)
        .map(|s| truncate_chars(&s, max_chars).to_string())
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Value coercion helpers (shared with request parsing)
// ────────────────────────────────────────────────────────────────────────────

fn array_items(value: Option<&Value>) -> impl Iterator<Item = &Value> {
    value
        .and_then(Value::as_array)
        .into_iter()
        .flat_map(|items| items.iter())
}

/// Renders any JSON value as display text. Arrays join with `,`.
pub fn scalar_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items.iter().map(scalar_text).collect::<Vec<_>>().join(","),
        Value::Object(_) => value.to_string(),
    }
}

/// Text of an optional field; absent means empty.
pub fn field_text(value: Option<&Value>) -> String {
    value.map(scalar_text).unwrap_or_default()
}

/// A list of strings from an optional JSON array. Non-arrays give an empty
/// list and null entries are skipped.
pub fn string_list(value: Option<&Value>) -> Vec<String> {
    array_items(value)
        .filter(|v| !v.is_null())
        .map(scalar_text)
        .collect()
}

/// Prefix of `text` holding at most `max_chars` characters.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

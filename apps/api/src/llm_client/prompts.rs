// Shared prompt fragments. Each flow defines its own templates alongside it;
// this file holds what they have in common.

/// Appended to every system prompt. JSON mode already forces an object; this
/// keeps the model from wrapping it in prose or fences.
pub const JSON_ONLY_SUFFIX: &str = "You MUST respond with a single valid JSON object only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// Joins a flow-specific system prompt with the JSON-only suffix.
pub fn json_system(role: &str) -> String {
    format!("{role} {JSON_ONLY_SUFFIX}")
}

/// Fills `{key}` placeholders in a single left-to-right pass.
///
/// Substituted values are never rescanned, so caller text that happens to
/// contain a placeholder is inserted literally. Braces that do not form a
/// known placeholder are kept as-is.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];

        let placeholder = values.iter().find_map(|(key, value)| {
            let after = tail.strip_prefix('{')?.strip_prefix(*key)?.strip_prefix('}')?;
            Some((*value, after))
        });

        match placeholder {
            Some((value, after)) => {
                out.push_str(value);
                rest = after;
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

//! Extraction of tool-call envelopes from free-form model text.
//!
//! Two stages: best-effort location of the first balanced `{...}` substring
//! (code fences and surrounding prose tolerated), then a parse that requires
//! a string `tool` field. Any failure means the text is a final answer, not
//! an envelope.

use regex::Regex;
use serde_json::{Map, Value};
use std::sync::OnceLock;

#[derive(Debug, Clone, PartialEq)]
pub struct ToolCallEnvelope {
    pub tool: String,
    pub args: Map<String, Value>,
}

fn tool_key() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#""tool"\s*:\s*""#).expect("valid regex"))
}

pub fn extract(text: &str) -> Option<ToolCallEnvelope> {
    // Cheap pre-filter: without a "tool" key there is nothing to parse.
    if !tool_key().is_match(text) {
        return None;
    }

    let candidate = fenced_block(text).unwrap_or(text);
    let object = first_balanced_object(candidate)?;
    let value: Value = serde_json::from_str(object).ok()?;
    let map = value.as_object()?;
    let tool = map.get("tool")?.as_str()?.to_string();
    let args = map
        .get("args")
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default();
    Some(ToolCallEnvelope { tool, args })
}

/// Body of the first ```-fenced block, with an optional language tag stripped.
fn fenced_block(text: &str) -> Option<&str> {
    let start = text.find("```")?;
    let after_fence = &text[start + 3..];
    let body_start = after_fence.find('\n').map(|i| i + 1).unwrap_or(0);
    let body = &after_fence[body_start..];
    let end = body.find("```")?;
    Some(&body[..end])
}

/// First balanced `{...}` substring, respecting JSON string literals.
fn first_balanced_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for (offset, c) in text[start..].char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' if in_string => escaped = true,
            '"' => in_string = !in_string,
            '{' if !in_string => depth += 1,
            '}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bare_envelope_parses() {
        let envelope = extract(r#"{"tool":"find_device","args":{"search_term":"core"}}"#).unwrap();
        assert_eq!(envelope.tool, "find_device");
        assert_eq!(envelope.args.get("search_term"), Some(&json!("core")));
    }

    #[test]
    fn fenced_envelope_with_prose_parses() {
        let text = "I will look that up.\n```json\n{\"tool\": \"scan_subnet\", \"args\": {\"cidr\": \"10.0.1.0/24\"}}\n```\nOne moment.";
        let envelope = extract(text).unwrap();
        assert_eq!(envelope.tool, "scan_subnet");
    }

    #[test]
    fn plain_prose_is_not_an_envelope() {
        assert!(extract("The core switch is healthy; CPU sits at 14%.").is_none());
        assert!(extract("").is_none());
    }

    #[test]
    fn object_without_tool_field_is_final_answer() {
        assert!(extract(r#"{"device": "core-01", "status": "ONLINE"}"#).is_none());
    }

    #[test]
    fn braces_inside_strings_do_not_unbalance() {
        let text = r#"{"tool":"execute_cli_command","args":{"device_id":"core-01","command":"show run | include {vlan}"}}"#;
        let envelope = extract(text).unwrap();
        assert_eq!(
            envelope.args.get("command"),
            Some(&json!("show run | include {vlan}"))
        );
    }

    #[test]
    fn missing_args_defaults_to_empty_map() {
        let envelope = extract(r#"{"tool":"find_device"}"#).unwrap();
        assert!(envelope.args.is_empty());
    }
}

//! Robust JSON extraction from LLM text output.
//!
//! Models rarely return pure JSON: they wrap it in a fenced code block,
//! prefix it with commentary, or trail it with explanation. This tries a
//! sequence of progressively more permissive strategies and returns the
//! first one that parses.

use serde_json::Value;

/// Extract a JSON value from free-form model output.
pub fn extract_json(text: &str) -> Option<Value> {
    let trimmed = text.trim();

    if let Ok(value) = serde_json::from_str(trimmed) {
        return Some(value);
    }

    if let Some(value) = from_fenced_block(trimmed) {
        return Some(value);
    }

    if let Some(value) = from_balanced_braces(trimmed) {
        return Some(value);
    }

    from_prefix_trim(trimmed)
}

fn from_fenced_block(text: &str) -> Option<Value> {
    let start_marker = text.find("```")?;
    let after_marker = &text[start_marker + 3..];
    let after_lang = after_marker.strip_prefix("json").unwrap_or(after_marker);
    let end = after_lang.find("```")?;
    let candidate = after_lang[..end].trim();
    serde_json::from_str(candidate).ok()
}

/// Scan for the first `{` and its matching `}`, respecting string
/// escaping, and try to parse what's between them.
fn from_balanced_braces(text: &str) -> Option<Value> {
    let bytes = text.as_bytes();
    let start = text.find('{')?;

    let mut depth = 0i32;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, &byte) in bytes[start..].iter().enumerate() {
        let ch = byte as char;
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    let end = start + offset + 1;
                    return serde_json::from_str(&text[start..end]).ok();
                }
            }
            _ => {}
        }
    }
    None
}

/// Last resort: trim everything before the first `{` and try to parse the
/// remainder directly (covers trailing commentary that isn't otherwise
/// balanced, e.g. a truncated response).
fn from_prefix_trim(text: &str) -> Option<Value> {
    let start = text.find('{')?;
    serde_json::from_str(&text[start..]).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_pure_json() {
        let value = extract_json(r#"{"next_state": "idle"}"#).unwrap();
        assert_eq!(value["next_state"], "idle");
    }

    #[test]
    fn parses_fenced_json() {
        let text = "Here you go:\n```json\n{\"next_state\": \"resting\"}\n```\nHope that helps.";
        let value = extract_json(text).unwrap();
        assert_eq!(value["next_state"], "resting");
    }

    #[test]
    fn parses_from_balanced_braces_with_trailing_text() {
        let text = r#"Sure, {"next_state": "scrolling"} is my choice because..."#;
        let value = extract_json(text).unwrap();
        assert_eq!(value["next_state"], "scrolling");
    }

    #[test]
    fn balanced_scan_respects_braces_inside_strings() {
        let text = r#"{"next_state": "idle", "note": "looks like a } brace"}"#;
        let value = extract_json(text).unwrap();
        assert_eq!(value["next_state"], "idle");
        assert_eq!(value["note"], "looks like a } brace");
    }

    #[test]
    fn returns_none_for_non_json_text() {
        assert!(extract_json("I'm not sure what to do here.").is_none());
    }
}

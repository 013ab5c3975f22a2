//! JSON recovery for unreliable model output
//!
//! The generation model is asked for JSON-only output but routinely wraps
//! it in markdown fences, prose, comments, or trailing commas. Recovery is
//! a cascade of pure text stages, each attempted only when the previous
//! one fails: strict parse, fence stripping, balanced-brace extraction,
//! then a heuristic repair pass followed by the same three stages again.

use serde_json::Value;
use thiserror::Error;

use crate::models::Itinerary;

/// Model output that survived no recovery stage
#[derive(Debug, Error)]
#[error("Unrecoverable model output: {message}")]
pub struct ParseFailure {
    pub message: String,
    /// The final repair attempt, kept for the diagnostic artifact
    pub best_attempt: String,
}

/// Run the full cascade and deserialize into an [`Itinerary`]
pub fn parse_itinerary(raw: &str) -> Result<Itinerary, ParseFailure> {
    let value = match recover_value(raw) {
        Some(value) => value,
        None => {
            let repaired = repair_common_defects(raw);
            match recover_value(&repaired) {
                Some(value) => value,
                None => {
                    return Err(ParseFailure {
                        message: "no JSON value could be recovered".to_string(),
                        best_attempt: repaired,
                    });
                }
            }
        }
    };

    serde_json::from_value(value.clone()).map_err(|e| ParseFailure {
        message: format!("recovered JSON does not match the itinerary shape: {e}"),
        best_attempt: serde_json::to_string_pretty(&value).unwrap_or_else(|_| raw.to_string()),
    })
}

/// Stages 1-3: strict parse, fence stripping, braced-block extraction
fn recover_value(text: &str) -> Option<Value> {
    if let Ok(value) = serde_json::from_str(text) {
        return Some(value);
    }

    if let Some(stripped) = strip_code_fences(text) {
        if let Ok(value) = serde_json::from_str(&stripped) {
            return Some(value);
        }
    }

    if let Some(block) = extract_braced_block(text) {
        if let Ok(value) = serde_json::from_str(block) {
            return Some(value);
        }
    }

    None
}

/// Remove a leading ```/```json fence line and a trailing ``` fence.
/// Returns `None` when no leading fence is present.
fn strip_code_fences(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if !trimmed.starts_with("```") {
        return None;
    }

    // Drop the fence line itself; its info string ("json", "JSON") varies
    let body = match trimmed.find('\n') {
        Some(newline) => &trimmed[newline + 1..],
        None => return None,
    };

    let body = body.trim_end();
    let body = body.strip_suffix("```").unwrap_or(body);
    Some(body.trim().to_string())
}

/// Slice from the first `{` to its balanced closing `}`.
///
/// Best-effort by design: braces inside string literals are counted too,
/// which is acceptable for the itinerary payloads this sees.
fn extract_braced_block(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    for (offset, c) in text[start..].char_indices() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(&text[start..=start + offset]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Stage 4: scrub the defects models most often introduce
fn repair_common_defects(text: &str) -> String {
    let without_blocks = strip_block_comments(text);
    let without_lines = strip_line_comments(&without_blocks);
    let without_doubles = collapse_doubled_commas(&without_lines);
    remove_trailing_commas(&without_doubles)
}

fn strip_block_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(open) = rest.find("/*") {
        out.push_str(&rest[..open]);
        match rest[open + 2..].find("*/") {
            Some(close) => rest = &rest[open + 2 + close + 2..],
            None => return out,
        }
    }
    out.push_str(rest);
    out
}

/// Strip `//` comments line by line; lines carrying a URL (`://`) are left
/// alone rather than mangled.
fn strip_line_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for (index, line) in text.lines().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        if line.contains("://") {
            out.push_str(line);
        } else if let Some(comment) = line.find("//") {
            out.push_str(line[..comment].trim_end());
        } else {
            out.push_str(line);
        }
    }
    out
}

fn collapse_doubled_commas(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last_significant = ' ';
    for c in text.chars() {
        if c == ',' && last_significant == ',' {
            continue;
        }
        if !c.is_whitespace() {
            last_significant = c;
        }
        out.push(c);
    }
    out
}

/// Drop commas whose next significant character closes an object or array
fn remove_trailing_commas(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    for (index, &c) in chars.iter().enumerate() {
        if c == ',' {
            let next = chars[index + 1..].iter().find(|ch| !ch.is_whitespace());
            if matches!(next, Some('}') | Some(']')) {
                continue;
            }
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_strict_json_passes_through() {
        let itinerary = parse_itinerary(r#"{"destination": "Paris", "days": []}"#).unwrap();
        assert_eq!(itinerary.destination, "Paris");
    }

    #[rstest]
    #[case("```json\n{\"destination\": \"Rome\"}\n```")]
    #[case("```JSON\n{\"destination\": \"Rome\"}\n```")]
    #[case("```\n{\"destination\": \"Rome\"}\n```")]
    fn test_fenced_output_is_recovered(#[case] raw: &str) {
        let itinerary = parse_itinerary(raw).unwrap();
        assert_eq!(itinerary.destination, "Rome");
    }

    #[test]
    fn test_prose_around_object_is_recovered() {
        let raw = "Here is your itinerary!\n{\"destination\": \"Kyoto\", \"days\": []}\nEnjoy!";
        let itinerary = parse_itinerary(raw).unwrap();
        assert_eq!(itinerary.destination, "Kyoto");
    }

    #[test]
    fn test_trailing_commas_are_repaired() {
        let raw = r#"{"destination": "Lisbon", "days": [],}"#;
        let itinerary = parse_itinerary(raw).unwrap();
        assert_eq!(itinerary.destination, "Lisbon");
    }

    #[test]
    fn test_comments_are_stripped_but_urls_survive() {
        let raw = "{\n// model commentary\n\"destination\": \"Oslo\", /* note */ \"days\": []\n}";
        let itinerary = parse_itinerary(raw).unwrap();
        assert_eq!(itinerary.destination, "Oslo");

        let with_url = strip_line_comments("\"site\": \"https://example.com\" // trailing");
        assert!(with_url.contains("https://example.com"));
    }

    #[test]
    fn test_doubled_commas_are_collapsed() {
        let raw = r#"{"destination": "Bern",, "days": []}"#;
        let itinerary = parse_itinerary(raw).unwrap();
        assert_eq!(itinerary.destination, "Bern");
    }

    #[test]
    fn test_unrecoverable_text_fails_with_attempt() {
        let err = parse_itinerary("not json at all").unwrap_err();
        assert!(err.message.contains("no JSON value"));
        assert!(!err.best_attempt.is_empty());
    }

    #[test]
    fn test_shape_mismatch_is_a_parse_failure() {
        let err = parse_itinerary(r#"{"days": 42}"#).unwrap_err();
        assert!(err.message.contains("itinerary shape"));
    }

    #[test]
    fn test_extract_braced_block_balances() {
        let text = "x {\"a\": {\"b\": 1}} y";
        assert_eq!(extract_braced_block(text), Some("{\"a\": {\"b\": 1}}"));
        assert_eq!(extract_braced_block("no braces"), None);
        assert_eq!(extract_braced_block("{never closed"), None);
    }
}

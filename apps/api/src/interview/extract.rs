//! Response Extractor: pulls a JSON payload out of free-form model output.
//!
//! The model may wrap its JSON in prose or code fences, so location is
//! lenient: fenced blocks are tried first, then every balanced `{…}` / `[…]`
//! span in reading order. Parsing is strict: a candidate must be valid JSON,
//! and for typed extraction it must also match the target schema.

use serde::de::{DeserializeOwned, Error as _};
use serde_json::Value;
use thiserror::Error;

/// Length of the raw-text prefix carried in diagnostics.
pub const PREVIEW_CHARS: usize = 200;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("no JSON value found in response")]
    NoJson,

    #[error("JSON syntax error: {0}")]
    Syntax(#[source] serde_json::Error),

    #[error("JSON does not match expected shape: {0}")]
    Schema(#[source] serde_json::Error),
}

/// Which top-level JSON values may stand in for the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    Any,
    Object,
}

/// Extracts the first JSON value that deserializes into `T`.
///
/// A candidate that parses but does not fit `T` is skipped whole; values
/// nested inside it are not tried on their own.
pub fn extract<T: DeserializeOwned>(text: &str) -> Result<T, ExtractionError> {
    extract_shaped(text, Shape::Any)
}

/// Like [`extract`], but only JSON objects are candidates.
///
/// Serde lets structs deserialize from arrays too, so a prose list such as
/// `[true, "why?", 30]` would otherwise pass for a struct payload.
pub fn extract_object<T: DeserializeOwned>(text: &str) -> Result<T, ExtractionError> {
    extract_shaped(text, Shape::Object)
}

fn extract_shaped<T: DeserializeOwned>(text: &str, shape: Shape) -> Result<T, ExtractionError> {
    let mut syntax_error = None;
    let mut schema_error = None;

    for body in fenced_blocks(text) {
        match try_candidate::<T>(body.trim(), shape) {
            Ok(value) => return Ok(value),
            Err(e) => record(e, &mut syntax_error, &mut schema_error),
        }
    }

    let bytes = text.as_bytes();
    let mut pos = 0;
    while pos < bytes.len() {
        let Some(offset) = bytes[pos..].iter().position(|&b| b == b'{' || b == b'[') else {
            break;
        };
        let start = pos + offset;
        let Some(end) = balanced_end(bytes, start) else {
            pos = start + 1;
            continue;
        };

        match try_candidate::<T>(&text[start..end], shape) {
            Ok(value) => return Ok(value),
            Err(e @ ExtractionError::Schema(_)) => {
                record(e, &mut syntax_error, &mut schema_error);
                pos = end;
            }
            Err(e) => {
                record(e, &mut syntax_error, &mut schema_error);
                pos = start + 1;
            }
        }
    }

    Err(schema_error.or(syntax_error).unwrap_or(ExtractionError::NoJson))
}

/// First `PREVIEW_CHARS` characters of `text`, for error messages.
pub fn preview(text: &str) -> String {
    text.chars().take(PREVIEW_CHARS).collect()
}

fn try_candidate<T: DeserializeOwned>(candidate: &str, shape: Shape) -> Result<T, ExtractionError> {
    let value: Value = serde_json::from_str(candidate).map_err(ExtractionError::Syntax)?;
    if shape == Shape::Object && !value.is_object() {
        return Err(ExtractionError::Schema(serde_json::Error::custom(
            "expected a JSON object",
        )));
    }
    serde_json::from_value(value).map_err(ExtractionError::Schema)
}

fn record(
    error: ExtractionError,
    syntax_error: &mut Option<ExtractionError>,
    schema_error: &mut Option<ExtractionError>,
) {
    let slot = match error {
        ExtractionError::Schema(_) => schema_error,
        _ => syntax_error,
    };
    if slot.is_none() {
        *slot = Some(error);
    }
}

/// Bodies of ``` fenced blocks, with any info string (`json`, `JSON`, …) dropped.
fn fenced_blocks(text: &str) -> Vec<&str> {
    let mut blocks = Vec::new();
    let mut rest = text;

    while let Some(open) = rest.find("```") {
        let after_fence = &rest[open + 3..];
        // The info string runs to the end of the opening line.
        let body_start = after_fence.find('\n').map(|nl| nl + 1).unwrap_or(0);
        let body = &after_fence[body_start..];
        let Some(close) = body.find("```") else {
            break;
        };
        blocks.push(&body[..close]);
        rest = &body[close + 3..];
    }

    blocks
}

/// Byte index one past the bracket that closes the container opened at `start`.
///
/// Brackets inside string literals are ignored. Returns `None` for mismatched
/// or unterminated containers.
fn balanced_end(bytes: &[u8], start: usize) -> Option<usize> {
    let mut expected: Vec<u8> = Vec::new();
    let mut in_string = false;
    let mut escaped = false;

    for (offset, &b) in bytes[start..].iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }

        match b {
            b'"' => in_string = true,
            b'{' => expected.push(b'}'),
            b'[' => expected.push(b']'),
            b'}' | b']' => {
                if expected.pop() != Some(b) {
                    return None;
                }
                if expected.is_empty() {
                    return Some(start + offset + 1);
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
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Flag {
        has_followup: bool,
    }

    fn extract_json(text: &str) -> Result<Value, ExtractionError> {
        extract(text)
    }

    #[test]
    fn test_fenced_block_inside_noise() {
        let text = "noise ```json\n[1,2,3]\n``` more noise";
        assert_eq!(extract_json(text).unwrap(), json!([1, 2, 3]));
    }

    #[test]
    fn test_bare_array_without_fence() {
        let text = "Here you go: [1,2,3] hope that helps";
        assert_eq!(extract_json(text).unwrap(), json!([1, 2, 3]));
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let text = "noise ```json\n[1,2,3]\n``` more noise";
        let first = extract_json(text).unwrap();
        let again = extract_json(&first.to_string()).unwrap();
        assert_eq!(first, again);
    }

    #[test]
    fn test_untagged_fence() {
        let text = "```\n{\"a\": 1}\n```";
        assert_eq!(extract_json(text).unwrap(), json!({"a": 1}));
    }

    #[test]
    fn test_brackets_inside_strings_do_not_unbalance() {
        let text = r#"Result: {"note": "use ] and } freely", "escaped": "quote \" ]"} trailing"#;
        let value = extract_json(text).unwrap();
        assert_eq!(value["note"], "use ] and } freely");
        assert_eq!(value["escaped"], "quote \" ]");
    }

    #[test]
    fn test_skips_prose_brackets_that_are_not_json() {
        let text = "I picked [the best ones] below:\n{\"has_followup\": false}";
        assert_eq!(
            extract::<Flag>(text).unwrap(),
            Flag {
                has_followup: false
            }
        );
    }

    #[test]
    fn test_typed_extraction_skips_wrong_shape() {
        let text = "See [1] for details. {\"has_followup\": true}";
        assert_eq!(extract::<Flag>(text).unwrap(), Flag { has_followup: true });
    }

    #[test]
    fn test_nested_values_of_mismatched_candidate_are_not_tried() {
        let text = r#"{"outer": {"has_followup": true}}"#;
        assert!(matches!(
            extract::<Flag>(text),
            Err(ExtractionError::Schema(_))
        ));
    }

    #[test]
    fn test_no_json_at_all() {
        assert!(matches!(
            extract_json("I'm sorry, I can't help with that."),
            Err(ExtractionError::NoJson)
        ));
    }

    #[test]
    fn test_near_miss_syntax_is_a_syntax_error() {
        let text = "{\"has_followup\": true,}";
        assert!(matches!(
            extract::<Flag>(text),
            Err(ExtractionError::Syntax(_))
        ));
    }

    #[test]
    fn test_unterminated_container_is_no_json() {
        assert!(matches!(
            extract_json("[1, 2, 3"),
            Err(ExtractionError::NoJson)
        ));
    }

    #[test]
    fn test_fence_preferred_over_earlier_bare_value() {
        let text = "Draft: {\"has_followup\": true}\n```json\n{\"has_followup\": false}\n```";
        assert_eq!(
            extract::<Flag>(text).unwrap(),
            Flag {
                has_followup: false
            }
        );
    }

    #[test]
    fn test_struct_accepts_array_unless_objects_only() {
        let text = "Options: [true] or {\"has_followup\": false}";
        assert_eq!(extract::<Flag>(text).unwrap(), Flag { has_followup: true });
        assert_eq!(
            extract_object::<Flag>(text).unwrap(),
            Flag {
                has_followup: false
            }
        );
    }

    #[test]
    fn test_objects_only_rejects_lone_array() {
        assert!(matches!(
            extract_object::<Flag>("```json\n[true]\n```"),
            Err(ExtractionError::Schema(_))
        ));
    }

    #[test]
    fn test_preview_truncates_on_char_boundary() {
        let text = "é".repeat(PREVIEW_CHARS + 50);
        assert_eq!(preview(&text).chars().count(), PREVIEW_CHARS);
    }
}

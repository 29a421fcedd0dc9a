//! Best-effort recovery of JSON from model output.
//!
//! Models wrap JSON in code fences, prefix it with prose, or leave trailing
//! commas. Output cut off at the token limit is not completed: a value that
//! never closes is reported as malformed.

use serde_json::Value;

use super::LlmError;

/// Parses model output as JSON, repairing the common failure shapes.
pub fn parse_json_lenient(text: &str) -> Result<Value, LlmError> {
    let text = strip_json_fences(text);
    if text.is_empty() {
        return Err(LlmError::EmptyContent);
    }

    if let Ok(value) = serde_json::from_str(text) {
        return Ok(value);
    }

    let mut last_error: Option<String> = None;
    let mut from = 0;
    while let Some(found) = text[from..].find(['{', '[']) {
        let start = from + found;
        match scan_json(&text[start..]) {
            Scan::Balanced(slice) => match parse_candidate(slice) {
                Ok(value) => return Ok(value),
                Err(e) => last_error = Some(e.to_string()),
            },
            Scan::Mismatched => {
                last_error = Some(format!("mismatched brackets at offset {start}"));
            }
            Scan::Unterminated => {
                return Err(LlmError::Malformed(format!(
                    "response ended before the JSON value starting at offset {start} was closed"
                )));
            }
        }
        from = start + 1;
    }

    Err(LlmError::Malformed(last_error.unwrap_or_else(|| {
        "no JSON object or array found in response".to_string()
    })))
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim())
    } else {
        text
    }
}

fn parse_candidate(slice: &str) -> Result<Value, serde_json::Error> {
    serde_json::from_str(slice).or_else(|_| serde_json::from_str(&remove_trailing_commas(slice)))
}

#[derive(Debug, PartialEq)]
enum Scan<'a> {
    /// A complete value, from the opening bracket to its matching close.
    Balanced(&'a str),
    /// A closing bracket that does not match the innermost open one.
    Mismatched,
    /// Text ended while a string or bracket was still open.
    Unterminated,
}

/// Walks from the opening `{` or `[` at the start of `body` to its matching
/// close, string and escape aware.
fn scan_json(body: &str) -> Scan<'_> {
    let mut stack: Vec<char> = Vec::new();
    let mut in_string = false;
    let mut escaped = false;

    for (offset, c) in body.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match c {
            '"' => in_string = true,
            '{' => stack.push('}'),
            '[' => stack.push(']'),
            '}' | ']' => {
                if stack.pop() != Some(c) {
                    return Scan::Mismatched;
                }
                if stack.is_empty() {
                    return Scan::Balanced(&body[..offset + c.len_utf8()]);
                }
            }
            _ => {}
        }
    }

    Scan::Unterminated
}

/// Drops commas that directly precede a closing `}` or `]` outside of strings.
fn remove_trailing_commas(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut in_string = false;
    let mut escaped = false;

    for (i, &c) in chars.iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            out.push(c);
            continue;
        }

        if c == '"' {
            in_string = true;
        } else if c == ',' {
            let next = chars[i + 1..].iter().find(|n| !n.is_whitespace());
            if matches!(next, Some('}') | Some(']')) {
                continue;
            }
        }
        out.push(c);
    }

    out
}

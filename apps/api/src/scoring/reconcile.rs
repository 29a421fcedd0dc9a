//! Maps model JSON back onto the submitted resumes.
//!
//! Invariant: every function here returns exactly one `ScoredResume` per input,
//! reports the input's own data URI, and keeps scores inside 0 – 100.

use serde_json::{Map, Value};
use tracing::warn;

use crate::media::short_label;
use crate::scoring::{ResumeInput, ScoredResume};

pub const INCOMPLETE_SINGLE_REASON: &str = "AI response was incomplete or malformed.";
pub const NOT_AN_ARRAY_REASON: &str = "AI response for batch was not a valid array or was empty.";
pub const BATCH_MISMATCH_REASON: &str =
    "AI response for this resume in batch was incomplete, malformed, or URI mismatch.";

const ID_KEYS: &[&str] = &["resume_id", "resumeId"];
const URI_KEYS: &[&str] = &["resume_data_uri", "resumeDataUri"];

/// Reads `score` as a rounded, clamped 0 – 100 integer.
/// Accepts JSON numbers and numeric strings; rejects NaN and infinities.
pub fn read_score(item: &Value) -> Option<u8> {
    let raw = match item.get("score")? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().trim_end_matches('%').trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if !raw.is_finite() {
        return None;
    }
    Some(raw.round().clamp(0.0, 100.0) as u8)
}

pub fn read_reason(item: &Value) -> Option<String> {
    item.get("reason")?.as_str().map(str::to_string)
}

/// Reconciles the response to a single-resume call.
pub fn reconcile_single(resume: &ResumeInput, output: Value) -> ScoredResume {
    // A one-element array is accepted in place of the object.
    let item = match output {
        Value::Array(mut items) if !items.is_empty() => items.swap_remove(0),
        other => other,
    };

    match (read_score(&item), read_reason(&item)) {
        (Some(score), Some(reason)) => resume.scored(score, reason),
        (score, reason) => {
            warn!(
                "Invalid or incomplete AI response for single resume {}: {}",
                short_label(&resume.uri),
                preview(&item)
            );
            resume.scored(
                score.unwrap_or(0),
                reason.unwrap_or_else(|| INCOMPLETE_SINGLE_REASON.to_string()),
            )
        }
    }
}

/// Reconciles the response to a batch call against the chunk that was sent.
pub fn reconcile_batch(chunk: &[ResumeInput], output: Value) -> Vec<ScoredResume> {
    let Some(items) = as_result_array(output, chunk.len()) else {
        warn!(
            "AI response for batch was not a valid array. Input count: {}",
            chunk.len()
        );
        return chunk.iter().map(|r| r.fallback(NOT_AN_ARRAY_REASON)).collect();
    };

    if items.len() != chunk.len() {
        warn!(
            "AI returned {} items for a batch of {} resumes. Results were mapped by identifier.",
            items.len(),
            chunk.len()
        );
    }

    chunk
        .iter()
        .map(|resume| {
            let found = items.iter().find(|item| matches_resume(item, resume));
            match found.map(|item| (read_score(item), read_reason(item))) {
                Some((Some(score), Some(reason))) => resume.scored(score, reason),
                _ => {
                    warn!(
                        "Missing or invalid fields for {} ({}) in batch; found: {}",
                        resume.label,
                        short_label(&resume.uri),
                        found.map(preview).unwrap_or_else(|| "nothing".to_string())
                    );
                    resume.fallback(BATCH_MISMATCH_REASON)
                }
            }
        })
        .collect()
}

/// Normalizes batch output into a non-empty list of result objects.
///
/// Accepts a bare array, an object wrapping exactly one array field
/// (`{"results": [...]}`), or a lone result object when one resume was sent.
fn as_result_array(output: Value, expected: usize) -> Option<Vec<Value>> {
    let items = match output {
        Value::Array(items) => items,
        Value::Object(map) => unwrap_object(map, expected)?,
        _ => return None,
    };
    if items.is_empty() {
        None
    } else {
        Some(items)
    }
}

fn unwrap_object(map: Map<String, Value>, expected: usize) -> Option<Vec<Value>> {
    let mut arrays = map.values().filter(|v| v.is_array());
    if let (Some(Value::Array(items)), None) = (arrays.next(), arrays.next()) {
        return Some(items.clone());
    }
    if expected == 1 && map.contains_key("score") {
        return Some(vec![Value::Object(map)]);
    }
    None
}

/// Exact string match on the echoed identifier or the echoed data URI.
fn matches_resume(item: &Value, resume: &ResumeInput) -> bool {
    let field_equals = |keys: &[&str], expected: &str| {
        keys.iter()
            .filter_map(|k| item.get(*k).and_then(Value::as_str))
            .any(|v| v == expected)
    };
    field_equals(ID_KEYS, &resume.label) || field_equals(URI_KEYS, &resume.uri)
}

/// Compact, length-bounded rendering of a model value for log lines.
fn preview(value: &Value) -> String {
    let rendered = value.to_string();
    short_label(&rendered)
}

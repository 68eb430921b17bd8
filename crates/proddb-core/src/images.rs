//! Image-list field parsing.
//!
//! The `images` column arrives in several shapes: a single-quoted JSON-like
//! array, an array with a trailing comma, or a bare comma-separated list.
//! The strict branch handles the first two after cleanup; everything else
//! falls through to the lenient splitter. Strict is always attempted first,
//! never the other way around.

use serde_json::Value;
use tracing::debug;

/// Parse a raw image-list field into URLs.
///
/// Absent or blank input is an empty list, never an error. A strict-parse
/// failure silently selects the lenient branch.
pub fn parse_images(raw: Option<&str>) -> Vec<String> {
    let raw = match raw {
        Some(s) if !s.trim().is_empty() => s.trim(),
        _ => return Vec::new(),
    };

    let cleaned = cleanup_list_text(raw);
    if cleaned.starts_with('[') {
        match serde_json::from_str::<Value>(&cleaned) {
            Ok(Value::Array(items)) => {
                return items
                    .iter()
                    .map(element_text)
                    .map(|url| url.trim().to_string())
                    .filter(|url| !url.is_empty())
                    .collect();
            }
            Ok(other) => return vec![element_text(&other).trim().to_string()],
            Err(e) => debug!("strict image-list parse failed ({e}), using comma split"),
        }
    }
    lenient_split(raw)
}

/// Cleanup before the strict attempt: single quotes become double quotes,
/// then one trailing comma before the final `]` and one at string end are
/// dropped.
fn cleanup_list_text(raw: &str) -> String {
    let mut cleaned = raw.replace('\'', "\"");
    if let Some(inner) = cleaned.strip_suffix(']') {
        let inner = inner.trim_end();
        let inner = inner.strip_suffix(',').unwrap_or(inner);
        cleaned = format!("{inner}]");
    }
    let trimmed = cleaned.trim_end();
    let trimmed = trimmed.strip_suffix(',').unwrap_or(trimmed);
    trimmed.to_string()
}

fn element_text(value: &Value) -> String {
    match value {
        Value::String(url) => url.clone(),
        other => other.to_string(),
    }
}

/// Comma-split fallback for text the strict branch rejects: trim each
/// piece, strip stray quote characters, drop empty or quote-only pieces.
fn lenient_split(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|piece| piece.replace(['\'', '"'], ""))
        .map(|piece| piece.trim().to_string())
        .filter(|piece| !piece.is_empty())
        .collect()
}

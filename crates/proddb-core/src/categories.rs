//! Category extraction and dataset-level stats.
//!
//! Both functions are pure over the record slice they are handed: nothing is
//! cached, so a changed snapshot is reflected on the next call.

use std::collections::{HashMap, HashSet};

use serde_json::Value;

use crate::types::{CatalogStats, ProductRecord};

/// Upper bound on the extracted category set.
pub const MAX_CATEGORIES: usize = 10;

/// Derive the deduplicated, order-stable category labels for a snapshot.
///
/// Per record the raw text gets a quote-normalized strict array parse with a
/// comma-split fallback; the flattened labels are deduplicated in first-seen
/// order, empties dropped, and the sequence capped at [`MAX_CATEGORIES`].
pub fn extract_categories(records: &[ProductRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut labels = Vec::new();
    for raw in records.iter().filter_map(|r| r.categories.as_deref()) {
        for label in split_category_field(raw) {
            let label = label.trim().to_string();
            if label.is_empty() || !seen.insert(label.clone()) {
                continue;
            }
            labels.push(label);
        }
    }
    labels.truncate(MAX_CATEGORIES);
    labels
}

/// Strict quoted-array parse with comma-split fallback for one record's
/// category text. A scalar that parses cleanly counts as a single label.
fn split_category_field(raw: &str) -> Vec<String> {
    let cleaned = raw.replace('\'', "\"");
    match serde_json::from_str::<Value>(&cleaned) {
        Ok(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(label) => label.clone(),
                other => other.to_string(),
            })
            .collect(),
        Ok(Value::String(label)) => vec![label],
        Ok(other) => vec![other.to_string()],
        Err(_) => raw.split(',').map(|label| label.trim().to_string()).collect(),
    }
}

/// Local analytics summary over a snapshot, in the same shape the remote
/// analytics endpoint reports.
///
/// `by_category` counts, per extracted label, the records whose raw category
/// text contains that label case-insensitively, the same containment rule
/// the result composer filters with.
pub fn catalog_stats(records: &[ProductRecord]) -> CatalogStats {
    let mut by_category = HashMap::new();
    for label in extract_categories(records) {
        let needle = label.to_lowercase();
        let count = records
            .iter()
            .filter_map(|r| r.categories.as_deref())
            .filter(|raw| raw.to_lowercase().contains(&needle))
            .count() as u64;
        by_category.insert(label, count);
    }
    CatalogStats {
        total_items: records.len() as u64,
        by_category,
    }
}

//! Search execution and result composition.

use std::cmp::Ordering;

use tracing::debug;

use proddb_core::categories::extract_categories;
use proddb_core::traits::SearchEngine;
use proddb_core::types::{ProductRecord, ScoredMatch};

use crate::fuzzy::{query_distance, MatchOptions};

/// Sentinel filter value meaning "no category restriction".
pub const ALL_CATEGORIES: &str = "all";

/// In-memory fuzzy matcher over a snapshot.
///
/// Stateless apart from its options: every search scans the records passed
/// in, so results always reflect the caller's current snapshot.
#[derive(Debug, Default, Clone)]
pub struct FuzzySearchEngine {
    options: MatchOptions,
}

impl FuzzySearchEngine {
    pub fn new(options: MatchOptions) -> Self {
        Self { options }
    }

    /// Score `query` against every record, keeping only candidates within
    /// the threshold, best (lowest distance) first.
    ///
    /// An empty or whitespace query, like an empty snapshot, returns an
    /// empty set without scoring anything. The sort is stable over
    /// dataset-ordered candidates, so equal scores keep dataset order.
    pub fn search(&self, records: &[ProductRecord], query: &str) -> Vec<ScoredMatch> {
        let query = query.trim();
        if query.is_empty() || records.is_empty() {
            return Vec::new();
        }

        let mut hits = Vec::new();
        for (index, record) in records.iter().enumerate() {
            let score = record_distance(query, record);
            if score <= self.options.threshold {
                hits.push(ScoredMatch { index, score });
            }
        }
        hits.sort_by(|a, b| a.score.partial_cmp(&b.score).unwrap_or(Ordering::Equal));
        debug!(query, hits = hits.len(), "fuzzy search complete");
        hits
    }
}

impl SearchEngine for FuzzySearchEngine {
    fn search(&self, records: &[ProductRecord], query: &str) -> anyhow::Result<Vec<ScoredMatch>> {
        Ok(Self::search(self, records, query))
    }
}

/// Best (lowest) distance across the key fields: title, description, raw
/// category text, brand. Every field weighs the same; a record with no
/// populated field scores 1.0 and is never a candidate.
fn record_distance(query: &str, record: &ProductRecord) -> f32 {
    [
        Some(record.title.as_str()),
        record.description.as_deref(),
        record.categories.as_deref(),
        record.brand.as_deref(),
    ]
    .into_iter()
    .flatten()
    .map(|text| query_distance(query, text))
    .fold(1.0_f32, f32::min)
}

/// Apply the optional category filter to ranked hits, preserving rank order.
///
/// [`ALL_CATEGORIES`] passes everything through. Otherwise a record survives
/// only if its raw category text contains the filter, case-folded; records
/// with no category text never survive a real filter. No rescoring happens
/// here.
pub fn compose_results<'a>(
    records: &'a [ProductRecord],
    hits: &[ScoredMatch],
    category: &str,
) -> Vec<&'a ProductRecord> {
    let ranked = hits.iter().filter_map(|hit| records.get(hit.index));
    if category == ALL_CATEGORIES {
        return ranked.collect();
    }
    let needle = category.to_lowercase();
    ranked
        .filter(|record| {
            record
                .categories
                .as_deref()
                .map(|raw| raw.to_lowercase().contains(&needle))
                .unwrap_or(false)
        })
        .collect()
}

/// Category label → hit count for one result set, in extraction order.
/// Labels that match none of the hits are omitted.
pub fn facet_counts(records: &[ProductRecord], hits: &[ScoredMatch]) -> Vec<(String, u64)> {
    let matched: Vec<&ProductRecord> = hits.iter().filter_map(|hit| records.get(hit.index)).collect();
    let mut counts = Vec::new();
    for label in extract_categories(records) {
        let needle = label.to_lowercase();
        let count = matched
            .iter()
            .filter(|record| {
                record
                    .categories
                    .as_deref()
                    .map(|raw| raw.to_lowercase().contains(&needle))
                    .unwrap_or(false)
            })
            .count() as u64;
        if count > 0 {
            counts.push((label, count));
        }
    }
    counts
}

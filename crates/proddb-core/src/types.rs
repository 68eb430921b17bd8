//! Domain types shared by the engine, the service client, and the CLI.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Passthrough columns keyed by header name.
pub type Extra = HashMap<String, String>;

/// One catalog entry, parsed from a single data row.
///
/// Identity is positional: a record is addressed by its index in the loaded
/// snapshot, and nothing about its content is required to be unique.
///
/// - `title`: display name (empty string if the row had none)
/// - `description`/`brand`/`price`: optional free-text columns
/// - `categories`: raw category text as loaded, possibly comma- or
///   list-encoded; decoded on demand by [`crate::categories`]
/// - `images`: raw image-list text, possibly malformed; decoded on demand by
///   [`crate::images`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductRecord {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub categories: Option<String>,
    #[serde(default)]
    pub images: Option<String>,
    #[serde(default)]
    pub extra: Extra,
}

/// A record's position in the snapshot paired with its match distance.
///
/// `score` lives on a 0..=1 scale where 0.0 is an exact match; the engine
/// never returns anything above its threshold. Lower always ranks first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredMatch {
    pub index: usize,
    pub score: f32,
}

/// Dataset-level summary in the shape the analytics service reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogStats {
    pub total_items: u64,
    pub by_category: HashMap<String, u64>,
}

//! proddb-engine
//!
//! In-memory fuzzy matching and result composition over a catalog snapshot.
//! See `fuzzy` for the scoring rules and `engine` for the search/filter
//! surface.

pub mod engine;
pub mod fuzzy;

pub use engine::{compose_results, facet_counts, FuzzySearchEngine, ALL_CATEGORIES};
pub use fuzzy::{query_distance, MatchOptions};

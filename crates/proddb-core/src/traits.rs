use crate::types::{ProductRecord, ScoredMatch};

/// A scoring source over the current snapshot.
///
/// Implemented by the local fuzzy engine; a remote recommender can stand
/// behind the same seam in a networked deployment.
pub trait SearchEngine: Send + Sync {
    fn search(&self, records: &[ProductRecord], query: &str) -> anyhow::Result<Vec<ScoredMatch>>;
}

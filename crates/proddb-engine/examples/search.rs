//! Minimal end-to-end demo: a few inline records, a couple of queries,
//! one category filter. Run with `cargo run -p proddb-engine --example search`.

use proddb_core::types::ProductRecord;
use proddb_engine::{compose_results, FuzzySearchEngine, ALL_CATEGORIES};

fn record(title: &str, categories: &str) -> ProductRecord {
    ProductRecord {
        title: title.to_string(),
        categories: Some(categories.to_string()),
        ..Default::default()
    }
}

fn main() {
    let records = vec![
        record("Mid-Century Sofa", "Living Room, Sofas"),
        record("Velvet Sofa Bed", "Living Room, Sofas"),
        record("Ergonomic Office Chair", "Office, Chairs"),
    ];
    let engine = FuzzySearchEngine::default();
    for (query, filter) in [("sofa", ALL_CATEGORIES), ("soffa", ALL_CATEGORIES), ("office chair", "chairs")] {
        let hits = engine.search(&records, query);
        let results = compose_results(&records, &hits, filter);
        println!("q='{}' filter='{}' -> {} hits", query, filter, results.len());
        for r in results {
            println!("  - {}", r.title);
        }
    }
}

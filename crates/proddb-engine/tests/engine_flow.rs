use proddb_core::catalog::parse_records;
use proddb_engine::{compose_results, facet_counts, FuzzySearchEngine, MatchOptions, ALL_CATEGORIES};

const CSV: &str = "\
title,description,brand,price,categories,images
Mid-Century Sofa,Walnut frame three-seater,Habitat,499.00,\"Living Room, Sofas\",
Velvet Sofa Bed,Fold-out guest bed,Dunelm,350.00,\"Living Room, Sofas\",
Office Chair,Ergonomic mesh back,Hermann,199.00,\"Office, Chairs\",
Shoe Rack,Slim hallway rack,,,\"Hallway, Storage\",
Mystery Box,Uncategorized oddity,,,,
";

#[test]
fn search_ranks_ascending_and_includes_exact_hits() {
    let records = parse_records(CSV).expect("parse");
    let engine = FuzzySearchEngine::default();
    let hits = engine.search(&records, "sofa");
    assert!(!hits.is_empty());
    for pair in hits.windows(2) {
        assert!(pair[0].score <= pair[1].score, "hits must be best-first");
    }
    let results = compose_results(&records, &hits, ALL_CATEGORIES);
    assert!(results.iter().any(|r| r.title == "Mid-Century Sofa"));
}

#[test]
fn typo_query_still_matches() {
    let records = parse_records(CSV).expect("parse");
    let hits = FuzzySearchEngine::default().search(&records, "soffa");
    let results = compose_results(&records, &hits, ALL_CATEGORIES);
    assert!(results.iter().any(|r| r.title.contains("Sofa")), "typo within tolerance");
}

#[test]
fn hopeless_query_yields_nothing() {
    let records = parse_records(CSV).expect("parse");
    let hits = FuzzySearchEngine::default().search(&records, "zygomorphic quasar");
    assert!(hits.is_empty());
}

#[test]
fn empty_query_and_empty_dataset_short_circuit() {
    let records = parse_records(CSV).expect("parse");
    let engine = FuzzySearchEngine::default();
    assert!(engine.search(&records, "").is_empty());
    assert!(engine.search(&records, "   ").is_empty());
    assert!(engine.search(&[], "sofa").is_empty());
}

#[test]
fn ties_keep_dataset_order() {
    let records = parse_records("title\nAlpha Lamp\nAlpha Lamp\nAlpha Lamp\n").expect("parse");
    let hits = FuzzySearchEngine::default().search(&records, "lamp");
    let indices: Vec<usize> = hits.iter().map(|h| h.index).collect();
    assert_eq!(indices, vec![0, 1, 2]);
}

#[test]
fn category_filter_is_case_insensitive_substring() {
    let records = parse_records(CSV).expect("parse");
    let hits = FuzzySearchEngine::default().search(&records, "sofa");
    // "sofa" is a substring of the stored label "Sofas", case-folded
    let filtered = compose_results(&records, &hits, "sofa");
    assert!(!filtered.is_empty());
    assert!(filtered.iter().all(|r| {
        r.categories
            .as_deref()
            .map(|raw| raw.to_lowercase().contains("sofa"))
            .unwrap_or(false)
    }));
}

#[test]
fn filter_preserves_rank_order_and_drops_uncategorized() {
    let records = parse_records(CSV).expect("parse");
    // wide-open threshold so several records survive the match stage
    let engine = FuzzySearchEngine::new(MatchOptions { threshold: 1.0 });
    let hits = engine.search(&records, "sofa rack box");
    let all = compose_results(&records, &hits, ALL_CATEGORIES);
    let filtered = compose_results(&records, &hits, "living room");

    let mut cursor = all.iter();
    for survivor in &filtered {
        assert!(
            cursor.any(|ranked| std::ptr::eq(*ranked, *survivor)),
            "filter must not reorder survivors"
        );
    }
    assert!(filtered.iter().all(|r| r.categories.is_some()));

    // a record with no category text never passes a real filter,
    // even when its title matches the filter word
    let boxed = compose_results(&records, &hits, "box");
    assert!(boxed.iter().all(|r| r.title != "Mystery Box"));
}

#[test]
fn facet_counts_cover_only_hits() {
    let records = parse_records(CSV).expect("parse");
    let hits = FuzzySearchEngine::default().search(&records, "sofa");
    let facets = facet_counts(&records, &hits);
    assert!(facets.iter().any(|(label, count)| label == "Sofas" && *count == 2));
    assert!(facets.iter().all(|(_, count)| *count > 0));
    assert!(facets.iter().all(|(label, _)| label != "Office"));
}

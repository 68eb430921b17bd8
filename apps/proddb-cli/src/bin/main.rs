use std::env;
use std::path::PathBuf;

use indicatif::ProgressBar;

use proddb_client::ServiceClient;
use proddb_core::catalog::{load_csv, Catalog};
use proddb_core::categories::{catalog_stats, extract_categories};
use proddb_core::config::{expand_path, Config};
use proddb_core::images::parse_images;
use proddb_core::types::ProductRecord;
use proddb_engine::{compose_results, facet_counts, FuzzySearchEngine, MatchOptions, ALL_CATEGORIES};

fn parse_args() -> (String, Vec<String>) {
    let mut args: Vec<String> = env::args().collect();
    let prog = args.remove(0);
    if args.is_empty() {
        eprintln!("Usage: {} <search|categories|stats|recommend> [args...]", prog);
        std::process::exit(1);
    }
    let cmd = args.remove(0);
    (cmd, args)
}

fn catalog_path(config: &Config) -> PathBuf {
    let path: String = config
        .get("data.catalog_csv")
        .unwrap_or_else(|_| "dev_data/products.csv".to_string());
    expand_path(path)
}

fn load_catalog(config: &Config) -> anyhow::Result<Catalog> {
    let path = catalog_path(config);
    let spinner = ProgressBar::new_spinner();
    spinner.set_message(format!("Loading {}", path.display()));
    let mut catalog = Catalog::new();
    let ticket = catalog.begin_load();
    let records = load_csv(&path)?;
    catalog.install(ticket, records);
    spinner.finish_and_clear();
    println!("📦 Loaded {} products from {}", catalog.len(), path.display());
    Ok(catalog)
}

fn engine_options(config: &Config) -> MatchOptions {
    let threshold: f32 = config.get("search.threshold").unwrap_or(0.3);
    MatchOptions { threshold }
}

fn print_product(position: usize, product: &ProductRecord) {
    let brand = product.brand.as_deref().unwrap_or("-");
    let price = product.price.as_deref().unwrap_or("-");
    println!("\n  {}. {}  [brand: {}, price: {}]", position + 1, product.title, brand, price);
    if let Some(description) = &product.description {
        println!("     📝 {}", truncate(description, 120));
    }
    let images = parse_images(product.images.as_deref());
    if !images.is_empty() {
        println!("     🖼  {} image(s), first: {}", images.len(), images[0]);
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max_chars).collect();
        format!("{cut}...")
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    let config = Config::load().map_err(|e| {
        eprintln!("Error loading config: {}", e);
        e
    })?;
    let (cmd, args) = parse_args();
    match cmd.as_str() {
        "search" => {
            let query = args.first().cloned().unwrap_or_else(|| {
                eprintln!("Usage: proddb search \"<query>\" [category]");
                std::process::exit(1)
            });
            let category = args.get(1).cloned().unwrap_or_else(|| ALL_CATEGORIES.to_string());
            let catalog = load_catalog(&config)?;
            let engine = FuzzySearchEngine::new(engine_options(&config));
            let hits = engine.search(catalog.records(), &query);
            let results = compose_results(catalog.records(), &hits, &category);
            println!("\n🔍 Found {} products for \"{}\" (category: {})", results.len(), query, category);
            for (i, product) in results.iter().enumerate() {
                print_product(i, product);
            }
            let facets = facet_counts(catalog.records(), &hits);
            if !facets.is_empty() {
                println!("\n📊 Matches by category:");
                for (label, count) in facets {
                    println!("  {}: {} products", label, count);
                }
            }
        }
        "categories" => {
            let catalog = load_catalog(&config)?;
            let labels = extract_categories(catalog.records());
            println!("\n🏷️  {} categories:", labels.len());
            for label in labels {
                println!("  {}", label);
            }
        }
        "stats" => {
            let stats = if args.iter().any(|a| a == "--remote") {
                let base_url: String = config
                    .get("service.base_url")
                    .unwrap_or_else(|_| "http://localhost:8000".to_string());
                let client = ServiceClient::new(base_url)?;
                tokio::runtime::Runtime::new()?.block_on(async { client.analytics().await })?
            } else {
                let catalog = load_catalog(&config)?;
                catalog_stats(catalog.records())
            };
            println!("\n📊 {} products", stats.total_items);
            let mut rows: Vec<_> = stats.by_category.into_iter().collect();
            rows.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
            for (label, count) in rows {
                println!("  {}: {} products", label, count);
            }
        }
        "recommend" => {
            let message = args.first().cloned().unwrap_or_else(|| {
                eprintln!("Usage: proddb recommend \"<message>\"");
                std::process::exit(1)
            });
            let base_url: String = config
                .get("service.base_url")
                .unwrap_or_else(|_| "http://localhost:8000".to_string());
            let session_id: String = config
                .get("service.session_id")
                .unwrap_or_else(|_| "demo".to_string());
            let client = ServiceClient::new(base_url)?;
            let results = tokio::runtime::Runtime::new()?
                .block_on(async { client.recommend(&session_id, &message).await })?;
            println!("\n🤝 {} recommendations for \"{}\"", results.len(), message);
            for (i, product) in results.iter().enumerate() {
                print_product(i, product);
            }
        }
        _ => {
            eprintln!("Unknown command: {}", cmd);
            std::process::exit(1);
        }
    }
    Ok(())
}

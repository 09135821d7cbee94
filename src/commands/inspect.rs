use anyhow::Result;

use saush::config::Config;
use saush::storage::IndexStore;

use super::open_indexer;

/// Print a page's age and whether the crawler should revisit it
pub fn fresh(config: &Config, url: &str) -> Result<()> {
    let indexer = open_indexer(config)?;
    let threshold = indexer.policy().threshold().num_minutes();

    let Some(page) = indexer.store().find_page(url)? else {
        println!("{url}: not indexed (needs crawl)");
        return Ok(());
    };

    match indexer.policy().age_minutes(&page) {
        Ok(age) => {
            let fresh = indexer.is_fresh(&page);
            println!(
                "{url}: age {age} min (threshold {threshold} min), {}",
                if fresh { "fresh" } else { "stale (needs crawl)" }
            );
        }
        Err(e) => {
            tracing::warn!(url = %url, error = %e, "Page has no refresh timestamp");
            println!("{url}: never refreshed (needs crawl)");
        }
    }
    Ok(())
}

/// Print row counts
pub fn stats(config: &Config, json: bool) -> Result<()> {
    let indexer = open_indexer(config)?;
    let stats = indexer.store().stats()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!("Index Statistics");
        println!("================");
        println!("  Pages:     {}", stats.pages);
        println!("  Words:     {}", stats.words);
        println!("  Locations: {}", stats.locations);
    }
    Ok(())
}

/// Print each stem with its position
pub fn normalize(text: &str) {
    for (position, stem) in saush::normalizer::normalize(text).enumerate() {
        println!("{position}\t{stem}");
    }
}

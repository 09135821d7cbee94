use anyhow::{Context, Result};

use saush::config::Config;
use saush::storage::IndexStore;

use super::open_indexer;

/// Create the schema (opening the store creates any missing tables)
pub fn init(config: &Config) -> Result<()> {
    let indexer = open_indexer(config)?;
    let stats = indexer.store().stats()?;

    println!(
        "Index ready at {} ({} pages, {} words, {} locations)",
        config.database.sqlite_path.display(),
        stats.pages,
        stats.words,
        stats.locations
    );
    Ok(())
}

/// Drop and recreate every index table
pub fn reset(config: &Config, yes: bool) -> Result<()> {
    if !yes {
        anyhow::bail!(
            "Refusing to reset {} without --yes",
            config.database.sqlite_path.display()
        );
    }

    let indexer = open_indexer(config)?;
    indexer
        .store()
        .reset()
        .context("Failed to reset index schema")?;

    println!("Index at {} reset.", config.database.sqlite_path.display());
    Ok(())
}

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use saush::config::Config;

use super::open_indexer;

/// Index one page whose text comes from `file` or stdin
pub fn index(config: &Config, url: &str, title: Option<&str>, file: Option<PathBuf>) -> Result<()> {
    let text = match &file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => std::io::read_to_string(std::io::stdin()).context("Failed to read stdin")?,
    };

    let indexer = open_indexer(config)?;
    let (page, summary) = indexer
        .index_page_with_summary(url, &text, title)
        .with_context(|| format!("Failed to index {url}"))?;

    println!(
        "{} {url} (page {}): {} occurrences of {} words, {} new",
        if summary.page_created { "Indexed" } else { "Re-indexed" },
        page.id.unwrap_or_default(),
        summary.occurrences,
        summary.distinct_words,
        summary.new_words
    );
    if summary.replaced_locations > 0 {
        println!("  Replaced {} previous locations", summary.replaced_locations);
    }
    Ok(())
}

/// Page URL for a file: `base_url` joined with the file name
fn page_url(base_url: &str, path: &Path) -> Option<String> {
    let name = path.file_name()?.to_str()?;
    Some(format!("{}/{name}", base_url.trim_end_matches('/')))
}

/// Index every `.txt` file in `dir`, up to `concurrency` at a time
pub async fn index_dir(
    config: &Config,
    dir: PathBuf,
    base_url: String,
    concurrency: usize,
    skip_fresh: bool,
) -> Result<()> {
    if concurrency == 0 {
        anyhow::bail!("concurrency must be greater than 0");
    }

    let mut files = Vec::new();
    let mut entries = tokio::fs::read_dir(&dir)
        .await
        .with_context(|| format!("Failed to read directory {}", dir.display()))?;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().map(|ext| ext == "txt").unwrap_or(false) {
            files.push(path);
        }
    }
    files.sort();

    println!("Indexing {} files from {}", files.len(), dir.display());

    let indexer = Arc::new(open_indexer(config)?);
    let semaphore = Arc::new(Semaphore::new(concurrency));
    let mut tasks = JoinSet::new();

    for path in files {
        let Some(url) = page_url(&base_url, &path) else {
            tracing::warn!(path = %path.display(), "Skipping file with non UTF-8 name");
            continue;
        };
        let indexer = Arc::clone(&indexer);
        let permit = Arc::clone(&semaphore).acquire_owned().await?;

        tasks.spawn_blocking(move || -> Result<bool> {
            let _permit = permit;

            if skip_fresh && !indexer.needs_crawl(&url)? {
                tracing::debug!(url = %url, "Skipping fresh page");
                return Ok(false);
            }

            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let title = path.file_stem().and_then(|s| s.to_str());
            indexer
                .index_page(&url, &text, title)
                .with_context(|| format!("Failed to index {url}"))?;
            Ok(true)
        });
    }

    let (mut indexed, mut skipped, mut failed) = (0usize, 0usize, 0usize);
    while let Some(joined) = tasks.join_next().await {
        match joined? {
            Ok(true) => indexed += 1,
            Ok(false) => skipped += 1,
            Err(e) => {
                tracing::warn!(error = %format!("{e:#}"), "Failed to index file");
                failed += 1;
            }
        }
    }

    println!("Indexed: {indexed}, skipped (fresh): {skipped}, failed: {failed}");
    Ok(())
}

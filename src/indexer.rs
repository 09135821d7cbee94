//! Indexing pipeline
//!
//! [`Indexer::index_page`] turns one crawled page into index rows:
//!
//! 1. resolve the page by url, set its title, refresh its timestamps
//! 2. normalize the text into stems
//! 3. resolve each distinct stem to a word once and record every occurrence
//!
//! All of it runs in a single store transaction, so a failure leaves the
//! index exactly as it was before the call.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::config::{Config, ReindexMode};
use crate::error::Result;
use crate::freshness::{self, FreshnessPolicy};
use crate::models::{Page, Word};
use crate::normalizer::normalize;
use crate::storage::{IndexOps, IndexStore};

/// Counters from one `index_page` run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexSummary {
    pub page_created: bool,
    pub occurrences: usize,
    pub distinct_words: usize,
    pub new_words: usize,
    pub replaced_locations: usize,
}

/// Writes pages into an [`IndexStore`]
pub struct Indexer<S> {
    store: S,
    policy: FreshnessPolicy,
    reindex: ReindexMode,
}

impl<S: IndexStore> Indexer<S> {
    /// Create an indexer with the default freshness policy and append mode
    pub fn new(store: S) -> Self {
        Self {
            store,
            policy: FreshnessPolicy::default(),
            reindex: ReindexMode::Append,
        }
    }

    /// Create an indexer configured from `config`
    pub fn with_config(store: S, config: &Config) -> Self {
        Self {
            store,
            policy: config.freshness_policy(),
            reindex: config.index.reindex,
        }
    }

    pub fn with_reindex_mode(mut self, mode: ReindexMode) -> Self {
        self.reindex = mode;
        self
    }

    pub fn with_policy(mut self, policy: FreshnessPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn policy(&self) -> &FreshnessPolicy {
        &self.policy
    }

    /// Index `text` as the content of the page at `url` and return the saved page
    pub fn index_page(&self, url: &str, text: &str, title: Option<&str>) -> Result<Page> {
        self.index_page_with_summary(url, text, title)
            .map(|(page, _)| page)
    }

    /// Like [`index_page`](Self::index_page), also returning what was written
    pub fn index_page_with_summary(
        &self,
        url: &str,
        text: &str,
        title: Option<&str>,
    ) -> Result<(Page, IndexSummary)> {
        let result = self
            .store
            .transaction(|ops| self.write_page(ops, url, text, title));

        match &result {
            Ok((page, summary)) => tracing::info!(
                url = %url,
                page_id = ?page.id,
                created = summary.page_created,
                occurrences = summary.occurrences,
                distinct_words = summary.distinct_words,
                new_words = summary.new_words,
                "page indexed"
            ),
            Err(e) => tracing::warn!(url = %url, error = %e, "indexing rolled back"),
        }

        result
    }

    fn write_page(
        &self,
        ops: &dyn IndexOps,
        url: &str,
        text: &str,
        title: Option<&str>,
    ) -> Result<(Page, IndexSummary)> {
        let mut summary = IndexSummary::default();

        let resolved = ops.resolve_page(url)?;
        summary.page_created = resolved.is_created();
        let mut page = resolved.into_inner();
        if let Some(title) = title {
            page.title = Some(title.to_string());
        }
        freshness::refresh(ops, &mut page)?;

        if self.reindex == ReindexMode::Replace && !summary.page_created {
            summary.replaced_locations = ops.delete_locations(&page)?;
            tracing::debug!(url = %url, removed = summary.replaced_locations, "old locations removed");
        }

        let mut words: HashMap<String, Word> = HashMap::new();
        for (position, stem) in normalize(text).enumerate() {
            let word = match words.entry(stem) {
                Entry::Occupied(entry) => entry.into_mut(),
                Entry::Vacant(entry) => {
                    let resolved = ops.resolve_word(entry.key())?;
                    if resolved.is_created() {
                        summary.new_words += 1;
                    }
                    entry.insert(resolved.into_inner())
                }
            };
            ops.record_occurrence(word, &page, position as u64)?;
            summary.occurrences += 1;
        }
        summary.distinct_words = words.len();

        Ok((page, summary))
    }

    /// Whether the page at `url` is missing from the index or stale
    pub fn needs_crawl(&self, url: &str) -> Result<bool> {
        Ok(match self.store.find_page(url)? {
            Some(page) => !self.policy.is_fresh(&page),
            None => true,
        })
    }

    /// Whether `page` is still fresh under this indexer's policy
    pub fn is_fresh(&self, page: &Page) -> bool {
        self.policy.is_fresh(page)
    }
}

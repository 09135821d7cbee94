//! Persistent index store
//!
//! The index lives in three tables: `pages`, `words` and `locations`
//! (see [`schema`]). Access goes through two traits:
//!
//! - [`IndexOps`] - the primitive lookups and writes, object safe so the
//!   pipeline can run against any backend through `&dyn IndexOps`
//! - [`IndexStore`] - owns the connection and hands out an [`IndexOps`]
//!   either inside a transaction or in autocommit mode
//!
//! ```text
//!            Indexer / crawler
//!                   │
//!                   ▼
//!   IndexStore::transaction(|ops| ...)
//!                   │
//!         ┌─────────┴─────────┐
//!         ▼                   ▼
//!  SqliteIndexStore    MemoryIndexStore
//! ```
//!
//! Uniqueness of `pages.url` and `words.stem` is enforced by the backend,
//! not by callers, so several writers may share one database.

pub mod memory;
pub mod schema;
pub mod sqlite;

pub use memory::MemoryIndexStore;
pub use sqlite::SqliteIndexStore;

use crate::error::{Error, Result};
use crate::models::{IndexStats, Location, Page, Resolved, Word};
use crate::normalizer::is_valid_stem;

/// Primitive index operations shared by every backend
pub trait IndexOps {
    /// Look up a page by url
    fn find_page(&self, url: &str) -> Result<Option<Page>>;

    /// Insert or update `page`, assigning its id on first save.
    ///
    /// Saving an unsaved page whose url already exists updates the existing
    /// row instead of failing, so racing creators converge on one page.
    fn save_page(&self, page: &mut Page) -> Result<()>;

    /// Look up a word by stem
    fn find_word(&self, stem: &str) -> Result<Option<Word>>;

    /// Insert `word` if its stem is new and assign its id
    fn save_word(&self, word: &mut Word) -> Result<()>;

    /// Insert one location row
    fn insert_location(&self, word_id: i64, page_id: i64, position: u64) -> Result<Location>;

    /// Delete every location of `page`, returning how many were removed
    fn delete_locations(&self, page: &Page) -> Result<usize>;

    /// Locations of `page` in insertion order
    fn locations_for_page(&self, page: &Page) -> Result<Vec<Location>>;

    /// Distinct pages containing `stem`, ordered by page id
    fn pages_for_word(&self, stem: &str) -> Result<Vec<Page>>;

    /// Row counts
    fn stats(&self) -> Result<IndexStats>;

    /// Existing page for `url`, or a new unsaved one with no timestamps
    fn resolve_page(&self, url: &str) -> Result<Resolved<Page>> {
        validate_url(url)?;
        Ok(match self.find_page(url)? {
            Some(page) => Resolved::Existing(page),
            None => Resolved::Created(Page::new(url)),
        })
    }

    /// Existing word for `stem`, or a new unsaved one
    fn resolve_word(&self, stem: &str) -> Result<Resolved<Word>> {
        validate_stem(stem)?;
        Ok(match self.find_word(stem)? {
            Some(word) => Resolved::Existing(word),
            None => Resolved::Created(Word::new(stem)),
        })
    }

    /// Record that `word` occurs in `page` at `position`.
    ///
    /// An unsaved word is saved first. The page must already be saved.
    fn record_occurrence(&self, word: &mut Word, page: &Page, position: u64) -> Result<Location> {
        let page_id = page.id.ok_or_else(|| {
            Error::validation(format!("page {} must be saved before recording occurrences", page.url))
        })?;
        if i64::try_from(position).is_err() {
            return Err(Error::validation(format!("position {position} is out of range")));
        }
        if !word.is_persisted() {
            validate_stem(&word.stem)?;
            self.save_word(word)?;
        }
        let word_id = word
            .id
            .ok_or_else(|| Error::unavailable(format!("word {} has no id after save", word.stem)))?;

        self.insert_location(word_id, page_id, position)
    }
}

/// A backend that owns index state and runs [`IndexOps`] against it
pub trait IndexStore: Send + Sync {
    /// Run `work` in a transaction. Any error rolls back every write `work` made.
    fn transaction<T, F>(&self, work: F) -> Result<T>
    where
        F: FnOnce(&dyn IndexOps) -> Result<T>;

    /// Run `work` with each write committed as it happens
    fn autocommit<T, F>(&self, work: F) -> Result<T>
    where
        F: FnOnce(&dyn IndexOps) -> Result<T>;

    /// Drop all index data and recreate an empty schema
    fn reset(&self) -> Result<()>;

    fn resolve_page(&self, url: &str) -> Result<Resolved<Page>> {
        self.autocommit(|ops| ops.resolve_page(url))
    }

    fn resolve_word(&self, stem: &str) -> Result<Resolved<Word>> {
        self.autocommit(|ops| ops.resolve_word(stem))
    }

    fn record_occurrence(&self, word: &mut Word, page: &Page, position: u64) -> Result<Location> {
        self.autocommit(|ops| ops.record_occurrence(word, page, position))
    }

    fn find_page(&self, url: &str) -> Result<Option<Page>> {
        self.autocommit(|ops| ops.find_page(url))
    }

    fn save_page(&self, page: &mut Page) -> Result<()> {
        self.autocommit(|ops| ops.save_page(page))
    }

    fn locations_for_page(&self, page: &Page) -> Result<Vec<Location>> {
        self.autocommit(|ops| ops.locations_for_page(page))
    }

    fn pages_for_word(&self, stem: &str) -> Result<Vec<Page>> {
        self.autocommit(|ops| ops.pages_for_word(stem))
    }

    fn stats(&self) -> Result<IndexStats> {
        self.autocommit(|ops| ops.stats())
    }
}

fn validate_url(url: &str) -> Result<()> {
    if url.trim().is_empty() {
        return Err(Error::validation("page url must not be empty"));
    }
    Ok(())
}

fn validate_stem(stem: &str) -> Result<()> {
    if !is_valid_stem(stem) {
        return Err(Error::validation(format!("{stem:?} is not a normalized stem")));
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

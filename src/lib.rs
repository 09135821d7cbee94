//! saush - word index for crawled web pages
//!
//! Maintains an inverted index from normalized word stems to the pages and
//! token positions where they occur, plus a freshness policy telling a
//! crawler when a page is due for another visit.
//!
//! # Architecture
//!
//! - [`normalizer`] - punctuation stripping, stopword filtering and stemming
//! - [`models`] - `Page`, `Word`, `Location` and the `Resolved` lookup result
//! - [`storage`] - the index store traits with SQLite and in-memory backends
//! - [`freshness`] - refresh stamping and the staleness policy
//! - [`indexer`] - the transactional page indexing pipeline
//! - [`config`] - configuration management
//! - [`error`] - unified error type
//!
//! # Example
//!
//! ```no_run
//! use saush::indexer::Indexer;
//! use saush::storage::SqliteIndexStore;
//!
//! fn main() -> saush::error::Result<()> {
//!     let store = SqliteIndexStore::open("data/saush.db")?;
//!     let indexer = Indexer::new(store);
//!
//!     if indexer.needs_crawl("http://a.test")? {
//!         let page = indexer.index_page("http://a.test", "The cat sat on the mat", None)?;
//!         assert!(indexer.is_fresh(&page));
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod freshness;
pub mod indexer;
pub mod models;
pub mod normalizer;
pub mod storage;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{Config, ReindexMode};
    pub use crate::error::{Error, ErrorCategory, Result};
    pub use crate::freshness::FreshnessPolicy;
    pub use crate::indexer::{IndexSummary, Indexer};
    pub use crate::models::{IndexStats, Location, Page, Resolved, Word};
    pub use crate::normalizer::normalize;
    pub use crate::storage::{IndexOps, IndexStore, MemoryIndexStore, SqliteIndexStore};
}

// Direct re-exports for convenience
pub use models::{Location, Page, Word};

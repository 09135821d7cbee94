//! Common test utilities

use saush::indexer::Indexer;
use saush::storage::{IndexStore, SqliteIndexStore};
use tempfile::TempDir;

/// Indexer over a fresh SQLite file inside a temp directory.
///
/// The `TempDir` must be kept alive for as long as the indexer is used.
pub fn sqlite_indexer() -> (TempDir, Indexer<SqliteIndexStore>) {
    let dir = TempDir::new().unwrap();
    let store = SqliteIndexStore::open(dir.path().join("index.db")).unwrap();
    (dir, Indexer::new(store))
}

/// Id of the word stored for `stem`
#[allow(dead_code)]
pub fn word_id<S: IndexStore>(store: &S, stem: &str) -> i64 {
    store
        .autocommit(|ops| ops.find_word(stem))
        .unwrap()
        .and_then(|w| w.id)
        .unwrap_or_else(|| panic!("word {stem} not stored"))
}

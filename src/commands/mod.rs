pub mod index;
pub mod inspect;
pub mod schema;

// Re-export command functions for convenience
pub use index::{index, index_dir};
pub use inspect::{fresh, normalize, stats};
pub use schema::{init, reset};

use anyhow::{Context, Result};

use saush::config::Config;
use saush::indexer::Indexer;
use saush::storage::SqliteIndexStore;

/// Open the configured database and wrap it in an indexer
pub fn open_indexer(config: &Config) -> Result<Indexer<SqliteIndexStore>> {
    let store = SqliteIndexStore::open(&config.database.sqlite_path).with_context(|| {
        format!(
            "Failed to open index database {}",
            config.database.sqlite_path.display()
        )
    })?;

    Ok(Indexer::with_config(store, config))
}

//! Several writers sharing one index
//!
//! Each writer opens its own connection to the same SQLite file, so the
//! url and stem uniqueness seen here comes from the database constraints.

use std::sync::Arc;
use std::thread;

use saush::indexer::Indexer;
use saush::storage::{IndexStore, SqliteIndexStore};
use tempfile::TempDir;

use super::fixtures::{page_urls, ARTICLE_TEXT, CAT_TEXT, CAT_URL};

fn open_writers(dir: &TempDir, count: usize) -> Vec<Indexer<SqliteIndexStore>> {
    let path = dir.path().join("shared.db");
    (0..count)
        .map(|_| Indexer::new(SqliteIndexStore::open(&path).unwrap()))
        .collect()
}

#[test]
fn test_distinct_urls_in_parallel() {
    let dir = TempDir::new().unwrap();
    let writers = open_writers(&dir, 4);
    let urls = page_urls(16);

    thread::scope(|scope| {
        for (i, writer) in writers.iter().enumerate() {
            let urls = &urls;
            scope.spawn(move || {
                for url in urls.iter().skip(i).step_by(4) {
                    writer.index_page(url, ARTICLE_TEXT, None).unwrap();
                }
            });
        }
    });

    let stats = writers[0].store().stats().unwrap();
    let per_page = saush::normalizer::normalize(ARTICLE_TEXT).count();
    let distinct: std::collections::HashSet<String> =
        saush::normalizer::normalize(ARTICLE_TEXT).collect();

    assert_eq!(stats.pages, 16);
    assert_eq!(stats.words, distinct.len());
    assert_eq!(stats.locations, 16 * per_page);
}

#[test]
fn test_same_url_race_keeps_one_page() {
    let dir = TempDir::new().unwrap();
    let writers = open_writers(&dir, 4);

    let ids: Vec<Option<i64>> = thread::scope(|scope| {
        let handles: Vec<_> = writers
            .iter()
            .map(|writer| scope.spawn(move || writer.index_page(CAT_URL, CAT_TEXT, None).unwrap().id))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert!(ids.iter().all(|id| *id == ids[0]));
    let stats = writers[0].store().stats().unwrap();
    assert_eq!(stats.pages, 1);
    assert_eq!(stats.words, 3);
    assert_eq!(stats.locations, 4 * 3);
}

#[test]
fn test_shared_indexer_across_threads() {
    let dir = TempDir::new().unwrap();
    let indexer = Arc::new(open_writers(&dir, 1).remove(0));

    let handles: Vec<_> = page_urls(8)
        .into_iter()
        .map(|url| {
            let indexer = Arc::clone(&indexer);
            thread::spawn(move || indexer.index_page(&url, CAT_TEXT, None).unwrap())
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let stats = indexer.store().stats().unwrap();
    assert_eq!(stats.pages, 8);
    assert_eq!(stats.words, 3);
    assert_eq!(indexer.store().pages_for_word("mat").unwrap().len(), 8);
}

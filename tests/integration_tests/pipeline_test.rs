//! End-to-end pipeline integration tests
//!
//! Tests the complete workflow against an on-disk SQLite index:
//! 1. Page resolution and refresh
//! 2. Text normalization
//! 3. Word resolution and location recording
//! 4. Freshness of the indexed page

use chrono::TimeDelta;
use saush::config::ReindexMode;
use saush::storage::{IndexStore, SqliteIndexStore};

use super::fixtures::{page_urls, ARTICLE_TEXT, CAT_STEMS, CAT_TEXT, CAT_URL, DOG_TEXT};
use crate::common::{sqlite_indexer, word_id};

// ============================================================================
// Indexing Scenarios
// ============================================================================

#[test]
fn test_index_single_page() {
    let (_dir, indexer) = sqlite_indexer();

    let page = indexer.index_page(CAT_URL, CAT_TEXT, None).unwrap();

    let store = indexer.store();
    let stats = store.stats().unwrap();
    assert_eq!(stats.pages, 1);
    assert_eq!(stats.words, 3);
    assert_eq!(stats.locations, 3);

    let locations = store.locations_for_page(&page).unwrap();
    for (expected_position, stem) in CAT_STEMS.iter().enumerate() {
        let location = locations[expected_position];
        assert_eq!(location.position, expected_position as u64);
        assert_eq!(location.word_id, word_id(store, stem));
        assert_eq!(Some(location.page_id), page.id);
    }
}

#[test]
fn test_reindex_same_url_appends_locations() {
    let (_dir, indexer) = sqlite_indexer();

    let first = indexer.index_page(CAT_URL, CAT_TEXT, None).unwrap();
    let second = indexer.index_page(CAT_URL, DOG_TEXT, None).unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(first.created_at, second.created_at);
    assert!(second.updated_at >= first.updated_at);

    let stats = indexer.store().stats().unwrap();
    assert_eq!(stats.pages, 1);
    // cat, sat, mat + dog, chase, run
    assert_eq!(stats.words, 6);
    assert_eq!(stats.locations, 3 + 5);

    // Positions restart at 0 for the second run
    let positions: Vec<u64> = indexer
        .store()
        .locations_for_page(&second)
        .unwrap()
        .iter()
        .map(|l| l.position)
        .collect();
    assert_eq!(positions, vec![0, 1, 2, 0, 1, 2, 3, 4]);
}

#[test]
fn test_reindex_replace_mode() {
    let (_dir, indexer) = sqlite_indexer();
    let indexer = indexer.with_reindex_mode(ReindexMode::Replace);

    indexer.index_page(CAT_URL, CAT_TEXT, None).unwrap();
    let page = indexer.index_page(CAT_URL, DOG_TEXT, None).unwrap();

    let locations = indexer.store().locations_for_page(&page).unwrap();
    assert_eq!(locations.len(), 5);
    // Words from the first run stay in the vocabulary
    assert_eq!(indexer.store().stats().unwrap().words, 6);
    assert!(indexer.store().pages_for_word("sat").unwrap().is_empty());
}

#[test]
fn test_shared_words_across_pages() {
    let (_dir, indexer) = sqlite_indexer();

    let a = indexer.index_page(CAT_URL, CAT_TEXT, None).unwrap();
    let b = indexer
        .index_page("http://b.test", DOG_TEXT, Some("Dogs"))
        .unwrap();

    let pages = indexer.store().pages_for_word("cat").unwrap();
    let ids: Vec<_> = pages.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![a.id, b.id]);
    assert_eq!(pages[1].title.as_deref(), Some("Dogs"));

    let dog_pages = indexer.store().pages_for_word("dog").unwrap();
    assert_eq!(dog_pages.len(), 1);
}

#[test]
fn test_empty_text_still_refreshes_page() {
    let (_dir, indexer) = sqlite_indexer();

    let page = indexer.index_page(CAT_URL, "the and of", None).unwrap();

    assert!(page.updated_at.is_some());
    let stats = indexer.store().stats().unwrap();
    assert_eq!(stats.pages, 1);
    assert_eq!(stats.words, 0);
    assert_eq!(stats.locations, 0);
}

#[test]
fn test_index_survives_reopen() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("index.db");

    let page_id = {
        let indexer = saush::indexer::Indexer::new(SqliteIndexStore::open(&path).unwrap());
        indexer
            .index_page(CAT_URL, ARTICLE_TEXT, Some("Rust"))
            .unwrap()
            .id
    };

    let store = SqliteIndexStore::open(&path).unwrap();
    let page = store.find_page(CAT_URL).unwrap().unwrap();
    assert_eq!(page.id, page_id);
    assert_eq!(page.title.as_deref(), Some("Rust"));
    assert!(!store.locations_for_page(&page).unwrap().is_empty());
    assert_eq!(store.pages_for_word("borrow").unwrap().len(), 1);
}

#[test]
fn test_bulk_index() {
    let (_dir, indexer) = sqlite_indexer();

    for url in page_urls(20) {
        indexer.index_page(&url, ARTICLE_TEXT, None).unwrap();
    }

    let stats = indexer.store().stats().unwrap();
    assert_eq!(stats.pages, 20);
    let per_page = saush::normalizer::normalize(ARTICLE_TEXT).count();
    assert_eq!(stats.locations, 20 * per_page);
    assert_eq!(indexer.store().pages_for_word("borrow").unwrap().len(), 20);
}

// ============================================================================
// Freshness
// ============================================================================

#[test]
fn test_fresh_page_after_index() {
    let (_dir, indexer) = sqlite_indexer();

    let page = indexer.index_page(CAT_URL, CAT_TEXT, None).unwrap();

    assert!(indexer.is_fresh(&page));
    assert_eq!(indexer.policy().age_minutes(&page).unwrap(), 0);
    assert!(!indexer.needs_crawl(CAT_URL).unwrap());
    assert!(indexer.needs_crawl("http://unseen.test").unwrap());
}

#[test]
fn test_stale_page_needs_crawl() {
    let (_dir, indexer) = sqlite_indexer();

    let mut page = indexer.index_page(CAT_URL, CAT_TEXT, None).unwrap();
    page.updated_at = page.updated_at.map(|t| t - TimeDelta::minutes(10_081));
    indexer.store().save_page(&mut page).unwrap();

    let stored = indexer.store().find_page(CAT_URL).unwrap().unwrap();
    assert!(!indexer.is_fresh(&stored));
    assert!(indexer.needs_crawl(CAT_URL).unwrap());

    // Re-indexing refreshes it
    indexer.index_page(CAT_URL, CAT_TEXT, None).unwrap();
    assert!(!indexer.needs_crawl(CAT_URL).unwrap());
}

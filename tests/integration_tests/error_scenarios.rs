//! Error scenario integration tests
//!
//! Tests failure modes and error handling:
//! 1. Storage failure mid-page rolls the whole page back
//! 2. A failed call can be retried without duplicating rows
//! 3. Validation errors are raised before any write
//! 4. Freshness of a page that was never refreshed

use saush::error::{Error, ErrorCategory};
use saush::freshness::FreshnessPolicy;
use saush::indexer::Indexer;
use saush::models::Page;
use saush::storage::{IndexStore, MemoryIndexStore};

use super::fixtures::{CAT_TEXT, CAT_URL, DOG_TEXT};
use crate::common::sqlite_indexer;

// ============================================================================
// Storage Failures
// ============================================================================

#[test]
fn test_storage_failure_rolls_back_page() {
    let indexer = Indexer::new(MemoryIndexStore::failing_on_stem("mat"));

    let err = indexer.index_page(CAT_URL, CAT_TEXT, None).unwrap_err();

    assert_eq!(err.category(), ErrorCategory::Storage);
    assert!(err.is_recoverable());
    let stats = indexer.store().stats().unwrap();
    assert_eq!(stats.pages, 0);
    assert_eq!(stats.words, 0);
    assert_eq!(stats.locations, 0);
}

#[test]
fn test_failure_leaves_existing_page_untouched() {
    let indexer = Indexer::new(MemoryIndexStore::failing_on_stem("chase"));

    let before = indexer.index_page(CAT_URL, CAT_TEXT, Some("Cats")).unwrap();
    indexer
        .index_page(CAT_URL, DOG_TEXT, Some("Dogs"))
        .unwrap_err();

    let after = indexer.store().find_page(CAT_URL).unwrap().unwrap();
    assert_eq!(after, before);
    assert_eq!(indexer.store().locations_for_page(&after).unwrap().len(), 3);
}

#[test]
fn test_retry_after_failure_does_not_duplicate() {
    let failing = Indexer::new(MemoryIndexStore::failing_on_stem("sat"));
    assert!(failing.index_page(CAT_URL, CAT_TEXT, None).is_err());

    let (_dir, indexer) = sqlite_indexer();
    indexer.index_page(CAT_URL, CAT_TEXT, None).unwrap();
    indexer.index_page(CAT_URL, CAT_TEXT, None).unwrap();

    let stats = indexer.store().stats().unwrap();
    assert_eq!(stats.pages, 1);
    assert_eq!(stats.words, 3);
}

// ============================================================================
// Validation
// ============================================================================

#[test]
fn test_blank_url_rejected_before_write() {
    let (_dir, indexer) = sqlite_indexer();

    let err = indexer.index_page("   ", CAT_TEXT, None).unwrap_err();

    assert!(matches!(err, Error::Validation(_)));
    assert!(!err.is_recoverable());
    assert_eq!(indexer.store().stats().unwrap().pages, 0);
}

#[test]
fn test_unsaved_page_rejected_for_occurrence() {
    let (_dir, indexer) = sqlite_indexer();
    let mut word = indexer.store().resolve_word("cat").unwrap().into_inner();

    let err = indexer
        .store()
        .record_occurrence(&mut word, &Page::new(CAT_URL), 0)
        .unwrap_err();

    assert_eq!(err.category(), ErrorCategory::Validation);
    assert!(!word.is_persisted());
}

// ============================================================================
// Freshness Preconditions
// ============================================================================

#[test]
fn test_age_of_never_refreshed_page() {
    let (_dir, indexer) = sqlite_indexer();

    // Saved without a refresh, so updated_at stays empty
    let mut page = indexer.store().resolve_page(CAT_URL).unwrap().into_inner();
    indexer.store().save_page(&mut page).unwrap();

    let policy = FreshnessPolicy::default();
    let err = policy.age(&page).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Precondition);
    assert!(!policy.is_fresh(&page));
    assert!(indexer.needs_crawl(CAT_URL).unwrap());
}

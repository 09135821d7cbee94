// Core data structures for the word index

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A crawled page, keyed by url
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Row id, `None` until the page is first saved
    pub id: Option<i64>,
    pub url: String,
    pub title: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Page {
    /// Create an unsaved page with no timestamps
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            id: None,
            url: url.into(),
            title: None,
            created_at: None,
            updated_at: None,
        }
    }

    /// Whether the page has been written to the store
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}

/// A distinct normalized stem
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Word {
    /// Row id, `None` until the word is first saved
    pub id: Option<i64>,
    pub stem: String,
}

impl Word {
    /// Create an unsaved word
    pub fn new(stem: impl Into<String>) -> Self {
        Self {
            id: None,
            stem: stem.into(),
        }
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}

/// One occurrence of a word at a token position within a page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub id: i64,
    /// 0-based offset in the page's normalized stem sequence
    pub position: u64,
    pub word_id: i64,
    pub page_id: i64,
}

/// Outcome of a lookup-or-create
///
/// `Created` values are not necessarily persisted yet; they are saved by
/// the operation that first needs their id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved<T> {
    Existing(T),
    Created(T),
}

impl<T> Resolved<T> {
    pub fn is_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }

    pub fn get(&self) -> &T {
        match self {
            Self::Existing(v) | Self::Created(v) => v,
        }
    }

    pub fn into_inner(self) -> T {
        match self {
            Self::Existing(v) | Self::Created(v) => v,
        }
    }
}

/// Row counts across the three index tables
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStats {
    pub pages: usize,
    pub words: usize,
    pub locations: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_page_is_transient() {
        let page = Page::new("http://a.test");
        assert!(!page.is_persisted());
        assert!(page.created_at.is_none());
        assert!(page.updated_at.is_none());
        assert!(page.title.is_none());
    }

    #[test]
    fn test_resolved_accessors() {
        let created = Resolved::Created(Word::new("cat"));
        assert!(created.is_created());
        assert_eq!(created.get().stem, "cat");

        let existing = Resolved::Existing(Word {
            id: Some(7),
            stem: "cat".to_string(),
        });
        assert!(!existing.is_created());
        assert_eq!(existing.into_inner().id, Some(7));
    }
}

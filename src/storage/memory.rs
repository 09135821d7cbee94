//! In-memory implementation of the index store
//!
//! Useful for testing without database dependencies. Transactions work on a
//! copy of the state that replaces the original only when the work succeeds.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::{Mutex, MutexGuard};

use super::{IndexOps, IndexStore};
use crate::error::{Error, Result};
use crate::models::{IndexStats, Location, Page, Word};

#[derive(Debug, Clone, Default)]
struct MemoryState {
    pages: BTreeMap<i64, Page>,
    page_ids: HashMap<String, i64>,
    words: HashMap<String, Word>,
    locations: Vec<Location>,
    last_page_id: i64,
    last_word_id: i64,
    last_location_id: i64,
}

/// In-memory [`IndexStore`]
#[derive(Debug, Default)]
pub struct MemoryIndexStore {
    state: Mutex<MemoryState>,
    failing_stem: Option<String>,
}

impl MemoryIndexStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store whose writes of `stem` fail as if storage went away
    pub fn failing_on_stem(stem: impl Into<String>) -> Self {
        Self {
            state: Mutex::default(),
            failing_stem: Some(stem.into()),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemoryState>> {
        self.state
            .lock()
            .map_err(|_| Error::unavailable("memory store mutex poisoned"))
    }

    fn ops<'a>(&'a self, state: &'a mut MemoryState) -> MemoryOps<'a> {
        MemoryOps {
            state: RefCell::new(state),
            failing_stem: self.failing_stem.as_deref(),
        }
    }
}

impl IndexStore for MemoryIndexStore {
    fn transaction<T, F>(&self, work: F) -> Result<T>
    where
        F: FnOnce(&dyn IndexOps) -> Result<T>,
    {
        let mut guard = self.lock()?;
        let mut scratch = guard.clone();

        let value = work(&self.ops(&mut scratch))?;
        *guard = scratch;
        Ok(value)
    }

    fn autocommit<T, F>(&self, work: F) -> Result<T>
    where
        F: FnOnce(&dyn IndexOps) -> Result<T>,
    {
        let mut guard = self.lock()?;
        work(&self.ops(&mut guard))
    }

    fn reset(&self) -> Result<()> {
        *self.lock()? = MemoryState::default();
        Ok(())
    }
}

struct MemoryOps<'a> {
    state: RefCell<&'a mut MemoryState>,
    failing_stem: Option<&'a str>,
}

impl IndexOps for MemoryOps<'_> {
    fn find_page(&self, url: &str) -> Result<Option<Page>> {
        let state = self.state.borrow();
        Ok(state
            .page_ids
            .get(url)
            .and_then(|id| state.pages.get(id))
            .cloned())
    }

    fn save_page(&self, page: &mut Page) -> Result<()> {
        let mut state = self.state.borrow_mut();

        match page.id {
            Some(id) => {
                let Some(stored) = state.pages.get(&id).cloned() else {
                    return Err(Error::validation(format!("page {id} does not exist")));
                };
                if stored.url != page.url {
                    state.page_ids.remove(&stored.url);
                    state.page_ids.insert(page.url.clone(), id);
                }
                state.pages.insert(id, page.clone());
            }
            None => {
                let existing = state.page_ids.get(&page.url).copied();
                match existing {
                    Some(id) => {
                        let stored = state.pages.get_mut(&id).ok_or_else(|| {
                            Error::unavailable(format!("page index points at missing row {id}"))
                        })?;
                        if page.title.is_some() {
                            stored.title = page.title.clone();
                        }
                        if stored.created_at.is_none() {
                            stored.created_at = page.created_at;
                        }
                        stored.updated_at = page.updated_at;
                        page.id = Some(id);
                        page.created_at = stored.created_at;
                    }
                    None => {
                        state.last_page_id += 1;
                        let id = state.last_page_id;
                        page.id = Some(id);
                        state.page_ids.insert(page.url.clone(), id);
                        state.pages.insert(id, page.clone());
                    }
                }
            }
        }

        Ok(())
    }

    fn find_word(&self, stem: &str) -> Result<Option<Word>> {
        Ok(self.state.borrow().words.get(stem).cloned())
    }

    fn save_word(&self, word: &mut Word) -> Result<()> {
        if self.failing_stem == Some(word.stem.as_str()) {
            return Err(Error::unavailable(format!("write of word {} failed", word.stem)));
        }

        let mut state = self.state.borrow_mut();
        if let Some(stored) = state.words.get(&word.stem) {
            word.id = stored.id;
            return Ok(());
        }

        state.last_word_id += 1;
        word.id = Some(state.last_word_id);
        state.words.insert(word.stem.clone(), word.clone());
        Ok(())
    }

    fn insert_location(&self, word_id: i64, page_id: i64, position: u64) -> Result<Location> {
        let mut state = self.state.borrow_mut();
        if !state.pages.contains_key(&page_id) {
            return Err(Error::unavailable(format!("foreign key: page {page_id} missing")));
        }
        if !state.words.values().any(|w| w.id == Some(word_id)) {
            return Err(Error::unavailable(format!("foreign key: word {word_id} missing")));
        }

        state.last_location_id += 1;
        let location = Location {
            id: state.last_location_id,
            position,
            word_id,
            page_id,
        };
        state.locations.push(location);
        Ok(location)
    }

    fn delete_locations(&self, page: &Page) -> Result<usize> {
        let Some(page_id) = page.id else {
            return Err(Error::validation(format!("page {} has not been saved", page.url)));
        };
        let mut state = self.state.borrow_mut();
        let before = state.locations.len();
        state.locations.retain(|l| l.page_id != page_id);
        Ok(before - state.locations.len())
    }

    fn locations_for_page(&self, page: &Page) -> Result<Vec<Location>> {
        let Some(page_id) = page.id else {
            return Err(Error::validation(format!("page {} has not been saved", page.url)));
        };
        let state = self.state.borrow();
        Ok(state
            .locations
            .iter()
            .filter(|l| l.page_id == page_id)
            .copied()
            .collect())
    }

    fn pages_for_word(&self, stem: &str) -> Result<Vec<Page>> {
        let state = self.state.borrow();
        let Some(word_id) = state.words.get(stem).and_then(|w| w.id) else {
            return Ok(Vec::new());
        };

        let page_ids: BTreeSet<i64> = state
            .locations
            .iter()
            .filter(|l| l.word_id == word_id)
            .map(|l| l.page_id)
            .collect();

        Ok(page_ids
            .iter()
            .filter_map(|id| state.pages.get(id).cloned())
            .collect())
    }

    fn stats(&self) -> Result<IndexStats> {
        let state = self.state.borrow();
        Ok(IndexStats {
            pages: state.pages.len(),
            words: state.words.len(),
            locations: state.locations.len(),
        })
    }
}

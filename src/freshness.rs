//! Page freshness
//!
//! A page is fresh while the time since its last refresh is at most the
//! policy threshold (seven days by default). Nothing but `updated_at` is
//! stored, so changing the threshold takes effect immediately for every
//! page.

use chrono::{DateTime, TimeDelta, Utc};

use crate::error::{Error, Result};
use crate::models::Page;
use crate::storage::IndexOps;

/// Default threshold: 7 days in minutes
pub const DEFAULT_FRESHNESS_MINUTES: i64 = 7 * 24 * 60;

/// Stamp `page` as refreshed now and persist it.
///
/// A page without `created_at` gets it set to the same instant.
pub fn refresh(ops: &dyn IndexOps, page: &mut Page) -> Result<()> {
    refresh_at(ops, page, Utc::now())
}

/// [`refresh`] with an explicit clock
pub fn refresh_at(ops: &dyn IndexOps, page: &mut Page, now: DateTime<Utc>) -> Result<()> {
    page.updated_at = Some(now);
    if page.created_at.is_none() {
        page.created_at = Some(now);
    }
    ops.save_page(page)
}

/// Decides whether a page is due for re-crawling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FreshnessPolicy {
    threshold: TimeDelta,
}

impl Default for FreshnessPolicy {
    fn default() -> Self {
        Self::from_minutes(DEFAULT_FRESHNESS_MINUTES)
    }
}

impl FreshnessPolicy {
    pub fn from_minutes(minutes: i64) -> Self {
        Self {
            threshold: TimeDelta::try_minutes(minutes).unwrap_or(TimeDelta::MAX),
        }
    }

    pub fn threshold(&self) -> TimeDelta {
        self.threshold
    }

    /// Time since `page` was last refreshed
    pub fn age(&self, page: &Page) -> Result<TimeDelta> {
        self.age_at(page, Utc::now())
    }

    /// Time between the last refresh of `page` and `now`
    pub fn age_at(&self, page: &Page, now: DateTime<Utc>) -> Result<TimeDelta> {
        let updated_at = page.updated_at.ok_or_else(|| Error::NotRefreshed {
            url: page.url.clone(),
        })?;
        Ok(now - updated_at)
    }

    /// Age in whole minutes
    pub fn age_minutes(&self, page: &Page) -> Result<i64> {
        Ok(self.age(page)?.num_minutes())
    }

    /// Whether `page` is still fresh. A page never refreshed is stale.
    pub fn is_fresh(&self, page: &Page) -> bool {
        self.is_fresh_at(page, Utc::now())
    }

    pub fn is_fresh_at(&self, page: &Page, now: DateTime<Utc>) -> bool {
        match self.age_at(page, now) {
            Ok(age) => age <= self.threshold,
            Err(_) => false,
        }
    }
}

//! SQLite implementation of the index store
//!
//! One connection guarded by a `Mutex`. Transactions start with
//! `BEGIN IMMEDIATE` so a writer takes the database lock before its first
//! read, and another process writing the same file waits on the busy
//! timeout instead of failing mid-pipeline.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row, TransactionBehavior};

use super::{schema, IndexOps, IndexStore};
use crate::error::{Error, Result};
use crate::models::{IndexStats, Location, Page, Word};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const PAGE_COLUMNS: &str = "id, url, title, created_at, updated_at";

/// SQLite-backed [`IndexStore`]
pub struct SqliteIndexStore {
    conn: Mutex<Connection>,
}

impl SqliteIndexStore {
    /// Open (or create) the database at `path` and ensure the schema exists
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;

        let store = Self::from_connection(conn)?;
        tracing::info!(path = %path.display(), "SQLite index store opened");
        Ok(store)
    }

    /// Create an in-memory store (for testing)
    pub fn in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.busy_timeout(BUSY_TIMEOUT)?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        schema::create(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| Error::unavailable("SQLite connection mutex poisoned"))
    }
}

impl IndexStore for SqliteIndexStore {
    fn transaction<T, F>(&self, work: F) -> Result<T>
    where
        F: FnOnce(&dyn IndexOps) -> Result<T>,
    {
        let mut conn = self.lock()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        // Dropping `tx` without commit rolls it back
        let ops: &Connection = &tx;
        let value = work(ops)?;
        tx.commit()?;
        Ok(value)
    }

    fn autocommit<T, F>(&self, work: F) -> Result<T>
    where
        F: FnOnce(&dyn IndexOps) -> Result<T>,
    {
        let conn = self.lock()?;
        work(&*conn)
    }

    fn reset(&self) -> Result<()> {
        let mut conn = self.lock()?;
        schema::reset(&mut conn)?;
        tracing::warn!("index schema dropped and recreated");
        Ok(())
    }
}

fn format_timestamp(ts: Option<DateTime<Utc>>) -> Option<String> {
    ts.map(|t| t.to_rfc3339_opts(SecondsFormat::Nanos, true))
}

fn parse_timestamp(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<DateTime<Utc>>> {
    row.get::<_, Option<String>>(idx)?
        .map(|raw| {
            DateTime::parse_from_rfc3339(&raw)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
        })
        .transpose()
}

fn page_from_row(row: &Row<'_>) -> rusqlite::Result<Page> {
    Ok(Page {
        id: Some(row.get(0)?),
        url: row.get(1)?,
        title: row.get(2)?,
        created_at: parse_timestamp(row, 3)?,
        updated_at: parse_timestamp(row, 4)?,
    })
}

fn location_from_row(row: &Row<'_>) -> rusqlite::Result<Location> {
    let position: i64 = row.get(1)?;
    Ok(Location {
        id: row.get(0)?,
        position: u64::try_from(position)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(1, Type::Integer, Box::new(e)))?,
        word_id: row.get(2)?,
        page_id: row.get(3)?,
    })
}

fn page_id(page: &Page) -> Result<i64> {
    page.id
        .ok_or_else(|| Error::validation(format!("page {} has not been saved", page.url)))
}

impl IndexOps for Connection {
    fn find_page(&self, url: &str) -> Result<Option<Page>> {
        let page = self
            .query_row(
                &format!("SELECT {PAGE_COLUMNS} FROM pages WHERE url = ?1"),
                params![url],
                page_from_row,
            )
            .optional()?;

        Ok(page)
    }

    fn save_page(&self, page: &mut Page) -> Result<()> {
        let created_at = format_timestamp(page.created_at);
        let updated_at = format_timestamp(page.updated_at);

        match page.id {
            Some(id) => {
                let changed = self.execute(
                    "UPDATE pages SET url = ?1, title = ?2, created_at = ?3, updated_at = ?4
                     WHERE id = ?5",
                    params![page.url, page.title, created_at, updated_at, id],
                )?;
                if changed == 0 {
                    return Err(Error::validation(format!("page {id} does not exist")));
                }
            }
            None => {
                let (id, created_at) = self.query_row(
                    r#"
                    INSERT INTO pages (url, title, created_at, updated_at)
                    VALUES (?1, ?2, ?3, ?4)
                    ON CONFLICT(url) DO UPDATE SET
                        title = COALESCE(excluded.title, pages.title),
                        created_at = COALESCE(pages.created_at, excluded.created_at),
                        updated_at = excluded.updated_at
                    RETURNING id, created_at
                    "#,
                    params![page.url, page.title, created_at, updated_at],
                    |row| Ok((row.get::<_, i64>(0)?, parse_timestamp(row, 1)?)),
                )?;
                page.id = Some(id);
                page.created_at = created_at;
            }
        }

        Ok(())
    }

    fn find_word(&self, stem: &str) -> Result<Option<Word>> {
        let word = self
            .query_row(
                "SELECT id, stem FROM words WHERE stem = ?1",
                params![stem],
                |row| {
                    Ok(Word {
                        id: Some(row.get(0)?),
                        stem: row.get(1)?,
                    })
                },
            )
            .optional()?;

        Ok(word)
    }

    fn save_word(&self, word: &mut Word) -> Result<()> {
        // Another writer may have inserted the stem since it was resolved
        self.execute(
            "INSERT INTO words (stem) VALUES (?1) ON CONFLICT(stem) DO NOTHING",
            params![word.stem],
        )?;
        let id: i64 = self.query_row(
            "SELECT id FROM words WHERE stem = ?1",
            params![word.stem],
            |row| row.get(0),
        )?;
        word.id = Some(id);
        Ok(())
    }

    fn insert_location(&self, word_id: i64, page_id: i64, position: u64) -> Result<Location> {
        let stored = i64::try_from(position)
            .map_err(|_| Error::validation(format!("position {position} is out of range")))?;

        self.execute(
            "INSERT INTO locations (position, word_id, page_id) VALUES (?1, ?2, ?3)",
            params![stored, word_id, page_id],
        )?;

        Ok(Location {
            id: self.last_insert_rowid(),
            position,
            word_id,
            page_id,
        })
    }

    fn delete_locations(&self, page: &Page) -> Result<usize> {
        let removed = self.execute(
            "DELETE FROM locations WHERE page_id = ?1",
            params![page_id(page)?],
        )?;
        Ok(removed)
    }

    fn locations_for_page(&self, page: &Page) -> Result<Vec<Location>> {
        let mut stmt = self.prepare(
            "SELECT id, position, word_id, page_id FROM locations
             WHERE page_id = ?1 ORDER BY id",
        )?;
        let locations = stmt
            .query_map(params![page_id(page)?], location_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(locations)
    }

    fn pages_for_word(&self, stem: &str) -> Result<Vec<Page>> {
        let mut stmt = self.prepare(
            "SELECT p.id, p.url, p.title, p.created_at, p.updated_at FROM pages p
             WHERE p.id IN (
                 SELECT l.page_id FROM locations l
                 JOIN words w ON w.id = l.word_id
                 WHERE w.stem = ?1
             )
             ORDER BY p.id",
        )?;
        let pages = stmt
            .query_map(params![stem], page_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(pages)
    }

    fn stats(&self) -> Result<IndexStats> {
        let count = |table: &str| -> Result<usize> {
            let n: i64 = self.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
                row.get(0)
            })?;
            Ok(n as usize)
        };

        Ok(IndexStats {
            pages: count("pages")?,
            words: count("words")?,
            locations: count("locations")?,
        })
    }
}

//! SQLite schema for the word index

use rusqlite::Connection;

use crate::error::Result;

/// Tables and indexes, safe to run against an existing database
pub const CREATE_SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS pages (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        url TEXT NOT NULL UNIQUE,
        title TEXT,
        created_at TEXT,
        updated_at TEXT
    );

    CREATE TABLE IF NOT EXISTS words (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        stem TEXT NOT NULL UNIQUE
    );

    CREATE TABLE IF NOT EXISTS locations (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        position INTEGER NOT NULL CHECK (position >= 0),
        word_id INTEGER NOT NULL REFERENCES words(id),
        page_id INTEGER NOT NULL REFERENCES pages(id) ON DELETE CASCADE
    );

    CREATE INDEX IF NOT EXISTS idx_locations_page
        ON locations(page_id);

    CREATE INDEX IF NOT EXISTS idx_locations_word
        ON locations(word_id);
"#;

const DROP_SCHEMA: &str = r#"
    DROP TABLE IF EXISTS locations;
    DROP TABLE IF EXISTS words;
    DROP TABLE IF EXISTS pages;
"#;

/// Create the schema if it does not exist yet
pub fn create(conn: &Connection) -> Result<()> {
    conn.execute_batch(CREATE_SCHEMA)?;
    Ok(())
}

/// Drop every index table and recreate them empty, in one transaction
pub fn reset(conn: &mut Connection) -> Result<()> {
    let tx = conn.transaction()?;
    tx.execute_batch(DROP_SCHEMA)?;
    tx.execute_batch(CREATE_SCHEMA)?;
    tx.commit()?;
    Ok(())
}

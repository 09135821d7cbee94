//! Unified error handling for the saush crate
//!
//! Every fallible operation in the library returns [`Result`], whose error
//! side is the [`Error`] enum below. Errors are grouped into an
//! [`ErrorCategory`] so callers (the crawler, the CLI) can pick a handling
//! strategy without matching on every variant.
//!
//! # Usage
//!
//! ```rust,ignore
//! use saush::error::{Error, ErrorCategory};
//!
//! fn handle(err: Error) {
//!     if err.is_recoverable() {
//!         // the whole index_page call may be retried
//!     } else if err.category() == ErrorCategory::Validation {
//!         eprintln!("rejected: {err}");
//!     }
//! }
//! ```

use std::io;
use thiserror::Error;

/// Classification of errors for handling strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Input rejected before any write took place
    Validation,
    /// Persistence layer unreachable or a write failed
    Storage,
    /// Operation called on an entity in the wrong state
    Precondition,
    /// Configuration loading and validation errors
    Config,
}

impl ErrorCategory {
    /// Short human readable label
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Storage => "storage",
            Self::Precondition => "precondition",
            Self::Config => "config",
        }
    }
}

/// Unified error type for the saush crate
#[derive(Error, Debug)]
pub enum Error {
    /// Input failed validation (empty url, malformed stem, unsaved entity)
    #[error("Validation error: {0}")]
    Validation(String),

    /// SQLite reported an error
    #[error("Database error: {0}")]
    Database(#[source] rusqlite::Error),

    /// Storage could not be used for a reason other than an SQLite error
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// Freshness was queried on a page that was never refreshed
    #[error("Page {url} has never been refreshed")]
    NotRefreshed { url: String },

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// TOML deserialization errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl Error {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a storage-unavailable error
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::StorageUnavailable(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Get the error category for handling strategies
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Validation(_) => ErrorCategory::Validation,
            Self::Database(_) | Self::StorageUnavailable(_) => ErrorCategory::Storage,
            Self::NotRefreshed { .. } => ErrorCategory::Precondition,
            Self::Config(_) | Self::Io(_) | Self::Toml(_) => ErrorCategory::Config,
        }
    }

    /// Check if the failed operation can be retried as a whole.
    ///
    /// Storage failures roll back the enclosing transaction, so retrying
    /// an `index_page` call after one is safe.
    pub fn is_recoverable(&self) -> bool {
        matches!(self.category(), ErrorCategory::Storage)
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Self::Database(err)
    }
}

/// Result type alias using the unified Error type
pub type Result<T> = std::result::Result<T, Error>;

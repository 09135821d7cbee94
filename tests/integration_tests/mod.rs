//! Integration tests module
//!
//! End-to-end tests for the saush index, including:
//! - Complete normalize → resolve → record pipeline against SQLite
//! - Several writers sharing one database file
//! - Error handling and recovery scenarios

pub mod concurrency_test;
pub mod error_scenarios;
pub mod fixtures;
pub mod pipeline_test;

//! Integration tests entry point
//!
//! This file serves as the entry point for all integration tests.
//! It includes the integration_tests module which contains:
//! - End-to-end indexing pipeline tests
//! - Concurrent writer tests
//! - Error handling and rollback scenarios

mod common;
mod integration_tests;

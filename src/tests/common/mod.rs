//! Common Test Utilities
//!
//! Shared fixtures for the in-crate suites: temporary databases, word
//! entries, and helpers for waiting on background tasks.

pub mod fixtures;

pub use fixtures::*;

//! In-crate test suites.
//!
//! Unit tests for individual modules live beside the code; these suites
//! exercise several modules together against mocks, a temporary SQLite
//! database, or generated inputs.

mod common;
mod database;
mod property;

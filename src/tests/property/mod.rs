//! Property-based tests for Wordhoard
//!
//! Property tests verify invariants that should hold for all inputs, rather
//! than testing specific cases.
//!
//! ## Running Property Tests
//!
//! ```sh
//! cargo test property --release
//! ```
//!
//! ## Test Modules
//!
//! - `quiz_props`: Tests for the quiz session
//!   - Every word is drawn exactly once before completion
//!   - Options hold the correct meaning exactly once, are distinct, at most 4
//!   - Score never exceeds the number of answered questions
//!
//! - `pipeline_props`: Tests for the search validation pipeline
//!   - Short terms never produce a request and end denied
//!   - Admission holds iff the term is a case-insensitive suggestion
//!   - A burst of typing yields one request, for the final term
//!
//! By default, proptest runs 256 cases per property. This can be configured
//! via the `PROPTEST_CASES` environment variable.

mod pipeline_props;

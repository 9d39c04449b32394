//! Remote collaborators for suggestions and definitions.
//!
//! The core only depends on the two traits below. The HTTP implementations
//! talk to a Datamuse-compatible suggestion service and to the dictionary
//! backend.

pub mod error;
pub mod lookup;
pub mod suggest;

use async_trait::async_trait;

use crate::core::models::WordEntry;
use crate::core::search::script::SuggestionQuery;

pub use error::{ProviderError, Result};
pub use lookup::HttpDefinitionProvider;
pub use suggest::HttpSuggestionProvider;

/// Returns candidate words for a prefix or term.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SuggestionProvider: Send + Sync {
    /// Candidate words in the provider's ranking order.
    async fn query(&self, query: &SuggestionQuery) -> Result<Vec<String>>;
}

/// Resolves an exact word to its definition.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DefinitionProvider: Send + Sync {
    async fn lookup(&self, word: &str) -> Result<WordEntry>;
}

//! Incremental search validation.
//!
//! - `script`: picks the suggestion endpoint for a term
//! - `pipeline`: debounce, dedup and admission state machine
//! - `controller`: runs the pipeline's requests against the providers

pub mod controller;
pub mod pipeline;
pub mod script;

pub use controller::{SearchController, SearchUpdate};
pub use pipeline::{
    Admission, LookupRequest, PipelineConfig, SearchValidationPipeline, SuggestionRequest,
    LOOKUP_FAILED_MESSAGE,
};
pub use script::{classify, Script, SuggestionQuery};

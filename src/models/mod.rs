//! Core data models for PubMed search results.

mod author;
mod paper;
mod search;

pub use author::AuthorEntry;
pub use paper::{PaperRecord, NOT_AVAILABLE};
pub use search::{SearchQuery, DEFAULT_MAX_RESULTS};

//! Remote literature sources.
//!
//! Only PubMed is supported. [`PubMedSource`] wraps the two NCBI E-utilities
//! calls the pipeline needs (esearch, then esummary) and turns the summary
//! documents into [`PaperRecord`](crate::models::PaperRecord)s.

mod pubmed;

pub use pubmed::{PubMedSource, PUBMED_ESEARCH_URL, PUBMED_ESUMMARY_URL};

/// Errors that can occur when talking to a source
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Network or HTTP transport error
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with a non-success status
    #[error("API error: {0}")]
    Api(String),

    /// Response body could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),

    /// Other error
    #[error("Error: {0}")]
    Other(String),
}

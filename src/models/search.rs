//! Search request model.

use serde::{Deserialize, Serialize};

/// Default cap on the number of identifiers requested from esearch
pub const DEFAULT_MAX_RESULTS: usize = 10;

/// Search query parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    /// PubMed query string, passed through verbatim
    pub query: String,

    /// Maximum number of identifiers to request
    pub max_results: usize,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            query: String::new(),
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

impl SearchQuery {
    /// Create a new search query
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    /// Set maximum results
    pub fn max_results(mut self, max: usize) -> Self {
        self.max_results = max;
        self
    }
}

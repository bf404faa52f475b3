//! HTTP client utilities.

use reqwest::{Client, RequestBuilder};
use std::sync::Arc;

use crate::sources::SourceError;

/// Default user agent sent with every request
pub const DEFAULT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Shared HTTP client
///
/// No request timeout is set: a call blocks until the server answers or the
/// transport fails.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Arc<Client>,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self, SourceError> {
        Self::with_user_agent(DEFAULT_USER_AGENT)
    }

    /// Create a new HTTP client with a custom user agent
    pub fn with_user_agent(user_agent: &str) -> Result<Self, SourceError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|e| SourceError::Other(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client: Arc::new(client),
        })
    }

    /// Start a GET request
    pub fn get(&self, url: &str) -> RequestBuilder {
        self.client.get(url)
    }
}

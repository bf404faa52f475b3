//! # PubMed Affiliations
//!
//! Searches PubMed, pulls summary metadata for the matching papers, flags
//! authors whose affiliations look like pharmaceutical or biotech companies,
//! and writes the result as a CSV file.
//!
//! ## Architecture
//!
//! - [`models`]: Core data structures (PaperRecord, AuthorEntry, SearchQuery)
//! - [`sources`]: PubMed E-utilities client (esearch + esummary)
//! - [`classify`]: Affiliation heuristics
//! - [`utils`]: HTTP client and CSV export
//! - [`config`]: Configuration management
//! - [`ui`]: Terminal rendering for the command-line tool
//!
//! ```rust,no_run
//! use pubmed_affiliations::{PubMedSource, SearchQuery};
//! use pubmed_affiliations::utils::save_to_csv;
//! use std::path::Path;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let source = PubMedSource::new()?;
//! let papers = source
//!     .fetch_papers(&SearchQuery::new("monoclonal antibody").max_results(20))
//!     .await?;
//! save_to_csv(&papers, Path::new("output.csv"))?;
//! # Ok(())
//! # }
//! ```

pub mod classify;
pub mod config;
pub mod models;
pub mod sources;
pub mod ui;
pub mod utils;

// Re-export commonly used types
pub use models::{PaperRecord, SearchQuery};
pub use sources::{PubMedSource, SourceError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! Utility modules supporting the fetch pipeline.
//!
//! - [`HttpClient`]: shared reqwest client carrying the crate's user agent
//! - [`save_to_csv`] / [`write_csv`]: CSV export of [`PaperRecord`](crate::models::PaperRecord)s
//!
//! ```rust,no_run
//! use pubmed_affiliations::models::PaperRecord;
//! use pubmed_affiliations::utils::save_to_csv;
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let records = vec![PaperRecord::new("38000000").title("Example")];
//! save_to_csv(&records, Path::new("output.csv"))?;
//! # Ok(())
//! # }
//! ```

mod export;
mod http;

pub use export::{save_to_csv, write_csv, ExportError};
pub use http::{HttpClient, DEFAULT_USER_AGENT};

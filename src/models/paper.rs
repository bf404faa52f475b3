//! Output record for one PubMed paper.

use serde::{Deserialize, Serialize};

/// Placeholder written for any value PubMed did not supply.
pub const NOT_AVAILABLE: &str = "N/A";

/// A flattened paper row, ready for export
///
/// Field order is the column order of the exported file; the serde names are
/// the header labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperRecord {
    /// PubMed identifier (PMID)
    #[serde(rename = "PubmedID")]
    pub pubmed_id: String,

    /// Paper title
    #[serde(rename = "Title")]
    pub title: String,

    /// Publication date as reported by PubMed (free text, e.g. "2024 Mar 5")
    #[serde(rename = "Publication Date")]
    pub publication_date: String,

    /// Names of authors with a non-academic affiliation, comma-separated
    #[serde(rename = "Non-academic Authors")]
    pub non_academic_authors: String,

    /// Pharma/biotech affiliation strings, comma-separated
    #[serde(rename = "Company Affiliation(s)")]
    pub company_affiliations: String,

    /// Always [`NOT_AVAILABLE`]; esummary does not expose contact details
    #[serde(rename = "Corresponding Author Email")]
    pub corresponding_author_email: String,
}

impl PaperRecord {
    /// Column labels in export order
    pub const COLUMNS: [&'static str; 6] = [
        "PubmedID",
        "Title",
        "Publication Date",
        "Non-academic Authors",
        "Company Affiliation(s)",
        "Corresponding Author Email",
    ];

    /// Create a record with every optional value set to the unavailable marker
    pub fn new(pubmed_id: impl Into<String>) -> Self {
        Self {
            pubmed_id: pubmed_id.into(),
            title: NOT_AVAILABLE.to_string(),
            publication_date: NOT_AVAILABLE.to_string(),
            non_academic_authors: String::new(),
            company_affiliations: String::new(),
            corresponding_author_email: NOT_AVAILABLE.to_string(),
        }
    }

    /// Set the title
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the publication date
    pub fn publication_date(mut self, date: impl Into<String>) -> Self {
        self.publication_date = date.into();
        self
    }

    /// Set the non-academic author list
    pub fn non_academic_authors(mut self, authors: impl Into<String>) -> Self {
        self.non_academic_authors = authors.into();
        self
    }

    /// Set the company affiliation list
    pub fn company_affiliations(mut self, affiliations: impl Into<String>) -> Self {
        self.company_affiliations = affiliations.into();
        self
    }

    /// Whether any author was classified as company-affiliated
    pub fn has_company_affiliation(&self) -> bool {
        !self.company_affiliations.is_empty()
    }

    /// Row values in column order
    pub fn to_row(&self) -> [&str; 6] {
        [
            &self.pubmed_id,
            &self.title,
            &self.publication_date,
            &self.non_academic_authors,
            &self.company_affiliations,
            &self.corresponding_author_email,
        ]
    }

    /// PubMed landing page for this paper
    pub fn url(&self) -> String {
        format!("https://pubmed.ncbi.nlm.nih.gov/{}/", self.pubmed_id)
    }
}

//! Affiliation heuristics.
//!
//! Both classifiers are plain case-insensitive substring tests over the
//! affiliation text. They are computed independently, so an author may show up
//! in both outputs. Authors without a string affiliation never match either.

use crate::models::AuthorEntry;

/// Affiliation keywords marking a company (pharmaceutical or biotech) author.
pub const COMPANY_KEYWORDS: [&str; 2] = ["pharma", "biotech"];

/// Affiliation keywords marking an academic author.
pub const ACADEMIC_KEYWORDS: [&str; 2] = ["university", "lab"];

/// Separator used when joining names or affiliations into one field.
pub const LIST_SEPARATOR: &str = ", ";

fn contains_any(affiliation: &str, keywords: &[&str]) -> bool {
    let lowered = affiliation.to_lowercase();
    keywords.iter().any(|keyword| lowered.contains(keyword))
}

/// Whether an affiliation string names a pharma or biotech company.
pub fn is_company_affiliation(affiliation: &str) -> bool {
    contains_any(affiliation, &COMPANY_KEYWORDS)
}

/// Whether an affiliation string looks academic.
pub fn is_academic_affiliation(affiliation: &str) -> bool {
    contains_any(affiliation, &ACADEMIC_KEYWORDS)
}

/// Join the affiliations of company-affiliated authors, in author order.
pub fn company_affiliations(authors: &[AuthorEntry]) -> String {
    authors
        .iter()
        .filter_map(AuthorEntry::affiliation)
        .filter(|affiliation| is_company_affiliation(affiliation))
        .collect::<Vec<_>>()
        .join(LIST_SEPARATOR)
}

/// Join the names of authors whose affiliation is not academic, in author order.
///
/// Entries with an affiliation but no string name are skipped.
pub fn non_academic_authors(authors: &[AuthorEntry]) -> String {
    authors
        .iter()
        .filter(|author| {
            author
                .affiliation()
                .is_some_and(|affiliation| !is_academic_affiliation(affiliation))
        })
        .filter_map(AuthorEntry::name)
        .collect::<Vec<_>>()
        .join(LIST_SEPARATOR)
}

//! Terminal output for fetched papers.
//!
//! The CSV file is always the primary output; this module only renders an
//! optional preview on stdout plus short status lines.

use comfy_table::{Attribute, Cell, Table};
use owo_colors::OwoColorize;
use std::io::IsTerminal;
use std::path::Path;
use std::time::Duration;

use crate::models::PaperRecord;

/// Check if stdout is a terminal.
pub fn is_terminal() -> bool {
    std::io::stdout().is_terminal()
}

/// Status types for colored output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    Error,
    Warning,
    Search,
}

/// Status icons for different operations.
pub fn status_icon(status: Status) -> &'static str {
    match status {
        Status::Success => "✓",
        Status::Error => "✗",
        Status::Warning => "⚠",
        Status::Search => "🔍",
    }
}

/// Print search results header.
pub fn print_search_header(query: &str, count: usize, duration: Duration) {
    eprintln!(
        "{} Search results for: \"{}\"",
        status_icon(Status::Search).yellow().bold(),
        query.cyan().bold()
    );
    eprintln!(
        "{} Found {} papers in {:.2}s",
        "─".repeat(30).dimmed(),
        count.to_string().green().bold(),
        duration.as_secs_f64()
    );
}

/// Report that the search matched nothing.
pub fn print_no_results(query: &str) {
    eprintln!(
        "{} No papers found for \"{}\"",
        status_icon(Status::Warning).yellow().bold(),
        query
    );
}

/// Report where the CSV was written.
pub fn print_saved(path: &Path, rows: usize) {
    eprintln!(
        "{} Results saved to {} ({} rows)",
        status_icon(Status::Success).green().bold(),
        path.display().to_string().cyan(),
        rows
    );
}

/// Report a fatal error.
pub fn print_error(message: &str) {
    eprintln!("{} {}", status_icon(Status::Error).red().bold(), message);
}

/// Truncate text to fit within the specified width using unicode-aware truncation.
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if max_width <= 3 {
        return "...".to_string();
    }

    let char_widths: Vec<(char, usize)> = text
        .chars()
        .map(|c| (c, unicode_width::UnicodeWidthChar::width(c).unwrap_or(1)))
        .collect();

    let total_width: usize = char_widths.iter().map(|(_, w)| *w).sum();

    if total_width <= max_width {
        return text.to_string();
    }

    // Longest prefix that leaves room for the ellipsis
    let mut current_width = 0;
    let mut end_idx = 0;

    for (i, (_, w)) in char_widths.iter().enumerate() {
        if current_width + w > max_width - 3 {
            break;
        }
        current_width += w;
        end_idx = i + 1;
    }

    if end_idx == 0 {
        return "...".to_string();
    }

    let truncated: String = char_widths[..end_idx].iter().map(|(c, _)| *c).collect();
    format!("{}...", truncated)
}

/// Build a summary table of the records.
pub fn papers_table(papers: &[PaperRecord]) -> Table {
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.set_header(vec![
        Cell::new("PMID").add_attribute(Attribute::Bold),
        Cell::new("Title").add_attribute(Attribute::Bold),
        Cell::new("Date").add_attribute(Attribute::Bold),
        Cell::new("Non-academic Authors").add_attribute(Attribute::Bold),
        Cell::new("Company Affiliation(s)").add_attribute(Attribute::Bold),
    ]);

    for paper in papers {
        table.add_row(vec![
            Cell::new(&paper.pubmed_id),
            Cell::new(truncate_with_ellipsis(&paper.title, 50)),
            Cell::new(&paper.publication_date),
            Cell::new(truncate_with_ellipsis(&paper.non_academic_authors, 30)),
            Cell::new(truncate_with_ellipsis(&paper.company_affiliations, 40)),
        ]);
    }

    table
}

/// Plain-text listing, one block per paper.
pub fn papers_plain(papers: &[PaperRecord]) -> String {
    let mut out = String::new();
    for paper in papers {
        out.push_str(&format!("{} - {} ({})\n", paper.pubmed_id, paper.title, paper.publication_date));
        out.push_str(&format!("  URL: {}\n", paper.url()));
        if !paper.non_academic_authors.is_empty() {
            out.push_str(&format!("  Non-academic: {}\n", paper.non_academic_authors));
        }
        if paper.has_company_affiliation() {
            out.push_str(&format!("  Companies: {}\n", paper.company_affiliations));
        }
        out.push('\n');
    }
    out
}

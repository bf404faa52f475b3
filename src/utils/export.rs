//! CSV export of paper records.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::models::PaperRecord;

/// Errors that can occur while writing the export file
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Write the header row and one row per record to `writer`
///
/// The header is written even when `records` is empty. Fields containing a
/// comma, quote or newline are quoted.
pub fn write_csv<W: Write>(records: &[PaperRecord], writer: W) -> Result<(), ExportError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv_writer.write_record(PaperRecord::COLUMNS)?;
    for record in records {
        csv_writer.write_record(record.to_row())?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Save records to a CSV file, replacing any existing file at `path`
pub fn save_to_csv(records: &[PaperRecord], path: &Path) -> Result<(), ExportError> {
    let file = File::create(path)?;
    write_csv(records, file)?;

    tracing::debug!(path = %path.display(), rows = records.len(), "Results saved");
    Ok(())
}

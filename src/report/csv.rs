use super::ExportError;
use crate::analysis::{AnalysisRecord, ResultSet};
use std::path::Path;
use tracing::info;

/// Column order of the exported file.
pub const CSV_HEADERS: [&str; 4] = ["text", "sentiment", "confidence", "keywords"];

/// Write a `text,sentiment,confidence,keywords` file, one row per record.
pub fn write_csv(path: &Path, results: &ResultSet) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_path(path)?;

    writer.write_record(CSV_HEADERS)?;
    for record in results {
        writer.write_record([
            record.text.clone(),
            record.sentiment.to_string(),
            format!("{:.2}", record.confidence),
            record.keywords.clone(),
        ])?;
    }
    writer.flush().map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    info!(path = %path.display(), records = results.len(), "wrote CSV export");
    Ok(())
}

/// Re-parse an exported CSV file into a [`ResultSet`].
pub fn read_csv(path: &Path) -> Result<ResultSet, ExportError> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut records = Vec::new();
    for row in reader.deserialize() {
        let record: AnalysisRecord = row?;
        records.push(record);
    }
    Ok(ResultSet::from(records))
}

use super::ExportError;
use crate::analysis::ResultSet;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tracing::info;

/// Write the records as a pretty-printed JSON array.
pub fn write_json(path: &Path, results: &ResultSet) -> Result<(), ExportError> {
    let file = File::create(path).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::to_writer_pretty(BufWriter::new(file), &results.records)?;

    info!(path = %path.display(), records = results.len(), "wrote JSON export");
    Ok(())
}

//! Presentation and export of analysis results.
//!
//! The terminal reporter renders the dashboard view (results table plus a
//! label-distribution bar chart); the remaining modules write the ephemeral
//! export files. Every exporter consumes a [`ResultSet`] and owns nothing
//! beyond its output file.
//!
//! [`ResultSet`]: crate::analysis::ResultSet

pub mod csv;
pub mod json;
pub mod pdf;
pub mod terminal;

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV export failed: {0}")]
    Csv(#[from] ::csv::Error),

    #[error("JSON export failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("PDF export failed: {0}")]
    Pdf(String),
}

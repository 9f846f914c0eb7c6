//! Input boundary: turning raw user input into a list of texts to analyze.
//!
//! Three sources feed the analyzer: free-form multi-line text (each
//! non-blank line is one document), plain-text files with the same layout,
//! and CSV files carrying a `text` column. Failures here are recoverable:
//! the caller reports them and the session stays usable, and no partial text
//! list is produced from a file that failed to parse.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse CSV {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("CSV file must contain a 'text' column")]
    MissingTextColumn,
}

/// Split free-form input into one document per non-blank line.
pub fn split_lines(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Load texts from a file: CSV files must carry a `text` column (rows with
/// a missing or empty value are dropped); any other file is treated as plain
/// text, one document per non-blank line.
pub fn load_texts(path: &Path) -> Result<Vec<String>, InputError> {
    let texts = if path.extension().is_some_and(|ext| ext == "csv") {
        load_csv(path)?
    } else {
        load_plain(path)?
    };
    debug!(path = %path.display(), texts = texts.len(), "loaded input file");
    Ok(texts)
}

fn load_plain(path: &Path) -> Result<Vec<String>, InputError> {
    let content = fs::read_to_string(path).map_err(|source| InputError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(split_lines(&content))
}

fn load_csv(path: &Path) -> Result<Vec<String>, InputError> {
    let file = fs::File::open(path).map_err(|source| InputError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = csv::Reader::from_reader(file);

    let headers = reader.headers().map_err(|source| InputError::Csv {
        path: path.to_path_buf(),
        source,
    })?;
    let text_column = headers
        .iter()
        .position(|header| header == "text")
        .ok_or(InputError::MissingTextColumn)?;

    let mut texts = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| InputError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        match record.get(text_column).map(str::trim) {
            Some(text) if !text.is_empty() => texts.push(text.to_string()),
            _ => {}
        }
    }
    Ok(texts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn split_lines_drops_blank_lines_and_trims() {
        let raw = "I love this app!\n\n   The service was terrible.  \n\t\n";
        assert_eq!(
            split_lines(raw),
            vec!["I love this app!", "The service was terrible."]
        );
    }

    #[test]
    fn plain_text_file_is_one_document_per_line() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        writeln!(file, "first line\n\nsecond line").unwrap();

        let texts = load_texts(file.path()).unwrap();
        assert_eq!(texts, vec!["first line", "second line"]);
    }

    #[test]
    fn csv_text_column_is_extracted_and_empty_rows_dropped() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "id,text\n1,Great product\n2,\n3,Would not recommend").unwrap();

        let texts = load_texts(file.path()).unwrap();
        assert_eq!(texts, vec!["Great product", "Would not recommend"]);
    }

    #[test]
    fn csv_without_text_column_is_rejected() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "id,comment\n1,hello").unwrap();

        let err = load_texts(file.path()).unwrap_err();
        assert!(matches!(err, InputError::MissingTextColumn));
    }

    #[test]
    fn missing_file_reports_read_error() {
        let err = load_texts(Path::new("/definitely/not/here.txt")).unwrap_err();
        assert!(matches!(err, InputError::Read { .. }));
    }
}

use super::ExportError;
use crate::analysis::ResultSet;
use printpdf::{BuiltinFont, Mm, PdfDocument};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tracing::info;

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 20.0;
const TITLE_SIZE: f32 = 14.0;
const BODY_SIZE: f32 = 10.0;
const LINE_HEIGHT_MM: f32 = 5.0;
// Helvetica at 10pt fits roughly this many characters between the margins.
const WRAP_COLUMNS: usize = 95;

/// Write an A4 report listing each record as a labeled text block.
///
/// The built-in fonts cover the Windows-1252 encoding only; characters
/// outside it are replaced with `?` before rendering.
pub fn write_pdf(path: &Path, results: &ResultSet) -> Result<(), ExportError> {
    let (doc, first_page, first_layer) = PdfDocument::new(
        "Sentiment Analysis Report",
        Mm(PAGE_WIDTH_MM as _),
        Mm(PAGE_HEIGHT_MM as _),
        "report",
    );
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ExportError::Pdf(e.to_string()))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| ExportError::Pdf(e.to_string()))?;

    let mut layer = doc.get_page(first_page).get_layer(first_layer);
    let mut cursor_y = PAGE_HEIGHT_MM - MARGIN_MM;

    layer.use_text(
        "Sentiment Analysis Report",
        TITLE_SIZE as _,
        Mm((PAGE_WIDTH_MM / 2.0 - 35.0) as _),
        Mm(cursor_y as _),
        &bold,
    );
    cursor_y -= 2.0 * LINE_HEIGHT_MM;

    for record in results {
        let fields = [
            format!("Text: {}", record.text),
            format!("Sentiment: {}", record.sentiment),
            format!("Confidence: {:.2}", record.confidence),
            format!("Keywords: {}", record.keywords),
        ];

        for field in fields {
            for line in wrap_line(&encode_winansi(&field), WRAP_COLUMNS) {
                if cursor_y < MARGIN_MM {
                    let (page, page_layer) =
                        doc.add_page(Mm(PAGE_WIDTH_MM as _), Mm(PAGE_HEIGHT_MM as _), "report");
                    layer = doc.get_page(page).get_layer(page_layer);
                    cursor_y = PAGE_HEIGHT_MM - MARGIN_MM;
                }
                layer.use_text(line, BODY_SIZE as _, Mm(MARGIN_MM as _), Mm(cursor_y as _), &regular);
                cursor_y -= LINE_HEIGHT_MM;
            }
        }
        cursor_y -= LINE_HEIGHT_MM;
    }

    let file = File::create(path).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    doc.save(&mut BufWriter::new(file))
        .map_err(|e| ExportError::Pdf(e.to_string()))?;

    info!(path = %path.display(), records = results.len(), "wrote PDF export");
    Ok(())
}

/// Replace any character the built-in fonts cannot encode with `?`.
fn encode_winansi(text: &str) -> String {
    text.chars()
        .map(|c| if (c as u32) <= 0xFF { c } else { '?' })
        .collect()
}

/// Greedy word wrap; words longer than the line width are hard-split.
fn wrap_line(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if !current.is_empty() && current.chars().count() + 1 + word.chars().count() > width {
            lines.push(std::mem::take(&mut current));
        }
        if word.chars().count() > width {
            for chunk in word
                .chars()
                .collect::<Vec<_>>()
                .chunks(width)
                .map(|c| c.iter().collect::<String>())
            {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                current = chunk;
            }
        } else {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

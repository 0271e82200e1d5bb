//! JSON rendering of the MiniOCR model, for inspection and debugging.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::model::OcrDocument;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// The page hierarchy, indented
    #[default]
    Pretty,
    /// The page hierarchy on one line
    Compact,
    /// One flat record per word, one record per line (JSON Lines)
    Words,
}

/// A word together with its place in the hierarchy.
#[derive(Serialize)]
struct WordRecord<'a> {
    page: &'a str,
    block: usize,
    line: usize,
    coordinates: &'a str,
    text: &'a str,
}

/// Render a MiniOCR document as JSON.
pub fn to_json(doc: &OcrDocument, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(doc),
        JsonFormat::Compact => serde_json::to_string(doc),
        JsonFormat::Words => word_records(doc),
    };

    result.map_err(|e| {
        Error::Serialize(format!(
            "cannot encode {} pages as JSON: {}",
            doc.page_count(),
            e
        ))
    })
}

fn word_records(doc: &OcrDocument) -> serde_json::Result<String> {
    let mut out = String::new();
    for page in &doc.pages {
        for (block, b) in page.blocks.iter().enumerate() {
            for (line, l) in b.lines.iter().enumerate() {
                for word in &l.words {
                    let record = WordRecord {
                        page: &page.id,
                        block,
                        line,
                        coordinates: &word.coordinates,
                        text: word.text(),
                    };
                    out.push_str(&serde_json::to_string(&record)?);
                    out.push('\n');
                }
            }
        }
    }
    Ok(out)
}

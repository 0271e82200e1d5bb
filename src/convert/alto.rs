//! ALTO converter implementation.

use crate::error::Result;
use crate::model::OcrDocument;
use crate::parser::{AltoParser, ParseOptions};
use crate::render::to_miniocr;
use crate::sanitize::to_ascii;

use super::ConvertResult;

/// Converts ALTO text for one page into MiniOCR markup.
#[derive(Debug, Clone, Default)]
pub struct AltoConverter {
    options: ParseOptions,
}

impl AltoConverter {
    /// Create a converter with default parse options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a converter with custom parse options.
    pub fn with_options(options: ParseOptions) -> Self {
        Self { options }
    }

    /// Parse options in use.
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Build the MiniOCR model without serializing it.
    pub fn parse(&self, alto: &str, position: usize) -> Result<OcrDocument> {
        let ascii = to_ascii(alto);
        AltoParser::with_options(&ascii, position, self.options.clone()).parse()
    }

    /// Convert ALTO text for the OCR file at `position`.
    pub fn convert(&self, alto: &str, position: usize) -> Result<ConvertResult> {
        let doc = self.parse(alto, position)?;
        let markup = to_miniocr(&doc)?.replace('"', "'");

        Ok(ConvertResult {
            content: to_ascii(&markup),
            page_count: doc.page_count(),
            word_count: doc.word_count(),
        })
    }

    /// Convert raw ALTO bytes. Invalid UTF-8 sequences are dropped.
    pub fn convert_bytes(&self, alto: &[u8], position: usize) -> Result<ConvertResult> {
        self.convert(&String::from_utf8_lossy(alto), position)
    }
}

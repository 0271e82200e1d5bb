//! ALTO to MiniOCR conversion pipeline.
//!
//! Sanitize, tokenize, build, serialize, swap quotes, sanitize again. The
//! quote swap lets the markup travel inside a JSON string without colliding
//! with its delimiters.
//!
//! # Example
//!
//! ```
//! use miniocr::convert::AltoConverter;
//!
//! let alto = r#"<alto><Layout><Page><TextBlock><TextLine>
//!     <String CONTENT="Hello" HEIGHT="10" WIDTH="50" VPOS="5" HPOS="7"/>
//! </TextLine></TextBlock></Page></Layout></alto>"#;
//!
//! let result = AltoConverter::new().convert(alto, 0)?;
//! assert_eq!(result.word_count, 1);
//! assert!(result.content.starts_with("<ocr><p xml:id='Page.0'>"));
//! # Ok::<(), miniocr::Error>(())
//! ```

mod alto;

pub use alto::AltoConverter;

/// Result of converting one ALTO file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertResult {
    /// MiniOCR markup, ASCII only, single-quoted attributes
    pub content: String,

    /// Pages found in the input
    pub page_count: usize,

    /// Words found in the input
    pub word_count: usize,
}

impl ConvertResult {
    /// Get content length in bytes.
    pub fn content_len(&self) -> usize {
        self.content.len()
    }

    /// Check if the input contained no page at all.
    pub fn is_empty(&self) -> bool {
        self.page_count == 0
    }
}

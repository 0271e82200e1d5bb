//! # miniocr
//!
//! Streaming ALTO to MiniOCR conversion for full-text search indexing.
//!
//! This library turns page-level ALTO OCR files into the compact MiniOCR
//! hierarchy (page / block / line / word) and drives the indexing of whole
//! digitized documents described by IIIF manifests and METS files.
//!
//! ## Quick Start
//!
//! ```
//! use miniocr::{convert_alto, extract_ocr_files_from_bytes};
//!
//! fn main() -> miniocr::Result<()> {
//!     let mets = br#"<mets><file USE="ocr"><FLocat href="p1.xml"/></file></mets>"#;
//!     assert_eq!(extract_ocr_files_from_bytes(mets), vec!["p1.xml"]);
//!
//!     let alto = r#"<alto><Layout><Page><TextBlock><TextLine>
//!         <String CONTENT="Hello" HEIGHT="10" WIDTH="50" VPOS="5" HPOS="7"/>
//!     </TextLine></TextBlock></Page></Layout></alto>"#;
//!     let markup = convert_alto(alto, 0)?;
//!     assert_eq!(
//!         markup,
//!         "<ocr><p xml:id='Page.0'><b><l><w x='10 50 5 7'>Hello </w></l></b></p></ocr>"
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Single-pass parsing**: ALTO and METS are tokenized once, forward only
//! - **Synthetic page ids**: pages are numbered by their position in the
//!   document's OCR file list, not by ALTO ids
//! - **ASCII output**: input and output are sanitized for the index
//! - **IIIF orchestration**: manifest → annotations → METS → ALTO → Solr

pub mod convert;
pub mod detect;
pub mod error;
pub mod index;
pub mod model;
pub mod parser;
pub mod render;
pub mod sanitize;

// Re-export commonly used types
pub use convert::{AltoConverter, ConvertResult};
pub use detect::{detect_format_from_bytes, detect_format_from_path, XmlFormat};
pub use error::{Error, Result};
pub use index::{
    Fetcher, HttpFetcher, IndexMode, IndexOptions, IndexRecord, IndexReport, IndexWriter, Indexer,
    SolrWriter,
};
pub use model::{AnnotationMap, Block, Line, Manifest, OcrDocument, Page, Word};
pub use parser::{
    extract_ocr_files, extract_ocr_files_from_bytes, extract_ocr_files_from_path, parse_alto,
    ErrorMode, ParseOptions, WordAttributes,
};
pub use render::{to_json, to_miniocr, JsonFormat};
pub use sanitize::to_ascii;

use std::path::Path;

/// Convert one ALTO file to MiniOCR markup.
///
/// # Arguments
///
/// * `alto` - ALTO XML text for one page
/// * `position` - Zero-based index of the file in the document's OCR file list
///
/// # Example
///
/// ```
/// let markup = miniocr::convert_alto("<alto><Layout><Page/></Layout></alto>", 2).unwrap();
/// assert_eq!(markup, "<ocr><p xml:id='Page.2'></p></ocr>");
/// ```
pub fn convert_alto(alto: &str, position: usize) -> Result<String> {
    convert_alto_with_options(alto, position, &ParseOptions::default())
}

/// Convert one ALTO file to MiniOCR markup with custom options.
///
/// # Example
///
/// ```
/// use miniocr::{convert_alto_with_options, ParseOptions};
///
/// let result = convert_alto_with_options("<Page><TextLine/></Page>", 0, &ParseOptions::new().strict());
/// assert!(result.is_err());
/// ```
pub fn convert_alto_with_options(
    alto: &str,
    position: usize,
    options: &ParseOptions,
) -> Result<String> {
    let result = AltoConverter::with_options(options.clone()).convert(alto, position)?;
    Ok(result.content)
}

/// Convert an ALTO file on disk to MiniOCR markup.
///
/// Invalid UTF-8 sequences in the file are dropped.
pub fn convert_file<P: AsRef<Path>>(path: P, position: usize) -> Result<String> {
    let data = std::fs::read(path)?;
    let result = AltoConverter::new().convert_bytes(&data, position)?;
    Ok(result.content)
}

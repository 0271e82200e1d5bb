//! Streaming XML parsers.
//!
//! Both parsers make a single forward pass over the token stream with no
//! lookahead; the structure they build comes from start-tag order alone.

mod alto;
mod mets;
mod options;

pub use alto::{parse_alto, AltoParser};
pub use mets::{
    extract_ocr_files, extract_ocr_files_from_bytes, extract_ocr_files_from_path, OcrFileScanner,
};
pub use options::{ErrorMode, ParseOptions, WordAttributes};

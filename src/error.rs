//! Error types for the miniocr library.

use std::io;
use thiserror::Error;

/// Result type alias for miniocr operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while converting or indexing OCR content.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input is neither ALTO nor METS.
    #[error("Unknown file format: root element {0:?} is not ALTO or METS")]
    UnknownFormat(String),

    /// The XML tokenizer rejected the input.
    #[error("XML parsing error at byte {position}: {message}")]
    Xml {
        /// Byte offset reported by the tokenizer
        position: u64,
        /// Underlying cause
        message: String,
    },

    /// The ALTO token stream does not form a Page/Block/Line/Word hierarchy.
    #[error("Malformed ALTO structure: {0}")]
    Structure(String),

    /// Error writing MiniOCR markup.
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Error decoding a IIIF manifest or annotation list.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Transport failure while resolving a remote resource.
    #[error("HTTP request to {url} failed: {message}")]
    Http {
        /// Requested URL
        url: String,
        /// Underlying cause
        message: String,
    },

    /// A label required by the orchestrator is absent from the annotation list.
    #[error("Annotation not found: {0}")]
    MissingAnnotation(String),

    /// The search index rejected a write.
    #[error("solr indexing failed: {0}")]
    IndexWrite(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    pub(crate) fn xml(position: u64, err: impl std::fmt::Display) -> Self {
        Error::Xml {
            position,
            message: err.to_string(),
        }
    }

    pub(crate) fn http(url: &str, err: impl std::fmt::Display) -> Self {
        Error::Http {
            url: url.to_string(),
            message: err.to_string(),
        }
    }
}

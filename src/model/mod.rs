//! Document model types.
//!
//! Two families live here: the MiniOCR hierarchy produced by the ALTO
//! transducer, and the IIIF manifest/annotation-list types the indexing
//! orchestrator resolves before it can locate any OCR file.

mod document;
mod iiif;
mod page;

pub use document::OcrDocument;
pub use iiif::{AnnotationList, AnnotationMap, Manifest, Resource, ResourceAnnotation, SeeAlso};
pub use page::{Block, Line, Page, Word};

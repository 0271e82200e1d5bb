//! IIIF-driven indexing of OCR text.
//!
//! For one document identifier the [`Indexer`] resolves the IIIF manifest,
//! its annotation list and the METS file, then converts every OCR file the
//! METS lists and hands the MiniOCR markup to an [`IndexWriter`]. Remote
//! bytes come from a [`Fetcher`]. Both collaborators are traits so the
//! orchestration can run against the HTTP implementations in [`http`] or
//! against test doubles.
//!
//! The first hard failure aborts the rest of the document. Empty OCR
//! references and OCR files with empty content are skipped.

pub mod http;
mod options;
mod runner;

pub use http::{HttpFetcher, SolrWriter};
pub use options::{IndexMode, IndexOptions};
pub use runner::{IndexReport, Indexer, METS_LABEL};

use serde::Serialize;

use crate::error::Result;

/// Retrieves the bytes behind a URL.
pub trait Fetcher: Send + Sync {
    /// Fetch the resource at `url`.
    fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// Writes converted pages to the search index.
pub trait IndexWriter: Send + Sync {
    /// Write the record and make it visible immediately.
    fn write_full(&self, record: &IndexRecord<'_>) -> Result<()>;

    /// Write the record and leave the commit to the index.
    fn write_lazy(&self, record: &IndexRecord<'_>) -> Result<()>;
}

impl<T: Fetcher + ?Sized> Fetcher for &T {
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        (**self).fetch(url)
    }
}

impl<T: IndexWriter + ?Sized> IndexWriter for &T {
    fn write_full(&self, record: &IndexRecord<'_>) -> Result<()> {
        (**self).write_full(record)
    }

    fn write_lazy(&self, record: &IndexRecord<'_>) -> Result<()> {
        (**self).write_lazy(record)
    }
}

/// One converted OCR file on its way to the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IndexRecord<'a> {
    /// Document identifier the indexer was asked for
    pub document_id: &'a str,

    /// OCR file reference as listed in the METS file
    pub file: &'a str,

    /// MiniOCR markup
    pub ocr_text: &'a str,

    /// Manifest URI
    pub manifest_id: &'a str,
}

impl IndexRecord<'_> {
    /// Index document key, unique per OCR file of a document.
    pub fn key(&self) -> String {
        format!("{}/{}", self.document_id, self.file)
    }
}

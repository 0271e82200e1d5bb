//! Indexing orchestrator.

use rayon::prelude::*;

use crate::convert::AltoConverter;
use crate::error::{Error, Result};
use crate::model::{AnnotationList, AnnotationMap, Manifest};
use crate::parser::extract_ocr_files_from_bytes;

use super::{Fetcher, IndexMode, IndexOptions, IndexRecord, IndexWriter};

/// Annotation label of the METS file.
pub const METS_LABEL: &str = "mets.xml";

/// Outcome of indexing one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexReport {
    /// Document identifier
    pub document_id: String,

    /// Manifest URI
    pub manifest_id: String,

    /// OCR files listed in the METS file, empty references included
    pub listed_files: usize,

    /// OCR files converted and written
    pub indexed_files: usize,

    /// Empty references and empty OCR files
    pub skipped_files: usize,

    /// Words written across all files
    pub word_count: usize,
}

/// Drives manifest → annotations → METS → ALTO → MiniOCR → index.
pub struct Indexer<F, W> {
    fetcher: F,
    writer: W,
    converter: AltoConverter,
    options: IndexOptions,
}

impl<F: Fetcher, W: IndexWriter> Indexer<F, W> {
    /// Create an indexer with the default converter.
    pub fn new(fetcher: F, writer: W, options: IndexOptions) -> Self {
        Self {
            fetcher,
            writer,
            converter: AltoConverter::new(),
            options,
        }
    }

    /// Use a custom converter.
    pub fn with_converter(mut self, converter: AltoConverter) -> Self {
        self.converter = converter;
        self
    }

    /// Options in use.
    pub fn options(&self) -> &IndexOptions {
        &self.options
    }

    /// The index writer.
    pub fn writer(&self) -> &W {
        &self.writer
    }

    /// Resolve the manifest of a document.
    pub fn resolve_manifest(&self, id: &str) -> Result<Manifest> {
        let bytes = self.fetcher.fetch(&self.options.manifest_url(id))?;
        Manifest::from_slice(&bytes)
    }

    /// Resolve the annotation list linked from a manifest.
    pub fn resolve_annotations(&self, manifest: &Manifest) -> Result<AnnotationMap> {
        let bytes = self.fetcher.fetch(&manifest.see_also.id)?;
        let list = AnnotationList::from_slice(&bytes)?;
        Ok(AnnotationMap::from(&list))
    }

    /// Resolve the METS file and list its OCR file references.
    pub fn resolve_ocr_files(&self, annotations: &AnnotationMap) -> Result<Vec<String>> {
        let bytes = self.fetcher.fetch(annotations.require(METS_LABEL)?)?;
        Ok(extract_ocr_files_from_bytes(&bytes))
    }

    /// Index every OCR file of one document.
    pub fn index_document(&self, id: &str) -> Result<IndexReport> {
        let manifest = self.resolve_manifest(id)?;
        let annotations = self.resolve_annotations(&manifest)?;
        let files = self.resolve_ocr_files(&annotations)?;
        log::info!("Document {}: {} OCR files listed", id, files.len());

        self.index_files(id, &annotations, &files, &manifest.id)
    }

    /// Convert and write the listed OCR files in order.
    ///
    /// The position passed to the converter is the index in `files`, so
    /// skipped entries still consume a page number.
    pub fn index_files(
        &self,
        id: &str,
        annotations: &AnnotationMap,
        files: &[String],
        manifest_id: &str,
    ) -> Result<IndexReport> {
        let mut report = IndexReport {
            document_id: id.to_string(),
            manifest_id: manifest_id.to_string(),
            listed_files: files.len(),
            ..Default::default()
        };

        for (position, file) in files.iter().enumerate() {
            if file.is_empty() {
                report.skipped_files += 1;
                continue;
            }

            let alto = self.fetcher.fetch(annotations.require(file)?)?;
            if alto.is_empty() {
                log::debug!("Skipping {}: empty OCR file", file);
                report.skipped_files += 1;
                continue;
            }

            let converted = self.converter.convert_bytes(&alto, position)?;
            let record = IndexRecord {
                document_id: id,
                file,
                ocr_text: &converted.content,
                manifest_id,
            };
            self.write(&record)?;

            log::info!(
                "Indexed {} ({}) as page {}: {} words",
                file,
                self.options.index_mode,
                position,
                converted.word_count
            );
            report.indexed_files += 1;
            report.word_count += converted.word_count;
        }

        Ok(report)
    }

    /// Index several documents, returning results in input order.
    ///
    /// With `parallel` set, documents run concurrently on the rayon pool;
    /// files within a document are still processed in order and the first
    /// failure still aborts only that document.
    pub fn index_documents<S: AsRef<str> + Sync>(
        &self,
        ids: &[S],
    ) -> Vec<(String, Result<IndexReport>)> {
        let run = |id: &S| {
            let id = id.as_ref();
            let result = self.index_document(id);
            if let Err(ref e) = result {
                log::warn!("Document {} failed: {}", id, e);
            }
            (id.to_string(), result)
        };

        if self.options.parallel {
            ids.par_iter().map(run).collect()
        } else {
            ids.iter().map(run).collect()
        }
    }

    fn write(&self, record: &IndexRecord<'_>) -> Result<()> {
        let result = match self.options.index_mode {
            IndexMode::Full => self.writer.write_full(record),
            IndexMode::Lazy => self.writer.write_lazy(record),
        };
        result.map_err(|e| match e {
            Error::IndexWrite(_) => e,
            other => Error::IndexWrite(other.to_string()),
        })
    }
}

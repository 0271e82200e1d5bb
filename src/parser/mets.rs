//! METS file-list extraction.
//!
//! Scans a METS document for `file` elements flagged as OCR (any attribute
//! whose value is `ocr`) and collects the `href` of each `FLocat` inside
//! them. The scan degrades instead of failing: on the first tokenizer
//! error it stops and returns what it has found so far.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::Reader;

use crate::error::Result;

const FILE_ELEMENT: &[u8] = b"file";
const LOCATION_ELEMENT: &[u8] = b"FLocat";
const HREF_ATTRIBUTE: &[u8] = b"href";
const OCR_FLAG: &str = "ocr";

/// Single-flag state machine over METS start and end tags.
///
/// The flag is not a stack: nested `file` elements are not expected, and an
/// inner `</file>` clears the flag for the rest of the outer one.
#[derive(Debug, Default)]
pub struct OcrFileScanner {
    in_ocr_file: bool,
    hrefs: Vec<String>,
}

impl OcrFileScanner {
    /// Create a scanner with no results.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a start tag.
    pub fn start(&mut self, element: &BytesStart<'_>) -> quick_xml::Result<()> {
        match element.local_name().as_ref() {
            FILE_ELEMENT => {
                for attr in element.attributes() {
                    if attr?.unescape_value()? == OCR_FLAG {
                        self.in_ocr_file = true;
                    }
                }
            }
            LOCATION_ELEMENT if self.in_ocr_file => {
                for attr in element.attributes() {
                    let attr = attr?;
                    if attr
                        .key
                        .local_name()
                        .as_ref()
                        .eq_ignore_ascii_case(HREF_ATTRIBUTE)
                    {
                        self.hrefs.push(attr.unescape_value()?.into_owned());
                    }
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Feed an end tag.
    pub fn end(&mut self, element: &BytesEnd<'_>) {
        if element.local_name().as_ref() == FILE_ELEMENT {
            self.in_ocr_file = false;
        }
    }

    /// Whether the scanner is inside an OCR-flagged `file` element.
    pub fn in_ocr_file(&self) -> bool {
        self.in_ocr_file
    }

    /// Consume the scanner and return the collected hrefs in document order.
    pub fn finish(self) -> Vec<String> {
        self.hrefs
    }
}

/// Extract OCR file references from a METS stream.
///
/// Results keep document order and are not deduplicated. Malformed or
/// truncated input yields the references found before the error.
pub fn extract_ocr_files<R: BufRead>(reader: R) -> Vec<String> {
    let mut reader = Reader::from_reader(reader);
    reader.config_mut().expand_empty_elements = true;

    let mut scanner = OcrFileScanner::new();
    let mut buf = Vec::new();

    loop {
        let step = match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => scanner.start(&e),
            Ok(Event::End(e)) => {
                scanner.end(&e);
                Ok(())
            }
            Ok(Event::Eof) => break,
            Ok(_) => Ok(()),
            Err(e) => Err(e),
        };

        if let Err(e) = step {
            log::warn!(
                "METS scan stopped at byte {}: {}",
                reader.buffer_position(),
                e
            );
            break;
        }
        buf.clear();
    }

    let hrefs = scanner.finish();
    log::debug!("METS scan found {} OCR files", hrefs.len());
    hrefs
}

/// Extract OCR file references from METS bytes.
pub fn extract_ocr_files_from_bytes(data: &[u8]) -> Vec<String> {
    extract_ocr_files(data)
}

/// Extract OCR file references from a METS file on disk.
///
/// Only opening the file can fail; parse errors truncate the result.
pub fn extract_ocr_files_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let file = File::open(path)?;
    Ok(extract_ocr_files(BufReader::new(file)))
}

//! ALTO / METS format detection.
//!
//! Looks only at the local name of the root element; nothing is validated.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;

/// Kind of XML payload handled by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XmlFormat {
    /// ALTO page layout (one OCR file)
    Alto,
    /// METS structural metadata (document file list)
    Mets,
}

impl std::fmt::Display for XmlFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            XmlFormat::Alto => write!(f, "ALTO"),
            XmlFormat::Mets => write!(f, "METS"),
        }
    }
}

/// Detect the format of an XML file on disk.
///
/// # Example
/// ```no_run
/// use miniocr::detect::{detect_format_from_path, XmlFormat};
///
/// let format = detect_format_from_path("page1.xml").unwrap();
/// assert_eq!(format, XmlFormat::Alto);
/// ```
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<XmlFormat> {
    let file = File::open(path)?;
    detect_format(BufReader::new(file))
}

/// Detect the format of XML bytes.
///
/// # Returns
/// * `Ok(XmlFormat)` if the root element is `alto` or `mets`
/// * `Err(Error::UnknownFormat)` for any other root element, or none
/// * `Err(Error::Xml)` if the prolog cannot be tokenized
pub fn detect_format_from_bytes(data: &[u8]) -> Result<XmlFormat> {
    detect_format(data)
}

fn detect_format<R: BufRead>(reader: R) -> Result<XmlFormat> {
    let mut reader = Reader::from_reader(reader);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                let root = e.local_name();
                return match root.as_ref() {
                    b"alto" => Ok(XmlFormat::Alto),
                    b"mets" => Ok(XmlFormat::Mets),
                    other => Err(Error::UnknownFormat(
                        String::from_utf8_lossy(other).into_owned(),
                    )),
                };
            }
            Ok(Event::Eof) => return Err(Error::UnknownFormat(String::new())),
            Ok(_) => {}
            Err(e) => return Err(Error::xml(reader.buffer_position() as u64, e)),
        }
        buf.clear();
    }
}

/// Check if bytes look like an ALTO file.
pub fn is_alto_bytes(data: &[u8]) -> bool {
    matches!(detect_format_from_bytes(data), Ok(XmlFormat::Alto))
}

/// Check if bytes look like a METS file.
pub fn is_mets_bytes(data: &[u8]) -> bool {
    matches!(detect_format_from_bytes(data), Ok(XmlFormat::Mets))
}

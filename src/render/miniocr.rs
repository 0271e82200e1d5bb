//! MiniOCR markup writer.
//!
//! Output shape:
//!
//! ```text
//! <ocr><p xml:id="Page.0"><b><l><w x="H W V H">word </w>...</l></b></p></ocr>
//! ```
//!
//! No XML declaration is written and empty containers keep their end tag.

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::error::{Error, Result};
use crate::model::{Block, Line, OcrDocument, Page, Word};

/// Root element.
pub const ROOT_TAG: &str = "ocr";
/// Page element.
pub const PAGE_TAG: &str = "p";
/// Page identifier attribute.
pub const PAGE_ID_ATTR: &str = "xml:id";
/// Block element.
pub const BLOCK_TAG: &str = "b";
/// Line element.
pub const LINE_TAG: &str = "l";
/// Word element.
pub const WORD_TAG: &str = "w";
/// Word coordinate attribute.
pub const WORD_COORDS_ATTR: &str = "x";

/// Serialize a document to MiniOCR markup.
pub fn to_miniocr(doc: &OcrDocument) -> Result<String> {
    let mut writer = Writer::new(Vec::new());

    write(&mut writer, Event::Start(BytesStart::new(ROOT_TAG)))?;
    for page in &doc.pages {
        write_page(&mut writer, page)?;
    }
    write(&mut writer, Event::End(BytesEnd::new(ROOT_TAG)))?;

    String::from_utf8(writer.into_inner()).map_err(|e| Error::Serialize(e.to_string()))
}

fn write_page(writer: &mut Writer<Vec<u8>>, page: &Page) -> Result<()> {
    let start = BytesStart::new(PAGE_TAG).with_attributes([(PAGE_ID_ATTR, page.id.as_str())]);
    write(writer, Event::Start(start))?;
    for block in &page.blocks {
        write_block(writer, block)?;
    }
    write(writer, Event::End(BytesEnd::new(PAGE_TAG)))
}

fn write_block(writer: &mut Writer<Vec<u8>>, block: &Block) -> Result<()> {
    write(writer, Event::Start(BytesStart::new(BLOCK_TAG)))?;
    for line in &block.lines {
        write_line(writer, line)?;
    }
    write(writer, Event::End(BytesEnd::new(BLOCK_TAG)))
}

fn write_line(writer: &mut Writer<Vec<u8>>, line: &Line) -> Result<()> {
    write(writer, Event::Start(BytesStart::new(LINE_TAG)))?;
    for word in &line.words {
        write_word(writer, word)?;
    }
    write(writer, Event::End(BytesEnd::new(LINE_TAG)))
}

fn write_word(writer: &mut Writer<Vec<u8>>, word: &Word) -> Result<()> {
    let start =
        BytesStart::new(WORD_TAG).with_attributes([(WORD_COORDS_ATTR, word.coordinates.as_str())]);
    write(writer, Event::Start(start))?;
    write(writer, Event::Text(BytesText::new(&word.content)))?;
    write(writer, Event::End(BytesEnd::new(WORD_TAG)))
}

fn write(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<()> {
    writer
        .write_event(event)
        .map_err(|e| Error::Serialize(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document() {
        let doc = OcrDocument::new();
        assert_eq!(to_miniocr(&doc).unwrap(), "<ocr></ocr>");
    }

    #[test]
    fn test_full_hierarchy() {
        let mut doc = OcrDocument::new();
        let page = doc.open_page(1);
        let line = page.open_block().open_line();
        line.add_word(Word::new("Hello", ["10", "50", "5", "7"]));
        line.add_word(Word::new("world", ["10", "60", "5", "70"]));
        page.open_block();

        let markup = to_miniocr(&doc).unwrap();
        assert_eq!(
            markup,
            "<ocr><p xml:id=\"Page.1\"><b><l>\
             <w x=\"10 50 5 7\">Hello </w><w x=\"10 60 5 70\">world </w>\
             </l></b><b></b></p></ocr>"
        );
    }

    #[test]
    fn test_content_is_escaped() {
        let mut doc = OcrDocument::new();
        doc.open_page(0)
            .open_block()
            .open_line()
            .add_word(Word::new("a<b&c", ["1", "1", "1", "1"]));

        let markup = to_miniocr(&doc).unwrap();
        assert!(markup.contains("a&lt;b&amp;c "));
    }
}

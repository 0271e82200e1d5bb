//! ALTO tokenizer that builds the MiniOCR hierarchy.
//!
//! Five start tags drive the builder: `Page`, `ComposedBlock`, `TextBlock`,
//! `TextLine` and `String`. End tags only feed the balance check, so a
//! `ComposedBlock` adds no nesting and its blocks become direct children of
//! the page.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{Error, Result};
use crate::model::{OcrDocument, Word};

use super::options::{ErrorMode, ParseOptions, WordAttributes};

/// Number of leading `String` attributes read in positional mode.
const WORD_ATTRIBUTE_COUNT: usize = 5;

/// Attribute names read in named mode, in positional order.
const WORD_ATTRIBUTE_NAMES: [&[u8]; WORD_ATTRIBUTE_COUNT] =
    [b"CONTENT", b"HEIGHT", b"WIDTH", b"VPOS", b"HPOS"];

/// ALTO to MiniOCR model parser for a single OCR file.
pub struct AltoParser<'a> {
    text: &'a str,
    position: usize,
    options: ParseOptions,
}

impl<'a> AltoParser<'a> {
    /// Create a parser for the OCR file at `position` in the document's
    /// OCR file list.
    pub fn new(text: &'a str, position: usize) -> Self {
        Self::with_options(text, position, ParseOptions::default())
    }

    /// Create a parser with custom options.
    pub fn with_options(text: &'a str, position: usize, options: ParseOptions) -> Self {
        Self {
            text,
            position,
            options,
        }
    }

    /// Tokenize the input once and build the document.
    pub fn parse(self) -> Result<OcrDocument> {
        let mut reader = Reader::from_str(self.text);
        reader.config_mut().expand_empty_elements = true;

        let mut doc = OcrDocument::new();
        let mut depth = 0usize;

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) => {
                    depth += 1;
                    self.handle_start(&mut doc, &e)
                        .map_err(|err| self.locate(err, reader.buffer_position() as u64))?;
                }
                Ok(Event::End(_)) => depth = depth.saturating_sub(1),
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => return Err(Error::xml(reader.buffer_position() as u64, e)),
            }
        }

        if depth > 0 {
            return Err(Error::xml(
                reader.buffer_position() as u64,
                format!("unexpected end of input with {} unclosed elements", depth),
            ));
        }

        log::debug!(
            "Parsed ALTO for position {}: {} pages, {} words",
            self.position,
            doc.page_count(),
            doc.word_count()
        );
        Ok(doc)
    }

    fn handle_start(&self, doc: &mut OcrDocument, element: &BytesStart<'_>) -> Result<()> {
        match element.local_name().as_ref() {
            b"Page" => {
                doc.open_page(self.position);
            }
            b"ComposedBlock" => {}
            b"TextBlock" => {
                let page = doc
                    .current_page_mut()
                    .ok_or_else(|| Error::Structure("TextBlock before any Page".into()))?;
                page.open_block();
            }
            b"TextLine" => match doc.current_page_mut().and_then(|p| p.current_block_mut()) {
                Some(block) => {
                    block.open_line();
                }
                None => match self.options.error_mode {
                    ErrorMode::Strict => {
                        return Err(Error::Structure("TextLine outside of any TextBlock".into()))
                    }
                    ErrorMode::Lenient => {
                        log::debug!("Dropping TextLine with no enclosing TextBlock");
                    }
                },
            },
            b"String" => {
                let word = self.read_word(element)?;
                let line = doc
                    .current_page_mut()
                    .and_then(|p| p.current_block_mut())
                    .and_then(|b| b.current_line_mut())
                    .ok_or_else(|| Error::Structure("String outside of any TextLine".into()))?;
                line.add_word(word);
            }
            _ => {}
        }
        Ok(())
    }

    fn read_word(&self, element: &BytesStart<'_>) -> Result<Word> {
        let mut values: [Option<String>; WORD_ATTRIBUTE_COUNT] = Default::default();

        for (index, attr) in element.attributes().enumerate() {
            let attr = attr.map_err(|e| Error::Structure(format!("bad String attribute: {}", e)))?;
            let slot = match self.options.word_attributes {
                WordAttributes::Positional if index < WORD_ATTRIBUTE_COUNT => Some(index),
                WordAttributes::Positional => break,
                WordAttributes::Named => WORD_ATTRIBUTE_NAMES
                    .iter()
                    .position(|name| *name == attr.key.local_name().as_ref()),
            };
            if let Some(slot) = slot {
                let value = attr
                    .unescape_value()
                    .map_err(|e| Error::Structure(format!("bad String attribute: {}", e)))?;
                values[slot] = Some(value.into_owned());
            }
        }

        let [Some(content), Some(height), Some(width), Some(vpos), Some(hpos)] = values else {
            return Err(Error::Structure(match self.options.word_attributes {
                WordAttributes::Positional => format!(
                    "String needs at least {} attributes",
                    WORD_ATTRIBUTE_COUNT
                ),
                WordAttributes::Named => {
                    "String needs CONTENT, HEIGHT, WIDTH, VPOS and HPOS".to_string()
                }
            }));
        };

        Ok(Word::new(
            &content,
            [height.as_str(), width.as_str(), vpos.as_str(), hpos.as_str()],
        ))
    }

    fn locate(&self, err: Error, position: u64) -> Error {
        match err {
            Error::Structure(message) => {
                Error::Structure(format!("{} (byte {})", message, position))
            }
            other => other,
        }
    }
}

/// Parse one ALTO file into a MiniOCR document.
pub fn parse_alto(text: &str, position: usize, options: &ParseOptions) -> Result<OcrDocument> {
    AltoParser::with_options(text, position, options.clone()).parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<OcrDocument> {
        AltoParser::new(text, 0).parse()
    }

    #[test]
    fn test_single_page_hierarchy() {
        let alto = r#"<alto><Layout><Page ID="P1">
            <PrintSpace>
              <TextBlock ID="B1">
                <TextLine ID="L1">
                  <String CONTENT="Hello" HEIGHT="10" WIDTH="50" VPOS="5" HPOS="7"/>
                  <SP/>
                  <String CONTENT="world" HEIGHT="10" WIDTH="60" VPOS="5" HPOS="70"/>
                </TextLine>
              </TextBlock>
            </PrintSpace>
        </Page></Layout></alto>"#;

        let doc = AltoParser::new(alto, 3).parse().unwrap();
        assert_eq!(doc.page_count(), 1);

        let page = &doc.pages[0];
        assert_eq!(page.id, "Page.3");
        assert_eq!(page.blocks.len(), 1);
        assert_eq!(page.blocks[0].lines.len(), 1);

        let words = &page.blocks[0].lines[0].words;
        assert_eq!(words.len(), 2);
        assert_eq!(words[0].content, "Hello ");
        assert_eq!(words[0].coordinates, "10 50 5 7");
        assert_eq!(words[1].coordinates, "10 60 5 70");
    }

    #[test]
    fn test_positional_attributes_ignore_names() {
        let alto = r#"<Page><TextBlock><TextLine>
            <String A="txt" B="1" C="2" D="3" E="4" F="ignored"/>
        </TextLine></TextBlock></Page>"#;

        let doc = parse(alto).unwrap();
        let word = &doc.pages[0].blocks[0].lines[0].words[0];
        assert_eq!(word.content, "txt ");
        assert_eq!(word.coordinates, "1 2 3 4");
    }

    #[test]
    fn test_named_attributes() {
        let alto = r#"<Page><TextBlock><TextLine>
            <String ID="S1" HPOS="4" VPOS="3" WIDTH="2" HEIGHT="1" CONTENT="txt" WC="0.9"/>
        </TextLine></TextBlock></Page>"#;

        let options = ParseOptions::new().with_word_attributes(WordAttributes::Named);
        let doc = parse_alto(alto, 0, &options).unwrap();
        let word = &doc.pages[0].blocks[0].lines[0].words[0];
        assert_eq!(word.content, "txt ");
        assert_eq!(word.coordinates, "1 2 3 4");
    }

    #[test]
    fn test_block_starts_without_lines() {
        let alto = r#"<Page>
            <TextBlock><TextLine><String C="a" H="1" W="1" V="1" P="1"/></TextLine></TextBlock>
            <TextBlock/>
        </Page>"#;

        let doc = parse(alto).unwrap();
        let blocks = &doc.pages[0].blocks;
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].lines.len(), 1);
        assert!(blocks[1].lines.is_empty());
    }

    #[test]
    fn test_composed_block_is_flattened() {
        let alto = r#"<Page>
            <ComposedBlock>
              <TextBlock><TextLine/></TextBlock>
              <TextBlock><TextLine/><TextLine/></TextBlock>
            </ComposedBlock>
        </Page>"#;

        let doc = parse(alto).unwrap();
        let blocks = &doc.pages[0].blocks;
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[1].lines.len(), 2);
    }

    #[test]
    fn test_orphan_line_is_dropped() {
        let alto = r#"<Page><TextLine/><TextBlock/></Page>"#;
        let doc = parse(alto).unwrap();
        assert_eq!(doc.pages[0].blocks.len(), 1);
        assert!(doc.pages[0].blocks[0].lines.is_empty());
    }

    #[test]
    fn test_orphan_line_strict() {
        let alto = r#"<Page><TextLine/></Page>"#;
        let result = parse_alto(alto, 0, &ParseOptions::new().strict());
        assert!(matches!(result, Err(Error::Structure(_))));
    }

    #[test]
    fn test_word_without_line_fails() {
        let alto = r#"<Page><TextBlock><String C="a" H="1" W="1" V="1" P="1"/></TextBlock></Page>"#;
        assert!(matches!(parse(alto), Err(Error::Structure(_))));
    }

    #[test]
    fn test_word_after_new_block_fails() {
        let alto = r#"<Page>
            <TextBlock><TextLine/></TextBlock>
            <TextBlock><String C="a" H="1" W="1" V="1" P="1"/></TextBlock>
        </Page>"#;
        assert!(matches!(parse(alto), Err(Error::Structure(_))));
    }

    #[test]
    fn test_word_with_too_few_attributes_fails() {
        let alto = r#"<Page><TextBlock><TextLine><String CONTENT="a" HEIGHT="1"/></TextLine></TextBlock></Page>"#;
        let err = parse(alto).unwrap_err();
        assert!(err.to_string().contains("at least 5 attributes"));
    }

    #[test]
    fn test_block_before_page_fails() {
        assert!(matches!(parse("<TextBlock/>"), Err(Error::Structure(_))));
    }

    #[test]
    fn test_mismatched_tags_fail() {
        let result = parse("<Page><TextBlock></Page>");
        assert!(matches!(result, Err(Error::Xml { .. })));
    }

    #[test]
    fn test_truncated_input_fails() {
        let result = parse("<alto><Page><TextBlock>");
        assert!(matches!(result, Err(Error::Xml { .. })));
    }

    #[test]
    fn test_empty_input_has_no_pages() {
        let doc = parse("").unwrap();
        assert!(doc.is_empty());
    }

    #[test]
    fn test_escaped_content_is_unescaped() {
        let alto = r#"<Page><TextBlock><TextLine>
            <String CONTENT="a&amp;b" HEIGHT="1" WIDTH="1" VPOS="1" HPOS="1"/>
        </TextLine></TextBlock></Page>"#;
        let doc = parse(alto).unwrap();
        assert_eq!(doc.pages[0].blocks[0].lines[0].words[0].content, "a&b ");
    }
}

//! Integration tests for ALTO to MiniOCR conversion.

use miniocr::convert::AltoConverter;
use miniocr::{
    convert_alto, convert_alto_with_options, parse_alto, to_ascii, Error, ParseOptions,
    WordAttributes,
};

const TWO_BLOCKS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<alto xmlns="http://www.loc.gov/standards/alto/ns-v3#">
  <Description><MeasurementUnit>pixel</MeasurementUnit></Description>
  <Layout>
    <Page ID="P_0042" PHYSICAL_IMG_NR="42" HEIGHT="4000" WIDTH="3000">
      <TopMargin/>
      <PrintSpace>
        <TextBlock ID="TB_1">
          <TextLine ID="TL_1">
            <String CONTENT="First" HEIGHT="40" WIDTH="120" VPOS="300" HPOS="200"/>
            <SP/>
            <String CONTENT="line" HEIGHT="40" WIDTH="90" VPOS="300" HPOS="340"/>
          </TextLine>
          <TextLine ID="TL_2">
            <String CONTENT="Second" HEIGHT="40" WIDTH="150" VPOS="360" HPOS="200"/>
          </TextLine>
        </TextBlock>
        <ComposedBlock ID="CB_1">
          <TextBlock ID="TB_2">
            <TextLine ID="TL_3">
              <String CONTENT="Caption" HEIGHT="30" WIDTH="160" VPOS="900" HPOS="210"/>
            </TextLine>
          </TextBlock>
        </ComposedBlock>
      </PrintSpace>
    </Page>
  </Layout>
</alto>"#;

#[test]
fn test_page_id_follows_position() {
    for position in [0, 1, 41, 500] {
        let doc = parse_alto(TWO_BLOCKS, position, &ParseOptions::default()).unwrap();
        assert_eq!(doc.page_count(), 1);
        assert_eq!(doc.pages[0].id, format!("Page.{}", position));
    }
}

#[test]
fn test_lines_do_not_leak_between_blocks() {
    let doc = parse_alto(TWO_BLOCKS, 0, &ParseOptions::default()).unwrap();
    let blocks = &doc.pages[0].blocks;

    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0].lines.len(), 2);
    assert_eq!(blocks[1].lines.len(), 1);
    assert_eq!(blocks[1].lines[0].plain_text(), "Caption");
}

#[test]
fn test_full_markup() {
    let markup = convert_alto(TWO_BLOCKS, 7).unwrap();
    assert_eq!(
        markup,
        "<ocr><p xml:id='Page.7'>\
         <b>\
         <l><w x='40 120 300 200'>First </w><w x='40 90 300 340'>line </w></l>\
         <l><w x='40 150 360 200'>Second </w></l>\
         </b>\
         <b><l><w x='30 160 900 210'>Caption </w></l></b>\
         </p></ocr>"
    );
}

#[test]
fn test_orphan_line_is_dropped() {
    let alto = r#"<alto><Layout><Page>
        <TextLine><String CONTENT="lost" HEIGHT="1" WIDTH="1" VPOS="1" HPOS="1"/></TextLine>
    </Page></Layout></alto>"#;

    // The line is dropped, so the word that follows has no line to join.
    assert!(matches!(convert_alto(alto, 0), Err(Error::Structure(_))));

    let alto = r#"<alto><Layout><Page><TextLine/><TextBlock><TextLine/></TextBlock></Page></Layout></alto>"#;
    let doc = parse_alto(alto, 0, &ParseOptions::default()).unwrap();
    assert_eq!(doc.pages[0].blocks.len(), 1);
    assert_eq!(doc.pages[0].blocks[0].lines.len(), 1);
}

#[test]
fn test_strict_mode_rejects_orphan_line() {
    let alto = r#"<alto><Layout><Page><TextLine/></Page></Layout></alto>"#;
    let err = convert_alto_with_options(alto, 0, &ParseOptions::new().strict()).unwrap_err();
    assert!(err.to_string().contains("TextLine outside of any TextBlock"));
}

#[test]
fn test_word_coordinates_are_verbatim() {
    let alto = r#"<Page><TextBlock><TextLine>
        <String CONTENT="x" HEIGHT="12.5" WIDTH="0" VPOS="-3" HPOS="abc"/>
    </TextLine></TextBlock></Page>"#;
    let markup = convert_alto(alto, 0).unwrap();
    assert!(markup.contains("<w x='12.5 0 -3 abc'>x </w>"));
}

#[test]
fn test_named_attribute_mode() {
    let alto = r#"<Page><TextBlock><TextLine>
        <String ID="S1" HPOS="200" VPOS="300" WIDTH="120" HEIGHT="40" CONTENT="First"/>
    </TextLine></TextBlock></Page>"#;
    let options = ParseOptions::new().with_word_attributes(WordAttributes::Named);
    let markup = convert_alto_with_options(alto, 0, &options).unwrap();
    assert!(markup.contains("<w x='40 120 300 200'>First </w>"));
}

#[test]
fn test_output_has_no_double_quotes() {
    let alto = r#"<Page><TextBlock><TextLine>
        <String CONTENT="say &quot;hi&quot;" HEIGHT="1" WIDTH="1" VPOS="1" HPOS="1"/>
    </TextLine></TextBlock></Page>"#;
    let markup = convert_alto(alto, 0).unwrap();
    assert!(!markup.contains('"'));
    assert!(markup.contains("hi"));
}

#[test]
fn test_non_ascii_input_produces_ascii_output() {
    let alto = r#"<Page><TextBlock><TextLine>
        <String CONTENT="Ærø Ḱöln „Zitat“ 東京" HEIGHT="1" WIDTH="1" VPOS="1" HPOS="1"/>
    </TextLine></TextBlock></Page>"#;
    let result = AltoConverter::new().convert(alto, 0).unwrap();
    assert!(result.content.is_ascii());
    assert!(result.content.contains("AEro Koln"));
}

#[test]
fn test_full_width_markup_characters_convert() {
    let alto = "<Page><TextBlock><TextLine>\
        <String CONTENT=\"say \u{FF02}hi\u{FF02}\" HEIGHT=\"1\" WIDTH=\"1\" VPOS=\"1\" HPOS=\"1\"/>\
        <String CONTENT=\"R\u{FF06}D\" HEIGHT=\"2\" WIDTH=\"2\" VPOS=\"2\" HPOS=\"2\"/>\
        <String CONTENT=\"1\u{FF1C}2\u{FE65}0\" HEIGHT=\"3\" WIDTH=\"3\" VPOS=\"3\" HPOS=\"3\"/>\
        </TextLine></TextBlock></Page>";

    let markup = convert_alto(alto, 0).unwrap();
    assert!(markup.contains("<w x='1 1 1 1'>say hi </w>"));
    assert!(markup.contains("<w x='2 2 2 2'>R+D </w>"));
    assert!(markup.contains("<w x='3 3 3 3'>1(2)0 </w>"));
    assert!(markup.is_ascii());
}

#[test]
fn test_sanitizer_is_idempotent_on_ascii() {
    let markup = convert_alto(TWO_BLOCKS, 0).unwrap();
    assert_eq!(to_ascii(&markup), markup);
}

#[test]
fn test_parse_error_reports_cause() {
    let err = convert_alto("<alto><Layout><Page></Layout></alto>", 0).unwrap_err();
    match err {
        Error::Xml { message, .. } => assert!(!message.is_empty()),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_statistics() {
    let result = AltoConverter::new().convert(TWO_BLOCKS, 0).unwrap();
    assert_eq!(result.page_count, 1);
    assert_eq!(result.word_count, 4);
    assert_eq!(result.content_len(), result.content.len());
}

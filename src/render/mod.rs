//! Rendering module for converting MiniOCR documents to output formats.

mod json;
mod miniocr;

pub use json::{to_json, JsonFormat};
pub use miniocr::{
    to_miniocr, BLOCK_TAG, LINE_TAG, PAGE_ID_ATTR, PAGE_TAG, ROOT_TAG, WORD_COORDS_ATTR, WORD_TAG,
};

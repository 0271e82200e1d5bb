//! Page-level MiniOCR types.
//!
//! Every container starts with an empty child sequence and only its most
//! recently added child can still receive content, so the "current" element
//! at each level is simply the last one its owner holds.

use serde::{Deserialize, Serialize};

/// Prefix of the synthetic page identifier.
pub const PAGE_ID_PREFIX: &str = "Page.";

/// A single page of MiniOCR output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Synthetic identifier, `Page.<position>`
    pub id: String,

    /// Text blocks in document order
    pub blocks: Vec<Block>,
}

impl Page {
    /// Create an empty page for the OCR file at `position` in the
    /// document's OCR file list (zero-based).
    pub fn new(position: usize) -> Self {
        Self {
            id: format!("{}{}", PAGE_ID_PREFIX, position),
            blocks: Vec::new(),
        }
    }

    /// Append a new empty block and return it.
    pub fn open_block(&mut self) -> &mut Block {
        self.blocks.push(Block::default());
        let last = self.blocks.len() - 1;
        &mut self.blocks[last]
    }

    /// The block currently receiving lines.
    pub fn current_block_mut(&mut self) -> Option<&mut Block> {
        self.blocks.last_mut()
    }

    /// Number of blocks on the page.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Number of words across all blocks.
    pub fn word_count(&self) -> usize {
        self.blocks.iter().map(Block::word_count).sum()
    }

    /// Check if the page has no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Plain text of the page, one line of output per OCR line.
    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .flat_map(|b| b.lines.iter())
            .map(Line::plain_text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A text region within a page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Lines in document order
    pub lines: Vec<Line>,
}

impl Block {
    /// Append a new empty line and return it.
    pub fn open_line(&mut self) -> &mut Line {
        self.lines.push(Line::default());
        let last = self.lines.len() - 1;
        &mut self.lines[last]
    }

    /// The line currently receiving words.
    pub fn current_line_mut(&mut self) -> Option<&mut Line> {
        self.lines.last_mut()
    }

    /// Number of words across all lines.
    pub fn word_count(&self) -> usize {
        self.lines.iter().map(|l| l.words.len()).sum()
    }
}

/// A single line of text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    /// Words in reading order
    pub words: Vec<Word>,
}

impl Line {
    /// Add a word to the line.
    pub fn add_word(&mut self, word: Word) {
        self.words.push(word);
    }

    /// Concatenated word content, trailing space removed.
    pub fn plain_text(&self) -> String {
        let text: String = self.words.iter().map(|w| w.content.as_str()).collect();
        text.trim_end().to_string()
    }
}

/// A word with its position on the scanned page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    /// `"<height> <width> <vpos> <hpos>"`, copied verbatim from the source
    pub coordinates: String,

    /// Word text followed by a single space
    pub content: String,
}

impl Word {
    /// Build a word from its text and the `[height, width, vpos, hpos]`
    /// attribute values of the source element.
    pub fn new(text: &str, geometry: [&str; 4]) -> Self {
        Self {
            coordinates: geometry.join(" "),
            content: format!("{} ", text),
        }
    }

    /// Word text without the separating space.
    pub fn text(&self) -> &str {
        self.content.strip_suffix(' ').unwrap_or(&self.content)
    }
}

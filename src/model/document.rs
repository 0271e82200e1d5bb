//! Document-level MiniOCR types.

use super::Page;
use serde::{Deserialize, Serialize};

/// Root MiniOCR container built from one ALTO input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OcrDocument {
    /// Pages in document order
    pub pages: Vec<Page>,
}

impl OcrDocument {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new page for the OCR file at `position` and return it.
    pub fn open_page(&mut self, position: usize) -> &mut Page {
        self.pages.push(Page::new(position));
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    /// The page currently receiving blocks.
    pub fn current_page_mut(&mut self) -> Option<&mut Page> {
        self.pages.last_mut()
    }

    /// Get the number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Total number of words on all pages.
    pub fn word_count(&self) -> usize {
        self.pages.iter().map(Page::word_count).sum()
    }

    /// Check if the document has any pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Get plain text content of the entire document.
    pub fn plain_text(&self) -> String {
        self.pages
            .iter()
            .map(Page::plain_text)
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

//! Parsing options and configuration.

/// Options for parsing ALTO input.
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    /// How structural gaps in the token stream are handled
    pub error_mode: ErrorMode,

    /// How word content and geometry are read from `String` elements
    pub word_attributes: WordAttributes,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Reject lines that have no enclosing block.
    pub fn strict(mut self) -> Self {
        self.error_mode = ErrorMode::Strict;
        self
    }

    /// Drop lines that have no enclosing block.
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Set how `String` attributes are interpreted.
    pub fn with_word_attributes(mut self, attributes: WordAttributes) -> Self {
        self.word_attributes = attributes;
        self
    }
}

/// Handling of a `TextLine` that has no block to belong to.
///
/// A `String` without a line is an error in either mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail with a structure error
    Strict,
    /// Drop the line and continue
    #[default]
    Lenient,
}

/// Attribute layout of ALTO `String` elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WordAttributes {
    /// The first five attributes in source order are content, height,
    /// width, vpos and hpos, whatever their names
    #[default]
    Positional,
    /// Look up `CONTENT`, `HEIGHT`, `WIDTH`, `VPOS` and `HPOS` by name
    Named,
}

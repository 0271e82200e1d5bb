//! Indexing options and configuration.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Options for the indexing orchestrator and its HTTP collaborators.
#[derive(Debug, Clone)]
pub struct IndexOptions {
    /// Base URL of the IIIF service hosting manifests
    pub host: String,

    /// Base URL of the Solr server, e.g. `http://localhost:8983/solr`
    pub solr_url: String,

    /// Solr collection (core) receiving the OCR documents
    pub collection: String,

    /// Eager or deferred index writes
    pub index_mode: IndexMode,

    /// Commit deadline for lazy writes, in milliseconds
    pub commit_within_ms: u64,

    /// Per-request HTTP timeout in seconds
    pub timeout_secs: u64,

    /// Index independent documents concurrently
    pub parallel: bool,
}

impl IndexOptions {
    /// Create new index options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the IIIF host.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Set the Solr base URL.
    pub fn with_solr_url(mut self, url: impl Into<String>) -> Self {
        self.solr_url = url.into();
        self
    }

    /// Set the Solr collection.
    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }

    /// Set the index mode.
    pub fn with_index_mode(mut self, mode: IndexMode) -> Self {
        self.index_mode = mode;
        self
    }

    /// Set the commit deadline used by lazy writes.
    pub fn with_commit_within(mut self, ms: u64) -> Self {
        self.commit_within_ms = ms;
        self
    }

    /// Set the HTTP timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Enable or disable concurrent indexing of documents.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Manifest endpoint for a document identifier.
    pub fn manifest_url(&self, id: &str) -> String {
        format!("{}/iiif/{}/manifest", self.host.trim_end_matches('/'), id)
    }
}

impl Default for IndexOptions {
    fn default() -> Self {
        Self {
            host: "http://localhost:8080/server".to_string(),
            solr_url: "http://localhost:8983/solr".to_string(),
            collection: "ocr".to_string(),
            index_mode: IndexMode::Lazy,
            commit_within_ms: 10_000,
            timeout_secs: 30,
            parallel: false,
        }
    }
}

/// How converted pages are written to the search index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndexMode {
    /// Write and commit each page immediately
    Full,
    /// Write each page and let the index commit later
    #[default]
    Lazy,
}

impl IndexMode {
    /// Parse a mode selector. `full` selects eager writes; any other value
    /// selects lazy writes.
    pub fn from_setting(value: &str) -> Self {
        if value == "full" {
            IndexMode::Full
        } else {
            IndexMode::Lazy
        }
    }
}

impl FromStr for IndexMode {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_setting(s))
    }
}

impl fmt::Display for IndexMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexMode::Full => write!(f, "full"),
            IndexMode::Lazy => write!(f, "lazy"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_options_builder() {
        let options = IndexOptions::new()
            .with_host("https://repo.example.org/")
            .with_collection("books")
            .with_index_mode(IndexMode::Full)
            .with_parallel(true);

        assert_eq!(options.collection, "books");
        assert_eq!(options.index_mode, IndexMode::Full);
        assert!(options.parallel);
        assert_eq!(
            options.manifest_url("abc-123"),
            "https://repo.example.org/iiif/abc-123/manifest"
        );
    }

    #[test]
    fn test_default_options() {
        let options = IndexOptions::default();
        assert_eq!(options.index_mode, IndexMode::Lazy);
        assert!(!options.parallel);
    }

    #[test]
    fn test_index_mode_selector() {
        assert_eq!(IndexMode::from_setting("full"), IndexMode::Full);
        assert_eq!(IndexMode::from_setting("lazy"), IndexMode::Lazy);
        assert_eq!(IndexMode::from_setting("FULL"), IndexMode::Lazy);
        assert_eq!(IndexMode::from_setting(""), IndexMode::Lazy);
        assert_eq!("full".parse::<IndexMode>().unwrap(), IndexMode::Full);
    }
}

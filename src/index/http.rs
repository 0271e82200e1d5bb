//! HTTP implementations of the indexing collaborators.
//!
//! Both use blocking `reqwest` clients: the orchestrator is synchronous and
//! only ever waits on one request at a time per document.

use std::time::Duration;

use reqwest::blocking::Client;
use serde_json::json;

use crate::error::{Error, Result};

use super::{Fetcher, IndexOptions, IndexRecord, IndexWriter};

fn user_agent() -> String {
    format!("miniocr/{}", env!("CARGO_PKG_VERSION"))
}

fn build_client(timeout_secs: u64) -> Result<Client> {
    Client::builder()
        .user_agent(user_agent())
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| Error::Other(format!("failed to build HTTP client: {}", e)))
}

/// Fetches manifests, annotation lists, METS and ALTO files over HTTP.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Create a fetcher using the timeout from `options`.
    pub fn new(options: &IndexOptions) -> Result<Self> {
        Ok(Self {
            client: build_client(options.timeout_secs)?,
        })
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        log::debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| Error::http(url, e))?;
        let body = response.bytes().map_err(|e| Error::http(url, e))?;
        Ok(body.to_vec())
    }
}

/// Posts MiniOCR documents to a Solr collection's JSON update handler.
///
/// Eager writes commit immediately; lazy writes ask Solr to commit within
/// the configured deadline.
#[derive(Debug, Clone)]
pub struct SolrWriter {
    client: Client,
    update_url: String,
    commit_within_ms: u64,
}

impl SolrWriter {
    /// Create a writer for the collection named in `options`.
    pub fn new(options: &IndexOptions) -> Result<Self> {
        Ok(Self {
            client: build_client(options.timeout_secs)?,
            update_url: format!(
                "{}/{}/update",
                options.solr_url.trim_end_matches('/'),
                options.collection
            ),
            commit_within_ms: options.commit_within_ms,
        })
    }

    /// Update handler URL.
    pub fn update_url(&self) -> &str {
        &self.update_url
    }

    fn post(&self, record: &IndexRecord<'_>, query: &[(&str, String)]) -> Result<()> {
        let body = json!([{
            "id": record.key(),
            "document_id": record.document_id,
            "file": record.file,
            "manifest_url": record.manifest_id,
            "ocr_text": record.ocr_text,
        }]);

        self.client
            .post(&self.update_url)
            .query(query)
            .json(&body)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| Error::http(&self.update_url, e))?;
        Ok(())
    }
}

impl IndexWriter for SolrWriter {
    fn write_full(&self, record: &IndexRecord<'_>) -> Result<()> {
        self.post(record, &[("commit", "true".to_string())])
    }

    fn write_lazy(&self, record: &IndexRecord<'_>) -> Result<()> {
        self.post(
            record,
            &[("commitWithin", self.commit_within_ms.to_string())],
        )
    }
}

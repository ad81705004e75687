use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use super::kind::TermKind;
use crate::{Error, Result};

const FETCH_TIMEOUT: Duration = Duration::from_secs(20);

/// A fetched vocabulary document, untouched apart from JSON parsing.
#[derive(Debug, Clone)]
pub struct VocabDocument(Value);

impl VocabDocument {
    pub fn new(body: Value) -> Self {
        Self(body)
    }

    /// The document's term definitions.
    ///
    /// An empty `defines` array is rejected rather than treated as "delete
    /// everything": published documents always define at least one term, so
    /// an empty one means the source is broken.
    pub fn definitions(&self) -> Result<&[Value]> {
        let Some(defines) = self.0.get("defines") else {
            return Err(Error::MalformedVocab(
                "document has no `defines` array".to_string(),
            ));
        };
        let Some(definitions) = defines.as_array() else {
            return Err(Error::MalformedVocab(
                "document's `defines` is not an array".to_string(),
            ));
        };
        if definitions.is_empty() {
            return Err(Error::MalformedVocab(
                "document's `defines` is empty".to_string(),
            ));
        }
        Ok(definitions)
    }
}

/// Where vocabulary documents come from.
#[async_trait]
pub trait VocabSource: Send + Sync {
    async fn fetch(&self, kind: TermKind) -> Result<VocabDocument>;
}

/// Fetches published vocabulary documents over HTTP.
pub struct HttpVocabSource {
    http: reqwest::Client,
    base_url: String,
}

impl HttpVocabSource {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into();
        if base_url.trim().is_empty() {
            return Err(Error::InvalidInput(
                "vocabulary base url is empty".to_string(),
            ));
        }
        let http = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .expect("reqwest client");
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn document_url(&self, kind: TermKind) -> String {
        format!("{}/{}", self.base_url, kind.document())
    }
}

#[async_trait]
impl VocabSource for HttpVocabSource {
    #[tracing::instrument(level = "debug", skip(self))]
    async fn fetch(&self, kind: TermKind) -> Result<VocabDocument> {
        let url = self.document_url(kind);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| Error::vocab_fetch(url.as_str(), e))?;
        let body: Value = response
            .json()
            .await
            .map_err(|e| Error::vocab_fetch(url.as_str(), e))?;
        Ok(VocabDocument::new(body))
    }
}

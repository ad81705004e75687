use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;

use super::fetch::{VocabDocument, VocabSource};
use super::kind::TermKind;
use crate::{Error, Result};

/// In-memory VocabSource for tests. Kinds with no registered document fail
/// to fetch, mirroring an unreachable vocabulary host.
#[derive(Clone, Default)]
pub struct MemoryVocabSource {
    documents: Arc<Mutex<HashMap<TermKind, Value>>>,
}

impl MemoryVocabSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, kind: TermKind, document: Value) {
        self.documents.lock().await.insert(kind, document);
    }
}

#[async_trait]
impl VocabSource for MemoryVocabSource {
    async fn fetch(&self, kind: TermKind) -> Result<VocabDocument> {
        self.documents
            .lock()
            .await
            .get(&kind)
            .cloned()
            .map(VocabDocument::new)
            .ok_or_else(|| Error::VocabFetch {
                url: format!("memory:{}", kind.document()),
                source: "no document registered for this kind".into(),
            })
    }
}

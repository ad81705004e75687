use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;

use super::RecordStore;
use super::models::{CollectionOptions, GetOptions, LocalRecord, RecordCollection};
use crate::vocab::kind::TermKind;
use crate::{Error, Result};

/// In-memory RecordStore for local development and unit tests.
///
/// Mirrors the service's contract: lookups of unknown ids fail with the
/// kind's typed not-found error, partial updates clear null fields. Calls are
/// recorded for inspection, and individual ids can be made to fail their
/// lookup.
#[derive(Clone)]
pub struct MemoryRecordStore {
    kind: TermKind,
    records: Arc<Mutex<HashMap<String, LocalRecord>>>,
    creates: Arc<Mutex<Vec<LocalRecord>>>,
    updates: Arc<Mutex<Vec<(String, Value)>>>,
    gets: Arc<Mutex<Vec<String>>>,
    failing_ids: Arc<Mutex<HashSet<String>>>,
}

impl MemoryRecordStore {
    pub fn new(kind: TermKind) -> Self {
        Self {
            kind,
            records: Arc::new(Mutex::new(HashMap::new())),
            creates: Arc::new(Mutex::new(Vec::new())),
            updates: Arc::new(Mutex::new(Vec::new())),
            gets: Arc::new(Mutex::new(Vec::new())),
            failing_ids: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    /// Seed a record without recording a create call.
    pub async fn insert(&self, record: LocalRecord) {
        self.records.lock().await.insert(record.id.clone(), record);
    }

    /// Make lookups of `id` fail with an error other than not-found.
    pub async fn fail_gets_for(&self, id: impl Into<String>) {
        self.failing_ids.lock().await.insert(id.into());
    }

    /// Snapshot of the stored records (primarily for tests).
    pub async fn records(&self) -> Vec<LocalRecord> {
        let mut out: Vec<LocalRecord> = self.records.lock().await.values().cloned().collect();
        out.sort_by(|a, b| a.id.cmp(&b.id));
        out
    }

    /// Every record passed to `create`, in call order.
    pub async fn created(&self) -> Vec<LocalRecord> {
        self.creates.lock().await.clone()
    }

    /// Every `update` call as (id, updates), in call order.
    pub async fn updated(&self) -> Vec<(String, Value)> {
        self.updates.lock().await.clone()
    }

    /// Every id passed to `get`, in call order.
    pub async fn get_calls(&self) -> Vec<String> {
        self.gets.lock().await.clone()
    }

    fn not_found(&self, id: &str) -> Error {
        Error::Remote {
            name: self.kind.not_found_name().to_string(),
            message: format!("no {} found with id '{id}'", self.kind.name()),
        }
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn get(&self, id: &str, _options: GetOptions) -> Result<LocalRecord> {
        self.gets.lock().await.push(id.to_string());
        if self.failing_ids.lock().await.contains(id) {
            return Err(Error::Remote {
                name: "StoreUnavailable".to_string(),
                message: format!("simulated failure for '{id}'"),
            });
        }
        self.records
            .lock()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| self.not_found(id))
    }

    async fn get_collection(
        &self,
        _filter: Value,
        options: CollectionOptions,
    ) -> Result<RecordCollection> {
        let mut records = self.records().await;
        let total = records.len() as u64;
        if let Some(offset) = options.offset {
            records = records.split_off((offset as usize).min(records.len()));
        }
        if let Some(limit) = options.limit {
            records.truncate(limit as usize);
        }
        let count = records.len() as u64;
        Ok(RecordCollection {
            records,
            count,
            total,
        })
    }

    async fn create(&self, record: &LocalRecord) -> Result<LocalRecord> {
        self.creates.lock().await.push(record.clone());
        self.records
            .lock()
            .await
            .insert(record.id.clone(), record.clone());
        Ok(record.clone())
    }

    async fn update(&self, id: &str, updates: Value) -> Result<LocalRecord> {
        self.updates.lock().await.push((id.to_string(), updates.clone()));
        let mut records = self.records.lock().await;
        let Some(mut current) = records.get(id).cloned() else {
            return Err(self.not_found(id));
        };

        if let Value::Object(changes) = &updates {
            for (key, value) in changes {
                match (key.as_str(), value) {
                    ("label", Value::String(s)) => current.label = s.clone(),
                    ("description", Value::String(s)) => current.description = s.clone(),
                    ("symbol", Value::String(s)) => current.symbol = Some(s.clone()),
                    ("symbol", Value::Null) => current.symbol = None,
                    ("units", Value::Array(items)) => {
                        current.units = Some(
                            items
                                .iter()
                                .filter_map(Value::as_str)
                                .map(String::from)
                                .collect(),
                        )
                    }
                    ("units", Value::Null) => current.units = None,
                    ("listed", Value::Bool(b)) => current.listed = *b,
                    ("inCommonVocab", Value::Bool(b)) => current.in_common_vocab = *b,
                    _ => {}
                }
            }
        }

        records.insert(id.to_string(), current.clone());
        Ok(current)
    }
}

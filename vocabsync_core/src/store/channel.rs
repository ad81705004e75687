//! Channel-backed record store client.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};

use super::RecordStore;
use super::models::{CollectionOptions, GetOptions, LocalRecord, RecordCollection};
use crate::channel::RequestChannel;
use crate::vocab::kind::TermKind;
use crate::{Error, Result};

/// Record store client for one term kind, speaking that kind's per-operation
/// topics over the request/response channel.
#[derive(Clone)]
pub struct ChannelRecordStore {
    channel: Arc<dyn RequestChannel>,
    kind: TermKind,
}

#[derive(Debug, Deserialize)]
struct CollectionBody {
    #[serde(default)]
    data: Vec<LocalRecord>,
    meta: CollectionMeta,
}

#[derive(Debug, Deserialize)]
struct CollectionMeta {
    count: u64,
    total: u64,
}

impl ChannelRecordStore {
    pub fn new(channel: Arc<dyn RequestChannel>, kind: TermKind) -> Self {
        Self { channel, kind }
    }

    fn topic(&self, operation: &str) -> String {
        format!("{}.{operation}.request", self.kind.topic_stem())
    }

    async fn request_record(&self, topic: String, payload: Value) -> Result<LocalRecord> {
        let body = self.channel.request(&topic, payload).await?;
        serde_json::from_value(body)
            .map_err(|e| Error::channel(format!("decode {topic} response"), e))
    }
}

#[async_trait]
impl RecordStore for ChannelRecordStore {
    #[tracing::instrument(level = "debug", skip(self, options))]
    async fn get(&self, id: &str, options: GetOptions) -> Result<LocalRecord> {
        let payload = json!({ "where": { "id": id }, "options": options });
        self.request_record(self.topic("get"), payload).await
    }

    #[tracing::instrument(level = "debug", skip(self, filter, options))]
    async fn get_collection(
        &self,
        filter: Value,
        options: CollectionOptions,
    ) -> Result<RecordCollection> {
        let topic = format!("{}.get.request", self.kind.collection_topic_stem());
        let payload = json!({ "where": filter, "options": options });
        let body = self.channel.request(&topic, payload).await?;
        let body: CollectionBody = serde_json::from_value(body)
            .map_err(|e| Error::channel(format!("decode {topic} response"), e))?;
        Ok(RecordCollection {
            records: body.data,
            count: body.meta.count,
            total: body.meta.total,
        })
    }

    #[tracing::instrument(level = "debug", skip(self, record))]
    async fn create(&self, record: &LocalRecord) -> Result<LocalRecord> {
        let payload = json!({ "new": record });
        self.request_record(self.topic("create"), payload).await
    }

    #[tracing::instrument(level = "debug", skip(self, updates))]
    async fn update(&self, id: &str, updates: Value) -> Result<LocalRecord> {
        let payload = json!({ "where": { "id": id }, "updates": updates });
        self.request_record(self.topic("update"), payload).await
    }
}

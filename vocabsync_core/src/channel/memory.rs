use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;

use super::RequestChannel;
use crate::{Error, Result};

type Handler = Arc<dyn Fn(Value) -> Result<Value> + Send + Sync>;

/// In-memory RequestChannel for local development and unit tests.
///
/// Handlers are registered per topic and answer requests directly; every
/// request is recorded for later inspection.
#[derive(Clone, Default)]
pub struct MemoryChannel {
    handlers: Arc<Mutex<HashMap<String, Handler>>>,
    requests: Arc<Mutex<Vec<(String, Value)>>>,
}

impl MemoryChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the handler answering requests on `topic`.
    pub async fn on<F>(&self, topic: impl Into<String>, handler: F)
    where
        F: Fn(Value) -> Result<Value> + Send + Sync + 'static,
    {
        self.handlers
            .lock()
            .await
            .insert(topic.into(), Arc::new(handler));
    }

    /// Return a snapshot of every request seen so far (primarily for tests).
    pub async fn requests(&self) -> Vec<(String, Value)> {
        self.requests.lock().await.clone()
    }
}

#[async_trait]
impl RequestChannel for MemoryChannel {
    async fn request(&self, topic: &str, payload: Value) -> Result<Value> {
        self.requests
            .lock()
            .await
            .push((topic.to_string(), payload.clone()));
        let handler = self.handlers.lock().await.get(topic).cloned();
        match handler {
            Some(handler) => handler(payload),
            None => Err(Error::channel_message(format!(
                "no handler for topic {topic}"
            ))),
        }
    }
}

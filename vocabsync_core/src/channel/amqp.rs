//! AMQP-backed request/response channel.
//!
//! Requests publish to the default exchange with the operation topic as the
//! routing key. Responses come back on a per-process exclusive reply queue and
//! are matched to their request by correlation id.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures_util::StreamExt;
use lapin::{
    BasicProperties, Channel, Connection, ConnectionProperties, Consumer, options::*,
    types::FieldTable,
};
use serde_json::Value;
use tokio::sync::{Mutex, oneshot};
use uuid::Uuid;

use super::RequestChannel;
use crate::{Error, Result};

type PendingMap = Arc<Mutex<HashMap<String, oneshot::Sender<Result<Value>>>>>;

/// Transport settings for [`AmqpChannel`].
#[derive(Debug, Clone)]
pub struct AmqpConfig {
    pub url: String,
    /// Name this process reports to the broker.
    pub connection_name: String,
    /// How long to wait for a response before a request fails.
    pub request_timeout: Duration,
}

impl Default for AmqpConfig {
    fn default() -> Self {
        Self {
            url: "amqp://127.0.0.1:5672/%2f".to_string(),
            connection_name: "vocabsync".to_string(),
            request_timeout: Duration::from_secs(10),
        }
    }
}

impl AmqpConfig {
    #[tracing::instrument(level = "debug")]
    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(Error::InvalidInput("amqp url is empty".to_string()));
        }
        if self.connection_name.trim().is_empty() {
            return Err(Error::InvalidInput(
                "amqp connection name is empty".to_string(),
            ));
        }
        if self.request_timeout.is_zero() {
            return Err(Error::InvalidInput(
                "amqp request timeout must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

pub struct AmqpChannel {
    channel: Channel,
    reply_queue: String,
    pending: PendingMap,
    request_timeout: Duration,
    // Keeps the connection, and with it the reply consumer, alive for as long
    // as the channel is held.
    _connection: Connection,
}

impl AmqpChannel {
    /// Connect to the broker, declare the reply queue, and start the response
    /// dispatcher.
    #[tracing::instrument(level = "info", skip(cfg))]
    pub async fn connect(cfg: &AmqpConfig) -> Result<Self> {
        cfg.validate()?;

        let connection = Connection::connect(
            &cfg.url,
            ConnectionProperties::default()
                .with_connection_name(cfg.connection_name.as_str().into()),
        )
        .await
        .map_err(|e| Error::channel("amqp connect", e))?;
        let channel = connection
            .create_channel()
            .await
            .map_err(|e| Error::channel("amqp channel", e))?;

        // Broker-named, exclusive to this connection, gone when we are.
        let queue = channel
            .queue_declare(
                "",
                QueueDeclareOptions {
                    exclusive: true,
                    auto_delete: true,
                    ..Default::default()
                },
                FieldTable::default(),
            )
            .await
            .map_err(|e| Error::channel("amqp declare reply queue", e))?;
        let reply_queue = queue.name().as_str().to_string();

        let consumer = channel
            .basic_consume(
                &reply_queue,
                &cfg.connection_name,
                BasicConsumeOptions {
                    no_ack: true,
                    ..Default::default()
                },
                FieldTable::default(),
            )
            .await
            .map_err(|e| Error::channel("amqp consume replies", e))?;

        let pending: PendingMap = Arc::new(Mutex::new(HashMap::new()));
        tokio::spawn(dispatch_replies(consumer, pending.clone()));

        Ok(Self {
            channel,
            reply_queue,
            pending,
            request_timeout: cfg.request_timeout,
            _connection: connection,
        })
    }
}

#[async_trait]
impl RequestChannel for AmqpChannel {
    #[tracing::instrument(level = "debug", skip(self, payload))]
    async fn request(&self, topic: &str, payload: Value) -> Result<Value> {
        let correlation_id = Uuid::new_v4().to_string();
        let body = serde_json::to_vec(&payload)
            .map_err(|e| Error::channel(format!("serialize {topic} request"), e))?;

        let (tx, rx) = oneshot::channel();
        self.pending.lock().await.insert(correlation_id.clone(), tx);

        let published = self
            .channel
            .basic_publish(
                "",
                topic,
                BasicPublishOptions::default(),
                &body,
                BasicProperties::default()
                    .with_reply_to(self.reply_queue.as_str().into())
                    .with_correlation_id(correlation_id.as_str().into()),
            )
            .await;
        if let Err(e) = published {
            self.pending.lock().await.remove(&correlation_id);
            return Err(Error::channel(format!("amqp publish to {topic}"), e));
        }

        match tokio::time::timeout(self.request_timeout, rx).await {
            Ok(Ok(result)) => result,
            Ok(Err(_)) => Err(Error::channel_message(format!(
                "reply dispatcher dropped the request on {topic}"
            ))),
            Err(_) => {
                self.pending.lock().await.remove(&correlation_id);
                Err(Error::channel_message(format!(
                    "timed out after {:?} waiting for a response on {topic}",
                    self.request_timeout
                )))
            }
        }
    }
}

async fn dispatch_replies(mut consumer: Consumer, pending: PendingMap) {
    while let Some(delivery) = consumer.next().await {
        let delivery = match delivery {
            Ok(d) => d,
            Err(e) => {
                tracing::warn!(error = %e, "reply consumer failed, stopping dispatcher");
                break;
            }
        };

        let Some(correlation_id) = delivery
            .properties
            .correlation_id()
            .as_ref()
            .map(|id| id.as_str().to_string())
        else {
            tracing::warn!("discarding reply without correlation id");
            continue;
        };

        let Some(tx) = pending.lock().await.remove(&correlation_id) else {
            // Late reply after a timeout; nothing is waiting for it anymore.
            tracing::debug!(%correlation_id, "discarding unmatched reply");
            continue;
        };

        let result = serde_json::from_slice::<Value>(&delivery.data)
            .map_err(|e| Error::channel("decode reply body", e))
            .and_then(interpret_response);
        let _ = tx.send(result);
    }
}

/// Apply the response envelope: an object carrying an `error` key rejects with
/// the service's error name and message, anything else resolves as-is.
fn interpret_response(body: Value) -> Result<Value> {
    let Some(err) = body.get("error") else {
        return Ok(body);
    };
    let name = err
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or("Error")
        .to_string();
    let message = err
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    Err(Error::Remote { name, message })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn plain_bodies_resolve() {
        let body = json!({"id": "metre", "label": "metre"});
        assert_eq!(interpret_response(body.clone()).unwrap(), body);

        // Non-object bodies pass through too.
        let list = json!([1, 2, 3]);
        assert_eq!(interpret_response(list.clone()).unwrap(), list);
    }

    #[test]
    fn error_envelopes_reject_with_the_remote_name() {
        let body = json!({"error": {"name": "UnitNotFound", "message": "no unit 'metre'"}});
        let err = interpret_response(body).unwrap_err();
        match err {
            Error::Remote { name, message } => {
                assert_eq!(name, "UnitNotFound");
                assert_eq!(message, "no unit 'metre'");
            }
            other => panic!("expected remote error, got {other:?}"),
        }
    }

    #[test]
    fn unnamed_error_envelopes_get_a_generic_name() {
        let err = interpret_response(json!({"error": {}})).unwrap_err();
        match err {
            Error::Remote { name, message } => {
                assert_eq!(name, "Error");
                assert_eq!(message, "");
            }
            other => panic!("expected remote error, got {other:?}"),
        }
    }

    #[test]
    fn config_validation_rejects_blanks() {
        assert!(AmqpConfig::default().validate().is_ok());

        let cfg = AmqpConfig {
            url: "  ".to_string(),
            ..AmqpConfig::default()
        };
        assert!(cfg.validate().is_err());

        let cfg = AmqpConfig {
            request_timeout: Duration::ZERO,
            ..AmqpConfig::default()
        };
        assert!(cfg.validate().is_err());
    }
}

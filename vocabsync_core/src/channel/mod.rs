//! Asynchronous request/response messaging to the record store service.
//!
//! Every store operation is one request published on an operation topic and
//! matched to one response. The AMQP transport lives in [`amqp`]; [`memory`]
//! is a deterministic in-process stand-in for tests and local development.

pub mod amqp;
pub mod memory;

use async_trait::async_trait;
use serde_json::Value;

use crate::Result;

/// A single-request, single-response channel.
///
/// Implementations resolve with the response body, or reject with the remote
/// error the service answered with (see [`amqp`] for the envelope) or with a
/// transport failure of their own.
#[async_trait]
pub trait RequestChannel: Send + Sync {
    /// Publish `payload` on `topic` and await the matching response body.
    async fn request(&self, topic: &str, payload: Value) -> Result<Value>;
}

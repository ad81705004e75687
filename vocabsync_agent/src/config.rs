use std::time::Duration;

use anyhow::Context;

const DEFAULT_AMQP_URL: &str = "amqp://127.0.0.1:5672/%2f";
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;

/// Runtime configuration, read from the environment at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base url the vocabulary documents are published under.
    pub vocab_base_url: String,
    pub amqp_url: String,
    /// How long to wait for each record-service reply.
    pub request_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let vocab_base_url = std::env::var("VOCABSYNC_VOCAB_BASE_URL")
            .context("VOCABSYNC_VOCAB_BASE_URL must be set")?;
        let amqp_url = std::env::var("VOCABSYNC_AMQP_URL")
            .unwrap_or_else(|_| DEFAULT_AMQP_URL.to_string());
        let request_timeout_ms = match std::env::var("VOCABSYNC_REQUEST_TIMEOUT_MS") {
            Ok(raw) => raw
                .parse::<u64>()
                .context("VOCABSYNC_REQUEST_TIMEOUT_MS must be a whole number of milliseconds")?,
            Err(_) => DEFAULT_REQUEST_TIMEOUT_MS,
        };

        let config = Self {
            vocab_base_url,
            amqp_url,
            request_timeout: Duration::from_millis(request_timeout_ms),
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.vocab_base_url.trim().is_empty() {
            anyhow::bail!("VOCABSYNC_VOCAB_BASE_URL is empty");
        }
        if self.amqp_url.trim().is_empty() {
            anyhow::bail!("VOCABSYNC_AMQP_URL is empty");
        }
        if self.request_timeout.is_zero() {
            anyhow::bail!("VOCABSYNC_REQUEST_TIMEOUT_MS must be greater than zero");
        }
        Ok(())
    }
}

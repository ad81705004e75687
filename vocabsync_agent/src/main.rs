//! One-shot vocabulary synchronisation job.
//!
//! Fetches the published vocabulary documents, reconciles every term with
//! the record services over AMQP, logs a per-kind summary, and exits. The
//! job is best-effort by design: once it is up and running, sync failures
//! are logged rather than turned into a non-zero exit, so a scheduler does
//! not retry a run that already did all the work it could.

mod config;

use std::sync::Arc;

use vocabsync_core::channel::amqp::{AmqpChannel, AmqpConfig};
use vocabsync_core::{HttpVocabSource, SyncEngine};

use crate::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    vocabsync_core::o11y::init_global_from_env()?;
    log_panics();

    let config = AppConfig::from_env()?;
    tracing::info!(
        "Running {} now ({})",
        env!("CARGO_PKG_NAME"),
        chrono::Utc::now().to_rfc3339()
    );
    tracing::debug!(vocab_base_url = %config.vocab_base_url, "vocabulary source configured");

    let source = HttpVocabSource::new(config.vocab_base_url.clone())?;

    let amqp = AmqpConfig {
        url: config.amqp_url.clone(),
        request_timeout: config.request_timeout,
        ..AmqpConfig::default()
    };
    let channel = match AmqpChannel::connect(&amqp).await {
        Ok(channel) => channel,
        Err(e) => {
            // Best-effort job: failures are logged, the process still exits cleanly.
            tracing::error!(error = %e, "could not reach the message broker, nothing synced");
            return Ok(());
        }
    };

    let engine = SyncEngine::new(Arc::new(source), Arc::new(channel));
    let report = engine.sync_all().await;

    let totals = report.totals();
    tracing::debug!(
        created = totals.created,
        updated = totals.updated,
        unchanged = totals.unchanged,
        failed = totals.failed,
        skipped_kinds = report.failed_kinds().len(),
        "synchronisation finished"
    );
    Ok(())
}

fn log_panics() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        tracing::error!("panic: {info}");
        default_hook(info);
    }));
}

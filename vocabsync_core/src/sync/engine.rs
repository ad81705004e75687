use std::sync::Arc;

use super::batch::run_batch;
use super::outcome::SyncTally;
use crate::channel::RequestChannel;
use crate::store::channel::ChannelRecordStore;
use crate::vocab::fetch::VocabSource;
use crate::vocab::kind::TermKind;
use crate::Result;

/// Per-kind results of one full sync run.
#[derive(Debug, Default)]
pub struct SyncReport {
    results: Vec<(TermKind, Result<SyncTally>)>,
}

impl SyncReport {
    fn push(&mut self, kind: TermKind, result: Result<SyncTally>) {
        self.results.push((kind, result));
    }

    pub fn results(&self) -> &[(TermKind, Result<SyncTally>)] {
        &self.results
    }

    /// Combined tally over the kinds that ran to completion.
    pub fn totals(&self) -> SyncTally {
        let mut totals = SyncTally::default();
        for (_, result) in &self.results {
            if let Ok(tally) = result {
                totals.created += tally.created;
                totals.updated += tally.updated;
                totals.unchanged += tally.unchanged;
                totals.failed += tally.failed;
            }
        }
        totals
    }

    /// Kinds whose sync aborted before producing a tally.
    pub fn failed_kinds(&self) -> Vec<TermKind> {
        self.results
            .iter()
            .filter(|(_, result)| result.is_err())
            .map(|(kind, _)| *kind)
            .collect()
    }
}

/// Runs the whole sync: every term kind, in dependency order, each against
/// its own record service over the shared request channel.
pub struct SyncEngine {
    source: Arc<dyn VocabSource>,
    channel: Arc<dyn RequestChannel>,
}

impl SyncEngine {
    pub fn new(source: Arc<dyn VocabSource>, channel: Arc<dyn RequestChannel>) -> Self {
        Self { source, channel }
    }

    /// Sync every kind. A kind whose document cannot be fetched or parsed is
    /// recorded as failed and the run moves on to the next kind.
    #[tracing::instrument(level = "info", skip(self))]
    pub async fn sync_all(&self) -> SyncReport {
        let mut report = SyncReport::default();
        for kind in TermKind::ALL {
            let result = self.sync_kind(kind).await;
            if let Err(e) = &result {
                tracing::error!(
                    kind = kind.name(),
                    error = %e,
                    "sync failed for this kind, continuing with the next"
                );
            }
            report.push(kind, result);
        }
        report
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn sync_kind(&self, kind: TermKind) -> Result<SyncTally> {
        let document = self.source.fetch(kind).await?;
        let definitions = document.definitions()?;
        let store = ChannelRecordStore::new(self.channel.clone(), kind);
        let outcomes = run_batch(kind, &store, definitions).await;
        let tally = SyncTally::from_outcomes(&outcomes);
        tracing::info!("{}. {tally}", kind.summary_label());
        Ok(tally)
    }
}

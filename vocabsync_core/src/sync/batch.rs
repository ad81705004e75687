use futures_util::future::join_all;
use serde_json::Value;

use super::outcome::Outcome;
use super::reconciler::reconcile;
use crate::store::RecordStore;
use crate::vocab::kind::TermKind;
use crate::vocab::parse::parse_definition;
use crate::Result;

/// Sync every definition of one document concurrently.
///
/// Each definition gets an outcome: a failure is logged and tallied without
/// touching its siblings, so one bad definition cannot block the rest of the
/// document.
#[tracing::instrument(level = "debug", skip(store, definitions), fields(count = definitions.len()))]
pub async fn run_batch(
    kind: TermKind,
    store: &dyn RecordStore,
    definitions: &[Value],
) -> Vec<Outcome> {
    join_all(
        definitions
            .iter()
            .map(|definition| sync_definition(kind, store, definition)),
    )
    .await
}

async fn sync_definition(kind: TermKind, store: &dyn RecordStore, definition: &Value) -> Outcome {
    match try_sync_definition(kind, store, definition).await {
        Ok(outcome) => outcome,
        Err(e) => {
            let id = definition
                .get("@id")
                .and_then(Value::as_str)
                .unwrap_or_default();
            tracing::error!("Failed to sync {} '{}' ({e})", kind.name(), id);
            Outcome::Failed
        }
    }
}

async fn try_sync_definition(
    kind: TermKind,
    store: &dyn RecordStore,
    definition: &Value,
) -> Result<Outcome> {
    kind.schema().validate(definition)?;
    let incoming = parse_definition(kind, definition);
    reconcile(kind, store, &incoming).await
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::store::memory::MemoryRecordStore;

    fn unit(id: &str) -> Value {
        json!({
            "@id": format!("uo:{id}"),
            "@type": "uo:Unit",
            "label": id,
            "symbol": "x",
            "sameAs": [format!("http://qudt.org/vocab/unit/{id}")]
        })
    }

    #[tokio::test]
    async fn an_invalid_definition_fails_without_blocking_its_siblings() {
        let store = MemoryRecordStore::new(TermKind::Unit);
        let definitions = vec![
            unit("metre"),
            json!({ "@id": "uo:broken", "@type": "uo:Unit" }),
            unit("second"),
        ];

        let outcomes = run_batch(TermKind::Unit, &store, &definitions).await;

        assert_eq!(
            outcomes,
            vec![Outcome::Created, Outcome::Failed, Outcome::Created]
        );
        let created: Vec<_> = store
            .created()
            .await
            .into_iter()
            .map(|record| record.id)
            .collect();
        assert_eq!(created, vec!["metre", "second"]);
    }

    #[tokio::test]
    async fn a_second_run_over_the_same_document_changes_nothing() {
        let store = MemoryRecordStore::new(TermKind::Unit);
        let definitions = vec![unit("metre"), unit("second")];

        run_batch(TermKind::Unit, &store, &definitions).await;
        let outcomes = run_batch(TermKind::Unit, &store, &definitions).await;

        assert_eq!(outcomes, vec![Outcome::Unchanged, Outcome::Unchanged]);
        assert_eq!(store.created().await.len(), 2);
        assert!(store.updated().await.is_empty());
    }

    #[tokio::test]
    async fn a_store_failure_is_tallied_as_failed() {
        let store = MemoryRecordStore::new(TermKind::Unit);
        store.fail_gets_for("metre").await;
        let definitions = vec![unit("metre"), unit("second")];

        let outcomes = run_batch(TermKind::Unit, &store, &definitions).await;

        assert_eq!(outcomes, vec![Outcome::Failed, Outcome::Created]);
    }
}

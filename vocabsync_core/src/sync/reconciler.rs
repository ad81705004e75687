use serde_json::{Map, Value};

use super::outcome::Outcome;
use crate::store::RecordStore;
use crate::store::models::{GetOptions, LocalRecord};
use crate::vocab::kind::TermKind;
use crate::Result;

/// Bring the stored record for `incoming` in line with the vocabulary.
///
/// The vocabulary always wins: a record that differs in any comparison field
/// is overwritten with the vocabulary's values, including fields someone
/// edited locally. Fields outside the comparison set are left alone.
#[tracing::instrument(level = "debug", skip(store, incoming), fields(id = %incoming.id))]
pub async fn reconcile(
    kind: TermKind,
    store: &dyn RecordStore,
    incoming: &LocalRecord,
) -> Result<Outcome> {
    let current = match store.get(&incoming.id, GetOptions::default()).await {
        Ok(record) => record,
        Err(e) if e.is_not_found(kind.not_found_name()) => {
            store.create(incoming).await?;
            return Ok(Outcome::Created);
        }
        Err(e) => return Err(e),
    };

    let keys = kind.comparison_keys();
    let incoming_view = comparable_projection(incoming, keys);
    let current_view = comparable_projection(&current, keys);
    if incoming_view == current_view {
        return Ok(Outcome::Unchanged);
    }

    tracing::debug!(
        kind = kind.name(),
        id = %incoming.id,
        remote = ?incoming_view,
        local = ?current_view,
        "record no longer matches its vocabulary definition and needs updating"
    );
    let updates = update_payload(kind, incoming);
    store.update(&incoming.id, Value::Object(updates)).await?;
    Ok(Outcome::Updated)
}

/// The comparable slice of a record: its comparison-key fields, with absent
/// optionals omitted so that "no symbol" and "symbol missing" compare equal.
fn comparable_projection(record: &LocalRecord, keys: &[&str]) -> Map<String, Value> {
    let mut view = Map::new();
    for key in keys {
        let value = match *key {
            "label" => Some(Value::String(record.label.clone())),
            "description" => Some(Value::String(record.description.clone())),
            "symbol" => record.symbol.clone().map(Value::String),
            "units" => record.units.clone().map(|units| {
                Value::Array(units.into_iter().map(Value::String).collect())
            }),
            _ => None,
        };
        if let Some(value) = value {
            view.insert((*key).to_string(), value);
        }
    }
    view
}

/// The partial update that makes a stored record match `incoming`. Keys the
/// incoming record has no value for are sent as explicit nulls when the kind
/// calls for it, so a removed symbol is cleared rather than kept.
fn update_payload(kind: TermKind, incoming: &LocalRecord) -> Map<String, Value> {
    let mut updates = comparable_projection(incoming, kind.comparison_keys());
    for key in kind.nullable_keys() {
        updates.entry(*key).or_insert(Value::Null);
    }
    updates
}

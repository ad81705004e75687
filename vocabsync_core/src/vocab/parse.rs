use serde_json::Value;

use super::kind::TermKind;
use crate::store::models::LocalRecord;

/// Strip a JSON-LD prefix from a term id: `uo:metre` becomes `metre`.
///
/// Only the first `:` is a prefix separator, so `a:b:c` becomes `b:c`. Ids
/// without a prefix pass through unchanged.
pub fn strip_prefix_from_id(id: &str) -> &str {
    match id.split_once(':') {
        Some((_, rest)) => rest,
        None => id,
    }
}

/// Build the local record a validated definition should correspond to.
///
/// Records created by the sync are listed and marked as common-vocabulary so
/// the rest of the system can tell them apart from locally-authored ones.
pub fn parse_definition(kind: TermKind, definition: &Value) -> LocalRecord {
    let mut record = LocalRecord {
        id: strip_prefix_from_id(string_field(definition, "@id")).to_string(),
        label: string_field(definition, "label").to_string(),
        description: string_field(definition, "description").to_string(),
        listed: true,
        in_common_vocab: true,
        symbol: None,
        units: None,
    };

    match kind {
        TermKind::Unit => {
            // A blank symbol is treated the same as no symbol at all.
            let symbol = string_field(definition, "symbol");
            if !symbol.is_empty() {
                record.symbol = Some(symbol.to_string());
            }
        }
        TermKind::ObservableProperty => {
            let units = definition
                .get("recommendedUnits")
                .and_then(Value::as_array)
                .map(|items| {
                    items
                        .iter()
                        .filter_map(Value::as_str)
                        .map(|id| strip_prefix_from_id(id).to_string())
                        .collect()
                })
                .unwrap_or_default();
            record.units = Some(units);
        }
        _ => {}
    }

    record
}

fn string_field<'a>(definition: &'a Value, field: &str) -> &'a str {
    definition
        .get(field)
        .and_then(Value::as_str)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn prefixes_are_stripped_at_the_first_colon() {
        assert_eq!(strip_prefix_from_id("uo:metre"), "metre");
        assert_eq!(strip_prefix_from_id("metre"), "metre");
        assert_eq!(strip_prefix_from_id("a:b:c"), "b:c");
    }

    #[test]
    fn units_parse_with_symbol_and_stripped_id() {
        let record = parse_definition(
            TermKind::Unit,
            &json!({
                "@id": "uo:metre",
                "@type": "uo:Unit",
                "label": "metre",
                "symbol": "m",
                "description": "SI base unit of length"
            }),
        );
        assert_eq!(record.id, "metre");
        assert_eq!(record.label, "metre");
        assert_eq!(record.symbol.as_deref(), Some("m"));
        assert_eq!(record.description, "SI base unit of length");
        assert!(record.listed);
        assert!(record.in_common_vocab);
        assert_eq!(record.units, None);
    }

    #[test]
    fn a_blank_symbol_parses_as_no_symbol() {
        let record = parse_definition(
            TermKind::Unit,
            &json!({ "@id": "uo:ratio", "@type": "uo:Unit", "label": "ratio", "symbol": "" }),
        );
        assert_eq!(record.symbol, None);
    }

    #[test]
    fn observable_properties_strip_prefixes_from_recommended_units() {
        let record = parse_definition(
            TermKind::ObservableProperty,
            &json!({
                "@id": "uo:air-temperature",
                "@type": "uo:ObservableProperty",
                "label": "air temperature",
                "recommendedUnits": ["uo:kelvin", "uo:degree-celsius"]
            }),
        );
        assert_eq!(
            record.units,
            Some(vec!["kelvin".to_string(), "degree-celsius".to_string()])
        );
    }

    #[test]
    fn observable_properties_without_recommended_units_get_an_empty_list() {
        let record = parse_definition(
            TermKind::ObservableProperty,
            &json!({
                "@id": "uo:wind-direction",
                "@type": "uo:ObservableProperty",
                "label": "wind direction"
            }),
        );
        assert_eq!(record.units, Some(Vec::new()));
    }

    #[test]
    fn other_kinds_carry_neither_symbol_nor_units() {
        let record = parse_definition(
            TermKind::Discipline,
            &json!({
                "@id": "uo:meteorology",
                "@type": "uo:Discipline",
                "label": "meteorology",
                "symbol": "M",
                "recommendedUnits": ["uo:kelvin"]
            }),
        );
        assert_eq!(record.symbol, None);
        assert_eq!(record.units, None);
        assert_eq!(record.description, "");
    }
}

use serde::{Deserialize, Serialize};

/// A term record as held by the record store service.
///
/// Wire names are camelCase. Optional fields absent from a record are omitted
/// from its serialized form rather than sent as null; the change comparison
/// relies on that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalRecord {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub description: String,
    /// Shown in public listings.
    #[serde(default)]
    pub listed: bool,
    /// Marks the record as managed by the vocabulary sync; only such records
    /// are ever updated by it.
    #[serde(default)]
    pub in_common_vocab: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    /// Unit ids recommended for an observable property.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub units: Option<Vec<String>>,
}

/// Options for single-record reads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_deleted: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Options for collection reads.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<SortOrder>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_deleted: Option<bool>,
}

/// One page of records plus counts, as answered by collection reads.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordCollection {
    pub records: Vec<LocalRecord>,
    /// Records in this response.
    pub count: u64,
    /// Records matching the query overall.
    pub total: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn absent_optionals_are_omitted_from_the_wire() {
        let record = LocalRecord {
            id: "metre".to_string(),
            label: "metre".to_string(),
            description: String::new(),
            listed: true,
            in_common_vocab: true,
            symbol: None,
            units: None,
        };
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({
                "id": "metre",
                "label": "metre",
                "description": "",
                "listed": true,
                "inCommonVocab": true,
            })
        );
    }

    #[test]
    fn records_deserialize_without_the_defaulted_fields() {
        let record: LocalRecord =
            serde_json::from_value(json!({"id": "metre", "label": "metre"})).unwrap();
        assert_eq!(record.description, "");
        assert!(!record.listed);
        assert!(!record.in_common_vocab);
        assert_eq!(record.symbol, None);
        assert_eq!(record.units, None);
    }

    #[test]
    fn default_options_serialize_to_empty_objects() {
        assert_eq!(serde_json::to_value(GetOptions::default()).unwrap(), json!({}));
        assert_eq!(
            serde_json::to_value(CollectionOptions::default()).unwrap(),
            json!({})
        );
    }

    #[test]
    fn collection_options_use_camel_case_wire_names() {
        let options = CollectionOptions {
            limit: Some(10),
            offset: Some(20),
            sort_by: Some("label".to_string()),
            sort_order: Some(SortOrder::Desc),
            include_deleted: Some(true),
        };
        assert_eq!(
            serde_json::to_value(&options).unwrap(),
            json!({
                "limit": 10,
                "offset": 20,
                "sortBy": "label",
                "sortOrder": "desc",
                "includeDeleted": true,
            })
        );
    }
}

use std::fmt;

use serde_json::Value;

/// One problem found in a published definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: &'static str,
    pub message: String,
}

impl Violation {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" {}", self.field, self.message)
    }
}

/// All problems found in one definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violations(Vec<Violation>);

impl Violations {
    pub fn new(violations: Vec<Violation>) -> Self {
        Self(violations)
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .0
            .iter()
            .map(Violation::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "{joined}")
    }
}

impl std::error::Error for Violations {}

/// What a well-formed definition of one term kind looks like.
///
/// Only the fields the sync relies on are constrained. Definitions routinely
/// carry extra vocabulary fields, and unknown fields must stay valid so the
/// vocabulary can evolve without breaking deployed agents.
#[derive(Debug)]
pub struct KindSchema {
    /// Required `@type` value.
    pub type_tag: &'static str,
    /// Fields that may be absent but must be strings when present.
    pub optional_strings: &'static [&'static str],
    /// Fields that may be absent but must be arrays of strings when present.
    pub optional_string_lists: &'static [&'static str],
}

impl KindSchema {
    pub fn violations(&self, definition: &Value) -> Vec<Violation> {
        let Some(fields) = definition.as_object() else {
            return vec![Violation::new("definition", "must be an object")];
        };

        let mut violations = Vec::new();

        if let Some(violation) = check_required_string(fields.get("@id"), "@id") {
            violations.push(violation);
        }
        if let Some(violation) = check_required_string(fields.get("label"), "label") {
            violations.push(violation);
        }

        match fields.get("@type") {
            Some(Value::String(tag)) if tag == self.type_tag => {}
            _ => violations.push(Violation::new(
                "@type",
                format!("must be \"{}\"", self.type_tag),
            )),
        }

        for field in self.optional_strings {
            if let Some(value) = fields.get(*field) {
                if !value.is_string() {
                    violations.push(Violation::new(field, "must be a string"));
                }
            }
        }

        for field in self.optional_string_lists {
            if let Some(value) = fields.get(*field) {
                let all_strings = value.as_array().map(|items| items.iter().all(Value::is_string));
                if all_strings != Some(true) {
                    violations.push(Violation::new(field, "must be an array of strings"));
                }
            }
        }

        violations
    }

    pub fn validate(&self, definition: &Value) -> Result<(), Violations> {
        let violations = self.violations(definition);
        if violations.is_empty() {
            Ok(())
        } else {
            Err(Violations::new(violations))
        }
    }
}

fn check_required_string(value: Option<&Value>, field: &'static str) -> Option<Violation> {
    match value {
        None => Some(Violation::new(field, "is required")),
        Some(Value::String(s)) if s.is_empty() => {
            Some(Violation::new(field, "must not be empty"))
        }
        Some(Value::String(_)) => None,
        Some(_) => Some(Violation::new(field, "must be a string")),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::vocab::kind::TermKind;

    #[test]
    fn a_complete_unit_definition_passes() {
        let definition = json!({
            "@id": "uo:metre",
            "@type": "uo:Unit",
            "label": "metre",
            "symbol": "m",
            "description": "SI base unit of length",
            "sameAs": ["http://qudt.org/vocab/unit/M"],
            "term_status": "stable"
        });
        assert!(TermKind::Unit.schema().validate(&definition).is_ok());
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let definition = json!({
            "@id": "uo:metre",
            "@type": "uo:Unit",
            "label": "metre",
            "seeAlso": ["uo:kilometre"],
            "deprecated": false
        });
        assert!(TermKind::Unit.schema().validate(&definition).is_ok());
    }

    #[test]
    fn missing_label_is_reported() {
        let definition = json!({ "@id": "uo:metre", "@type": "uo:Unit" });
        let violations = TermKind::Unit.schema().violations(&definition);
        assert_eq!(violations, vec![Violation::new("label", "is required")]);
    }

    #[test]
    fn empty_id_is_reported() {
        let definition = json!({ "@id": "", "@type": "uo:Unit", "label": "metre" });
        let violations = TermKind::Unit.schema().violations(&definition);
        assert_eq!(violations, vec![Violation::new("@id", "must not be empty")]);
    }

    #[test]
    fn the_wrong_type_tag_is_reported() {
        let definition = json!({
            "@id": "uo:metre",
            "@type": "uo:Discipline",
            "label": "metre"
        });
        let violations = TermKind::Unit.schema().violations(&definition);
        assert_eq!(
            violations,
            vec![Violation::new("@type", "must be \"uo:Unit\"")]
        );
    }

    #[test]
    fn a_non_string_symbol_is_reported() {
        let definition = json!({
            "@id": "uo:metre",
            "@type": "uo:Unit",
            "label": "metre",
            "symbol": 7
        });
        let violations = TermKind::Unit.schema().violations(&definition);
        assert_eq!(violations, vec![Violation::new("symbol", "must be a string")]);
    }

    #[test]
    fn a_bare_string_same_as_is_reported() {
        let definition = json!({
            "@id": "uo:metre",
            "@type": "uo:Unit",
            "label": "metre",
            "sameAs": "http://qudt.org/vocab/unit/M"
        });
        let violations = TermKind::Unit.schema().violations(&definition);
        assert_eq!(
            violations,
            vec![Violation::new("sameAs", "must be an array of strings")]
        );
    }

    #[test]
    fn recommended_units_must_hold_strings() {
        let definition = json!({
            "@id": "uo:air-temperature",
            "@type": "uo:ObservableProperty",
            "label": "air temperature",
            "recommendedUnits": ["uo:kelvin", 3]
        });
        let violations = TermKind::ObservableProperty.schema().violations(&definition);
        assert_eq!(
            violations,
            vec![Violation::new("recommendedUnits", "must be an array of strings")]
        );
    }

    #[test]
    fn aggregations_do_not_constrain_same_as() {
        let definition = json!({
            "@id": "uo:average",
            "@type": "uo:Aggregation",
            "label": "average",
            "sameAs": ["anything", "goes", 1]
        });
        assert!(TermKind::Aggregation.schema().validate(&definition).is_ok());
    }

    #[test]
    fn non_objects_fail_with_a_single_violation() {
        let violations = TermKind::Unit.schema().violations(&json!("metre"));
        assert_eq!(
            violations,
            vec![Violation::new("definition", "must be an object")]
        );
    }

    #[test]
    fn violations_render_as_a_readable_list() {
        let definition = json!({ "@type": "uo:Unit", "symbol": 7 });
        let err = TermKind::Unit.schema().validate(&definition).unwrap_err();
        assert_eq!(
            err.to_string(),
            "\"@id\" is required; \"label\" is required; \"symbol\" must be a string"
        );
    }
}

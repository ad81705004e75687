use super::schema::KindSchema;

/// A kind of vocabulary term, with everything that varies per kind: the
/// document it is published in, the messaging topics of the service that
/// stores it, and the fields that participate in comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TermKind {
    Aggregation,
    Discipline,
    Unit,
    ObservableProperty,
    FeatureOfInterest,
}

const AGGREGATION_SCHEMA: KindSchema = KindSchema {
    type_tag: "uo:Aggregation",
    optional_strings: &["description", "term_status"],
    optional_string_lists: &[],
};

const DISCIPLINE_SCHEMA: KindSchema = KindSchema {
    type_tag: "uo:Discipline",
    optional_strings: &["description", "term_status"],
    optional_string_lists: &["sameAs"],
};

const UNIT_SCHEMA: KindSchema = KindSchema {
    type_tag: "uo:Unit",
    optional_strings: &["description", "term_status", "symbol"],
    optional_string_lists: &["sameAs"],
};

const OBSERVABLE_PROPERTY_SCHEMA: KindSchema = KindSchema {
    type_tag: "uo:ObservableProperty",
    optional_strings: &["description", "term_status"],
    optional_string_lists: &["sameAs", "recommendedUnits"],
};

const FEATURE_OF_INTEREST_SCHEMA: KindSchema = KindSchema {
    type_tag: "uo:FeatureOfInterest",
    optional_strings: &["description", "term_status"],
    optional_string_lists: &["sameAs"],
};

impl TermKind {
    /// Sync order. Units come before observable properties because the
    /// properties' `units` field references unit ids.
    pub const ALL: [TermKind; 5] = [
        TermKind::Aggregation,
        TermKind::Discipline,
        TermKind::Unit,
        TermKind::ObservableProperty,
        TermKind::FeatureOfInterest,
    ];

    /// Human-readable singular name, used in log messages.
    pub fn name(&self) -> &'static str {
        match self {
            TermKind::Aggregation => "aggregation",
            TermKind::Discipline => "discipline",
            TermKind::Unit => "unit",
            TermKind::ObservableProperty => "observable property",
            TermKind::FeatureOfInterest => "feature of interest",
        }
    }

    /// Stem of the single-record topics, e.g. `unit` in `unit.get.request`.
    pub fn topic_stem(&self) -> &'static str {
        match self {
            TermKind::Aggregation => "aggregation",
            TermKind::Discipline => "discipline",
            TermKind::Unit => "unit",
            TermKind::ObservableProperty => "observable-property",
            TermKind::FeatureOfInterest => "feature-of-interest",
        }
    }

    /// Stem of the collection topics, e.g. `units` in `units.get.request`.
    pub fn collection_topic_stem(&self) -> &'static str {
        match self {
            TermKind::Aggregation => "aggregations",
            TermKind::Discipline => "disciplines",
            TermKind::Unit => "units",
            TermKind::ObservableProperty => "observable-properties",
            TermKind::FeatureOfInterest => "features-of-interest",
        }
    }

    /// File name of the vocabulary document this kind is published in.
    pub fn document(&self) -> &'static str {
        match self {
            TermKind::Aggregation => "aggregations.json",
            TermKind::Discipline => "disciplines.json",
            TermKind::Unit => "units.json",
            TermKind::ObservableProperty => "observable-properties.json",
            TermKind::FeatureOfInterest => "features-of-interest.json",
        }
    }

    /// Expected `@type` tag of this kind's definitions.
    pub fn type_tag(&self) -> &'static str {
        self.schema().type_tag
    }

    /// Error name the record service raises when a lookup finds nothing.
    pub fn not_found_name(&self) -> &'static str {
        match self {
            TermKind::Aggregation => "AggregationNotFound",
            TermKind::Discipline => "DisciplineNotFound",
            TermKind::Unit => "UnitNotFound",
            TermKind::ObservableProperty => "ObservablePropertyNotFound",
            TermKind::FeatureOfInterest => "FeatureOfInterestNotFound",
        }
    }

    /// Label that opens this kind's summary log line.
    pub fn summary_label(&self) -> &'static str {
        match self {
            TermKind::Aggregation => "Aggregations",
            TermKind::Discipline => "Disciplines",
            TermKind::Unit => "Units",
            TermKind::ObservableProperty => "Observable properties",
            TermKind::FeatureOfInterest => "Features of interest",
        }
    }

    /// Record fields compared when deciding whether a record is up to date.
    pub fn comparison_keys(&self) -> &'static [&'static str] {
        match self {
            TermKind::Aggregation => &["label", "symbol", "description"],
            TermKind::Discipline => &["label", "description"],
            TermKind::Unit => &["label", "symbol", "description"],
            TermKind::ObservableProperty => &["label", "description", "units"],
            TermKind::FeatureOfInterest => &["label", "description"],
        }
    }

    /// Comparison keys that an update must explicitly null out when the
    /// incoming record has no value for them.
    pub fn nullable_keys(&self) -> &'static [&'static str] {
        match self {
            TermKind::Unit => &["symbol"],
            _ => &[],
        }
    }

    pub fn schema(&self) -> &'static KindSchema {
        match self {
            TermKind::Aggregation => &AGGREGATION_SCHEMA,
            TermKind::Discipline => &DISCIPLINE_SCHEMA,
            TermKind::Unit => &UNIT_SCHEMA,
            TermKind::ObservableProperty => &OBSERVABLE_PROPERTY_SCHEMA,
            TermKind::FeatureOfInterest => &FEATURE_OF_INTEREST_SCHEMA,
        }
    }
}

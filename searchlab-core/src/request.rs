//! Request bodies accepted by the gateway's `/search` endpoint.
//!
//! The `type` tag selects the query mode. Each variant carries only the
//! fields that mode uses; optional fields are omitted rather than sent as
//! `null`.

use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::fmt;

// ============================================================================
// SEARCH REQUEST
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SearchRequest {
    PrefixMatch {
        attribute_name: String,
        attribute_value: String,
    },
    Match {
        attribute_name: String,
        attribute_value: String,
        minimum_should_match: String,
    },
    MultiMatch {
        attribute_name: String,
        attribute_value: String,
        fields: Vec<FieldBoost>,
    },
    WildcardMatch {
        attribute_name: String,
        attribute_value: String,
        case_insensitive: bool,
    },
    RangeFilter {
        attribute_name: String,
        attribute_value: Number,
        operator: RangeOperator,
    },
    ComplexSearch(ComplexSearch),
    HybridSearch(VectorQuery),
    VectorSearch(VectorQuery),
}

impl SearchRequest {
    /// Wire name of the `type` discriminator.
    pub fn kind(&self) -> &'static str {
        match self {
            SearchRequest::PrefixMatch { .. } => "prefix_match",
            SearchRequest::Match { .. } => "match",
            SearchRequest::MultiMatch { .. } => "multi_match",
            SearchRequest::WildcardMatch { .. } => "wildcard_match",
            SearchRequest::RangeFilter { .. } => "range_filter",
            SearchRequest::ComplexSearch(_) => "complex_search",
            SearchRequest::HybridSearch(_) => "hybrid_search",
            SearchRequest::VectorSearch(_) => "vector_search",
        }
    }
}

// ============================================================================
// FIELD SELECTION
// ============================================================================

/// Product attributes a single-field query can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchAttribute {
    Title,
    Description,
    Color,
    Price,
}

impl SearchAttribute {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchAttribute::Title => "title",
            SearchAttribute::Description => "description",
            SearchAttribute::Color => "color",
            SearchAttribute::Price => "price",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SearchAttribute::Title => "Title",
            SearchAttribute::Description => "Description",
            SearchAttribute::Color => "Color",
            SearchAttribute::Price => "Price",
        }
    }

    /// Attributes offered by the prefix and wildcard pages.
    pub fn text_attributes() -> &'static [SearchAttribute] {
        &[
            SearchAttribute::Title,
            SearchAttribute::Description,
            SearchAttribute::Color,
        ]
    }

    /// Cycle through the text attributes.
    pub fn next_text(&self) -> SearchAttribute {
        let all = Self::text_attributes();
        let idx = all.iter().position(|a| a == self).unwrap_or(0);
        all[(idx + 1) % all.len()]
    }
}

impl fmt::Display for SearchAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One weighted field of a multi-match query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldBoost {
    pub field: String,
    pub boost: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RangeOperator {
    Gt,
    Gte,
    Lt,
    Lte,
}

impl RangeOperator {
    pub fn all() -> &'static [RangeOperator] {
        &[
            RangeOperator::Gte,
            RangeOperator::Lte,
            RangeOperator::Gt,
            RangeOperator::Lt,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            RangeOperator::Gte => "Greater than equals",
            RangeOperator::Lte => "Less than equals",
            RangeOperator::Gt => "Greater than",
            RangeOperator::Lt => "Less than",
        }
    }

    pub fn next(&self) -> RangeOperator {
        let all = Self::all();
        let idx = all.iter().position(|o| o == self).unwrap_or(0);
        all[(idx + 1) % all.len()]
    }
}

// ============================================================================
// COMPLEX SEARCH
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplexSearch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_value: Option<String>,
    pub search_type: ComplexSearchType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<ComplexField>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregations: Option<Vec<AggregationSpec>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplexSearchType {
    /// All terms must match.
    Combined,
    /// Any term may match.
    Any,
    Exact,
    Fuzzy,
    Aggregations,
}

impl ComplexSearchType {
    /// Modes selectable on the complex search form.
    pub fn form_choices() -> &'static [ComplexSearchType] {
        &[
            ComplexSearchType::Combined,
            ComplexSearchType::Any,
            ComplexSearchType::Exact,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            ComplexSearchType::Combined => "Combined (AND)",
            ComplexSearchType::Any => "Any (OR)",
            ComplexSearchType::Exact => "Exact",
            ComplexSearchType::Fuzzy => "Fuzzy",
            ComplexSearchType::Aggregations => "Aggregations",
        }
    }

    pub fn next_choice(&self) -> ComplexSearchType {
        let all = Self::form_choices();
        let idx = all.iter().position(|t| t == self).unwrap_or(0);
        all[(idx + 1) % all.len()]
    }
}

/// One populated field of a complex search form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplexField {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boost: Option<u32>,
    pub value: FieldValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Number,
    Select,
    Range,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Range(RangeBound),
    Text(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RangeBound {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<Number>,
}

impl RangeBound {
    pub fn is_empty(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }
}

// ============================================================================
// AGGREGATIONS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AggregationSpec {
    Terms {
        field: String,
        name: String,
        size: u32,
    },
    Stats {
        field: String,
        name: String,
    },
    Range {
        field: String,
        name: String,
        ranges: Vec<RangeBucketSpec>,
    },
    NestedStats {
        field: String,
        name: String,
        size: u32,
        metric_name: String,
        metric_type: MetricType,
        metric_field: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeBucketSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricType {
    Avg,
    Sum,
    Min,
    Max,
}

// ============================================================================
// VECTOR / HYBRID
// ============================================================================

/// Field name the vector pages send; the backend always searches embeddings.
pub const VECTOR_FIELD: &str = "vector_embedding";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VectorQuery {
    pub attribute_name: String,
    pub attribute_value: String,
    pub mode: VectorMode,
}

/// Where the backend keeps the vector index being queried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VectorMode {
    OnDisk,
    InMemory,
}

impl VectorMode {
    pub fn label(&self) -> &'static str {
        match self {
            VectorMode::OnDisk => "On Disk",
            VectorMode::InMemory => "In Memory",
        }
    }
}

/// Which comparison page issued a vector query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VectorKind {
    Vector,
    Hybrid,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_prefix_match_wire_shape() {
        let req = SearchRequest::PrefixMatch {
            attribute_name: "title".to_string(),
            attribute_value: "sho".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({"type": "prefix_match", "attribute_name": "title", "attribute_value": "sho"})
        );
    }

    #[test]
    fn test_vector_query_wire_shape() {
        let req = SearchRequest::HybridSearch(VectorQuery {
            attribute_name: VECTOR_FIELD.to_string(),
            attribute_value: "warm jacket".to_string(),
            mode: VectorMode::OnDisk,
        });
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({
                "type": "hybrid_search",
                "attribute_name": "vector_embedding",
                "attribute_value": "warm jacket",
                "mode": "on_disk"
            })
        );
    }

    #[test]
    fn test_complex_search_omits_absent_parts() {
        let req = SearchRequest::ComplexSearch(ComplexSearch {
            search_value: None,
            search_type: ComplexSearchType::Aggregations,
            fields: None,
            aggregations: Some(vec![AggregationSpec::Stats {
                field: "price".to_string(),
                name: "price_stats".to_string(),
            }]),
        });
        let value = serde_json::to_value(&req).unwrap();
        let obj = value.as_object().unwrap();
        assert!(!obj.contains_key("search_value"));
        assert!(!obj.contains_key("fields"));
        assert_eq!(obj["aggregations"][0]["type"], "stats");
    }

    #[test]
    fn test_empty_range_bound_serializes_to_empty_object() {
        let value = serde_json::to_value(FieldValue::Range(RangeBound::default())).unwrap();
        assert_eq!(value, json!({}));
    }

    #[test]
    fn test_operator_cycle_covers_all() {
        let mut op = RangeOperator::Gte;
        let mut seen = Vec::new();
        for _ in 0..RangeOperator::all().len() {
            seen.push(op);
            op = op.next();
        }
        assert_eq!(op, RangeOperator::Gte);
        assert_eq!(seen.len(), 4);
    }
}

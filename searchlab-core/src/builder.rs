//! Query builders, one per search mode.
//!
//! Each builder validates its form and returns the exact request body the
//! gateway expects. Validation failures are [`QueryError`]s; nothing is sent
//! when a builder returns an error.

use crate::aggregation::catalog_aggregations;
use crate::error::QueryError;
use crate::request::{
    ComplexField, ComplexSearch, ComplexSearchType, FieldBoost, FieldKind, FieldValue,
    RangeBound, RangeOperator, SearchAttribute, SearchRequest, VectorKind, VectorMode,
    VectorQuery, VECTOR_FIELD,
};
use serde_json::Number;

/// Minimum term length for complex search.
pub const COMPLEX_MIN_TERM: usize = 3;
/// Minimum term length for fuzzy search.
pub const FUZZY_MIN_TERM: usize = 2;
/// Below this length multi-match quietly sends nothing.
pub const MULTI_MATCH_MIN_TERM: usize = 3;
/// Minimum term length for vector and hybrid search.
pub const VECTOR_MIN_TERM: usize = 2;

/// Starting minimum-should-match percentage.
pub const DEFAULT_MINIMUM_SHOULD_MATCH: u32 = 10;
/// Highest boost the multi-match form accepts.
pub const MAX_BOOST: u32 = 10;
/// Starting value of the range filter form.
pub const DEFAULT_RANGE_VALUE: &str = "10000";

fn require_len(term: &str, min: usize) -> Result<(), QueryError> {
    if term.chars().count() < min {
        return Err(QueryError::TermTooShort { min });
    }
    Ok(())
}

/// Parse a numeric form value, keeping integers as integers on the wire.
pub fn parse_number(field: &'static str, raw: &str) -> Result<Number, QueryError> {
    let trimmed = raw.trim();
    if let Ok(int) = trimmed.parse::<i64>() {
        return Ok(Number::from(int));
    }
    trimmed
        .parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .ok_or_else(|| QueryError::InvalidNumber {
            field,
            value: raw.to_string(),
        })
}

// ============================================================================
// SINGLE-FIELD QUERIES
// ============================================================================

/// Prefix match. An empty term is allowed; the backend answers with all
/// documents.
pub fn prefix_match(attribute: SearchAttribute, term: &str) -> SearchRequest {
    SearchRequest::PrefixMatch {
        attribute_name: attribute.as_str().to_string(),
        attribute_value: term.to_string(),
    }
}

pub fn match_query(
    attribute: SearchAttribute,
    term: &str,
    minimum_should_match: u32,
) -> Result<SearchRequest, QueryError> {
    if term.is_empty() {
        return Err(QueryError::Incomplete { reason: "empty term" });
    }
    Ok(SearchRequest::Match {
        attribute_name: attribute.as_str().to_string(),
        attribute_value: term.to_string(),
        minimum_should_match: format!("{}%", minimum_should_match),
    })
}

/// Apply a minimum-should-match override. Non-positive overrides keep the
/// current setting.
pub fn resolve_minimum_should_match(current: u32, requested: Option<i64>) -> u32 {
    match requested {
        Some(n) if n > 0 => u32::try_from(n).unwrap_or(u32::MAX),
        _ => current,
    }
}

pub fn wildcard_match(
    attribute: SearchAttribute,
    pattern: &str,
    case_insensitive: bool,
) -> Result<SearchRequest, QueryError> {
    if pattern.is_empty() {
        return Err(QueryError::EmptyTerm);
    }
    Ok(SearchRequest::WildcardMatch {
        attribute_name: attribute.as_str().to_string(),
        attribute_value: pattern.to_string(),
        case_insensitive,
    })
}

/// Price range filter. The value is cast to a number without bounds checks.
pub fn range_filter(operator: RangeOperator, value: &str) -> Result<SearchRequest, QueryError> {
    Ok(SearchRequest::RangeFilter {
        attribute_name: SearchAttribute::Price.as_str().to_string(),
        attribute_value: parse_number("price", value)?,
        operator,
    })
}

// ============================================================================
// MULTI MATCH
// ============================================================================

/// One attribute checkbox with its boost slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldToggle {
    pub attribute: SearchAttribute,
    pub enabled: bool,
    pub boost: u32,
}

impl FieldToggle {
    pub fn raise_boost(&mut self) {
        self.boost = (self.boost + 1).min(MAX_BOOST);
    }

    pub fn lower_boost(&mut self) {
        self.boost = self.boost.saturating_sub(1);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiMatchForm {
    /// Fixed order: title, description, color, price.
    pub fields: [FieldToggle; 4],
}

impl Default for MultiMatchForm {
    fn default() -> Self {
        let toggle = |attribute, enabled| FieldToggle {
            attribute,
            enabled,
            boost: 0,
        };
        Self {
            fields: [
                toggle(SearchAttribute::Title, true),
                toggle(SearchAttribute::Description, true),
                toggle(SearchAttribute::Color, true),
                toggle(SearchAttribute::Price, false),
            ],
        }
    }
}

impl MultiMatchForm {
    pub fn enabled_fields(&self) -> Vec<FieldBoost> {
        self.fields
            .iter()
            .filter(|t| t.enabled)
            .map(|t| FieldBoost {
                field: t.attribute.as_str().to_string(),
                boost: t.boost,
            })
            .collect()
    }
}

pub fn multi_match(form: &MultiMatchForm, term: &str) -> Result<SearchRequest, QueryError> {
    if term.chars().count() < MULTI_MATCH_MIN_TERM {
        return Err(QueryError::Incomplete {
            reason: "multi-match term too short",
        });
    }
    Ok(SearchRequest::MultiMatch {
        attribute_name: SearchAttribute::Title.as_str().to_string(),
        attribute_value: term.to_string(),
        fields: form.enabled_fields(),
    })
}

// ============================================================================
// COMPLEX / FUZZY / AGGREGATIONS
// ============================================================================

/// Category choices; the empty value means all categories.
pub const CATEGORY_CHOICES: &[(&str, &str)] = &[
    ("All", ""),
    ("Women", "women"),
    ("Men", "men"),
    ("Unisex", "unisex"),
];

/// Raw complex search form. Numeric inputs stay as typed until built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplexForm {
    pub search_value: String,
    pub search_type: ComplexSearchType,
    pub title: String,
    pub description: String,
    pub category: String,
    pub color: String,
    pub price_min: String,
    pub price_max: String,
}

impl Default for ComplexForm {
    fn default() -> Self {
        Self {
            search_value: String::new(),
            search_type: ComplexSearchType::Combined,
            title: String::new(),
            description: String::new(),
            category: String::new(),
            color: String::new(),
            price_min: String::new(),
            price_max: String::new(),
        }
    }
}

impl ComplexForm {
    /// Advance the category select to its next choice.
    pub fn cycle_category(&mut self) {
        let idx = CATEGORY_CHOICES
            .iter()
            .position(|(_, v)| *v == self.category)
            .unwrap_or(0);
        let (_, next) = CATEGORY_CHOICES[(idx + 1) % CATEGORY_CHOICES.len()];
        self.category = next.to_string();
    }

    pub fn category_label(&self) -> &'static str {
        CATEGORY_CHOICES
            .iter()
            .find(|(_, v)| *v == self.category)
            .map(|(label, _)| *label)
            .unwrap_or("All")
    }

    fn fields(&self) -> Result<Vec<ComplexField>, QueryError> {
        let text = |name: &str, kind, boost, value: &str| {
            (!value.is_empty()).then(|| ComplexField {
                name: name.to_string(),
                kind,
                boost,
                value: FieldValue::Text(value.to_string()),
            })
        };
        let bound = |raw: &str| -> Result<Option<Number>, QueryError> {
            if raw.trim().is_empty() {
                Ok(None)
            } else {
                parse_number("price", raw).map(Some)
            }
        };

        let price = RangeBound {
            min: bound(&self.price_min)?,
            max: bound(&self.price_max)?,
        };
        let price = (!price.is_empty()).then(|| ComplexField {
            name: "price".to_string(),
            kind: FieldKind::Range,
            boost: None,
            value: FieldValue::Range(price),
        });

        Ok([
            text("title", FieldKind::Text, Some(3), &self.title),
            text("description", FieldKind::Text, Some(2), &self.description),
            text("category", FieldKind::Select, None, &self.category),
            text("color", FieldKind::Text, None, &self.color),
            price,
        ]
        .into_iter()
        .flatten()
        .collect())
    }
}

pub fn complex_search(form: &ComplexForm) -> Result<SearchRequest, QueryError> {
    require_len(&form.search_value, COMPLEX_MIN_TERM)?;
    Ok(SearchRequest::ComplexSearch(ComplexSearch {
        search_value: Some(form.search_value.clone()),
        search_type: form.search_type,
        fields: Some(form.fields()?),
        aggregations: None,
    }))
}

pub fn fuzzy_search(term: &str) -> Result<SearchRequest, QueryError> {
    require_len(term, FUZZY_MIN_TERM)?;
    Ok(SearchRequest::ComplexSearch(ComplexSearch {
        search_value: Some(term.to_string()),
        search_type: ComplexSearchType::Fuzzy,
        fields: Some(Vec::new()),
        aggregations: None,
    }))
}

/// The fixed catalog overview request.
pub fn aggregations() -> SearchRequest {
    SearchRequest::ComplexSearch(ComplexSearch {
        search_value: None,
        search_type: ComplexSearchType::Aggregations,
        fields: None,
        aggregations: Some(catalog_aggregations()),
    })
}

// ============================================================================
// VECTOR / HYBRID
// ============================================================================

/// Both legs of a comparison search, on-disk first.
pub fn vector_pair(kind: VectorKind, term: &str) -> Result<[SearchRequest; 2], QueryError> {
    require_len(term, VECTOR_MIN_TERM)?;
    let leg = |mode| {
        let query = VectorQuery {
            attribute_name: VECTOR_FIELD.to_string(),
            attribute_value: term.to_string(),
            mode,
        };
        match kind {
            VectorKind::Vector => SearchRequest::VectorSearch(query),
            VectorKind::Hybrid => SearchRequest::HybridSearch(query),
        }
    };
    Ok([leg(VectorMode::OnDisk), leg(VectorMode::InMemory)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_range_filter_default_body() {
        let req = range_filter(RangeOperator::Gte, DEFAULT_RANGE_VALUE).unwrap();
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({
                "type": "range_filter",
                "attribute_name": "price",
                "attribute_value": 10000,
                "operator": "gte"
            })
        );
    }

    #[test]
    fn test_range_filter_accepts_decimals_and_rejects_text() {
        let req = range_filter(RangeOperator::Lt, "49.5").unwrap();
        assert_eq!(serde_json::to_value(&req).unwrap()["attribute_value"], json!(49.5));

        let err = range_filter(RangeOperator::Lt, "cheap").unwrap_err();
        assert!(matches!(err, QueryError::InvalidNumber { field: "price", .. }));
    }

    #[test]
    fn test_complex_rejects_two_char_term() {
        let form = ComplexForm {
            search_value: "ab".to_string(),
            ..ComplexForm::default()
        };
        let err = complex_search(&form).unwrap_err();
        assert_eq!(err, QueryError::TermTooShort { min: 3 });
        assert_eq!(err.to_string(), "Search term must be at least 3 characters long");
    }

    #[test]
    fn test_fuzzy_rejects_single_char() {
        let err = fuzzy_search("a").unwrap_err();
        assert_eq!(err.to_string(), "Search term must be at least 2 characters long");
        assert!(err.is_warning());
    }

    #[test]
    fn test_fuzzy_body_has_empty_fields() {
        let req = fuzzy_search("shirt").unwrap();
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({
                "type": "complex_search",
                "search_value": "shirt",
                "search_type": "fuzzy",
                "fields": []
            })
        );
    }

    #[test]
    fn test_complex_omits_empty_fields() {
        let form = ComplexForm {
            search_value: "shoes".to_string(),
            color: "red".to_string(),
            ..ComplexForm::default()
        };
        let body = serde_json::to_value(complex_search(&form).unwrap()).unwrap();
        assert_eq!(body["search_type"], "combined");
        assert_eq!(
            body["fields"],
            json!([{"name": "color", "type": "text", "value": "red"}])
        );
    }

    #[test]
    fn test_complex_keeps_title_boost_and_price_range() {
        let form = ComplexForm {
            search_value: "pink".to_string(),
            search_type: ComplexSearchType::Any,
            title: "shoes".to_string(),
            category: "women".to_string(),
            price_min: "1000".to_string(),
            price_max: "15000".to_string(),
            ..ComplexForm::default()
        };
        let body = serde_json::to_value(complex_search(&form).unwrap()).unwrap();
        assert_eq!(body["search_type"], "any");
        assert_eq!(
            body["fields"],
            json!([
                {"name": "title", "type": "text", "boost": 3, "value": "shoes"},
                {"name": "category", "type": "select", "value": "women"},
                {"name": "price", "type": "range", "value": {"min": 1000, "max": 15000}}
            ])
        );
    }

    #[test]
    fn test_complex_price_with_single_bound() {
        let form = ComplexForm {
            search_value: "boots".to_string(),
            price_max: "5000".to_string(),
            ..ComplexForm::default()
        };
        let body = serde_json::to_value(complex_search(&form).unwrap()).unwrap();
        assert_eq!(body["fields"][0]["value"], json!({"max": 5000}));
    }

    #[test]
    fn test_match_formats_percentage() {
        let req = match_query(SearchAttribute::Description, "red running wolves", 75).unwrap();
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({
                "type": "match",
                "attribute_name": "description",
                "attribute_value": "red running wolves",
                "minimum_should_match": "75%"
            })
        );
    }

    #[test]
    fn test_match_empty_term_is_silent() {
        let err = match_query(SearchAttribute::Title, "", 10).unwrap_err();
        assert!(err.is_silent());
    }

    #[test]
    fn test_minimum_should_match_override() {
        assert_eq!(resolve_minimum_should_match(10, Some(40)), 40);
        assert_eq!(resolve_minimum_should_match(40, Some(0)), 40);
        assert_eq!(resolve_minimum_should_match(40, Some(-5)), 40);
        assert_eq!(resolve_minimum_should_match(25, None), 25);
    }

    #[test]
    fn test_wildcard_empty_is_error() {
        let err = wildcard_match(SearchAttribute::Title, "", true).unwrap_err();
        assert_eq!(err, QueryError::EmptyTerm);
        assert!(!err.is_silent());
        assert!(!err.is_warning());
    }

    #[test]
    fn test_prefix_allows_empty_term() {
        let req = prefix_match(SearchAttribute::Color, "");
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({"type": "prefix_match", "attribute_name": "color", "attribute_value": ""})
        );
    }

    #[test]
    fn test_multi_match_default_fields() {
        let req = multi_match(&MultiMatchForm::default(), "red").unwrap();
        assert_eq!(
            serde_json::to_value(&req).unwrap()["fields"],
            json!([
                {"field": "title", "boost": 0},
                {"field": "description", "boost": 0},
                {"field": "color", "boost": 0}
            ])
        );
    }

    #[test]
    fn test_multi_match_short_term_is_silent() {
        assert!(multi_match(&MultiMatchForm::default(), "re")
            .unwrap_err()
            .is_silent());
    }

    #[test]
    fn test_boost_is_clamped() {
        let mut toggle = MultiMatchForm::default().fields[0];
        toggle.lower_boost();
        assert_eq!(toggle.boost, 0);
        for _ in 0..20 {
            toggle.raise_boost();
        }
        assert_eq!(toggle.boost, MAX_BOOST);
    }

    #[test]
    fn test_vector_pair_modes() {
        let [disk, memory] = vector_pair(VectorKind::Hybrid, "warm coat").unwrap();
        assert_eq!(serde_json::to_value(&disk).unwrap()["mode"], "on_disk");
        assert_eq!(serde_json::to_value(&memory).unwrap()["mode"], "in_memory");
        assert_eq!(disk.kind(), "hybrid_search");

        let err = vector_pair(VectorKind::Vector, "x").unwrap_err();
        assert_eq!(err, QueryError::TermTooShort { min: 2 });
    }

    #[test]
    fn test_aggregations_request_lists_five_specs() {
        let body = serde_json::to_value(aggregations()).unwrap();
        assert_eq!(body["search_type"], "aggregations");
        assert!(body.get("search_value").is_none());
        assert_eq!(body["aggregations"].as_array().unwrap().len(), 5);
    }

    #[test]
    fn test_category_cycle() {
        let mut form = ComplexForm::default();
        assert_eq!(form.category_label(), "All");
        form.cycle_category();
        assert_eq!(form.category, "women");
        for _ in 0..3 {
            form.cycle_category();
        }
        assert_eq!(form.category, "");
    }
}

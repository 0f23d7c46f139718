//! searchlab Test Utilities
//!
//! Shared test infrastructure for the searchlab workspace:
//! - Proptest generators for form inputs and catalog records
//! - Fixtures for gateway response bodies
//! - Assertions for highlighted markup and validation outcomes

pub use searchlab_core::{
    AckEnvelope, ComplexForm, ComplexSearchType, DisplayItem, ProductRecord, QueryError,
    RangeOperator, SearchAttribute, SearchEnvelope, Session, BOLD_CLOSE, BOLD_OPEN,
};

// ============================================================================
// PROPTEST GENERATORS
// ============================================================================

pub mod generators {
    //! Proptest strategies for searchlab inputs.

    use super::*;
    use proptest::prelude::*;
    use serde_json::Number;

    /// A search term made of letters and spaces.
    pub fn arb_search_term() -> impl Strategy<Value = String> {
        "[a-zA-Z ]{0,24}"
    }

    /// A term guaranteed to meet every minimum length check.
    pub fn arb_long_term() -> impl Strategy<Value = String> {
        "[a-zA-Z]{3,16}"
    }

    pub fn arb_text_attribute() -> impl Strategy<Value = SearchAttribute> {
        prop_oneof![
            Just(SearchAttribute::Title),
            Just(SearchAttribute::Description),
            Just(SearchAttribute::Color),
        ]
    }

    pub fn arb_range_operator() -> impl Strategy<Value = RangeOperator> {
        prop_oneof![
            Just(RangeOperator::Gt),
            Just(RangeOperator::Gte),
            Just(RangeOperator::Lt),
            Just(RangeOperator::Lte),
        ]
    }

    pub fn arb_complex_search_type() -> impl Strategy<Value = ComplexSearchType> {
        prop_oneof![
            Just(ComplexSearchType::Combined),
            Just(ComplexSearchType::Any),
            Just(ComplexSearchType::Exact),
        ]
    }

    /// Catalog price, either whole or with cents.
    pub fn arb_price() -> impl Strategy<Value = Number> {
        prop_oneof![
            (0u64..50_000).prop_map(Number::from),
            (0u32..5_000_000).prop_map(|c| {
                Number::from_f64(f64::from(c) / 100.0).unwrap_or_else(|| Number::from(0))
            }),
        ]
    }

    pub fn arb_product_record() -> impl Strategy<Value = ProductRecord> {
        (
            "[A-Z][a-z]{2,10}( [A-Z][a-z]{2,10}){0,2}",
            "[a-z ]{0,60}",
            prop_oneof![Just("red"), Just("blue"), Just("black"), Just("pink")],
            arb_price(),
            prop::option::of(prop_oneof![Just("women"), Just("men"), Just("unisex")]),
        )
            .prop_map(|(title, description, color, price, category)| ProductRecord {
                title,
                description,
                color: color.to_string(),
                price: Some(price),
                category: category.map(str::to_string),
                image_url: None,
                file_name: None,
            })
    }

    /// Complex form with arbitrary optional fields, any of which may be empty.
    pub fn arb_complex_form() -> impl Strategy<Value = ComplexForm> {
        (
            arb_search_term(),
            arb_complex_search_type(),
            prop_oneof![Just(String::new()), "[a-z]{1,8}"],
            prop_oneof![Just(String::new()), "[a-z]{1,8}"],
            prop_oneof![
                Just(String::new()),
                Just("women".to_string()),
                Just("men".to_string())
            ],
            prop_oneof![Just(String::new()), "[a-z]{1,8}"],
            prop_oneof![Just(String::new()), (0u32..20_000).prop_map(|n| n.to_string())],
            prop_oneof![Just(String::new()), (0u32..20_000).prop_map(|n| n.to_string())],
        )
            .prop_map(
                |(search_value, search_type, title, description, category, color, min, max)| {
                    ComplexForm {
                        search_value,
                        search_type,
                        title,
                        description,
                        category,
                        color,
                        price_min: min,
                        price_max: max,
                    }
                },
            )
    }
}

// ============================================================================
// TEST FIXTURES
// ============================================================================

pub mod fixtures {
    //! Ready-made sessions, records and gateway bodies.

    use super::*;
    use serde_json::{json, Value};

    pub const TEST_TOKEN: &str = "eyJraWQiOiJ0ZXN0In0.payload.signature";

    pub fn test_session() -> Session {
        match Session::new(TEST_TOKEN, "tester@example.com") {
            Ok(session) => session,
            Err(err) => panic!("fixture session rejected: {}", err),
        }
    }

    pub fn product(title: &str, description: &str, color: &str, price: Value) -> Value {
        json!({
            "title": title,
            "description": description,
            "color": color,
            "price": price
        })
    }

    /// A small catalog covering whole and decimal prices.
    pub fn sample_catalog() -> Vec<Value> {
        vec![
            product("Red Shoes", "Running shoes with red laces", "red", json!(100)),
            product("Blue Denim Jacket", "Classic jacket", "blue", json!(299.99)),
            product("Pink Cross-Training Shoes", "Light trainers", "pink", json!(12999)),
        ]
    }

    /// `/search` success body wrapping the given sources.
    pub fn search_body(sources: &[Value], took: u64) -> Value {
        let hits: Vec<Value> = sources.iter().map(|s| json!({"_source": s})).collect();
        json!({
            "result": {
                "took": took,
                "hits": {
                    "total": {"value": hits.len(), "relation": "eq"},
                    "hits": hits
                }
            }
        })
    }

    /// Gateway failure envelope.
    pub fn failure_body(message: &str, status_code: &str) -> Value {
        json!({
            "success": false,
            "errorMessage": message,
            "statusCode": status_code
        })
    }

    pub fn index_not_found_body() -> Value {
        failure_body(
            "NotFoundError(404, 'index_not_found_exception', 'no such index [products]')",
            "500",
        )
    }

    pub fn presigned_body(url: &str, key: &str) -> Value {
        json!({
            "result": {
                "url": url,
                "fields": {
                    "key": key,
                    "AWSAccessKeyId": "AKIDEXAMPLE",
                    "policy": "eyJjb25kaXRpb25zIjpbXX0=",
                    "signature": "c2lnbmF0dXJl"
                }
            }
        })
    }

    pub fn aggregations_body() -> Value {
        json!({
            "result": {
                "hits": {"hits": []},
                "aggregations": {
                    "categories": {"buckets": [
                        {"key": "women", "doc_count": 6},
                        {"key": "men", "doc_count": 4}
                    ]},
                    "colors": {"buckets": [{"key": "red", "doc_count": 3}]},
                    "price_stats": {"count": 10, "min": 1999.0, "max": 18999.0, "avg": 8450.5, "sum": 84505.0},
                    "price_ranges": {"buckets": [
                        {"key": "*-5000.0", "to": 5000.0, "doc_count": 2},
                        {"key": "5000.0-10000.0", "from": 5000.0, "to": 10000.0, "doc_count": 5},
                        {"key": "10000.0-15000.0", "from": 10000.0, "to": 15000.0, "doc_count": 0},
                        {"key": "15000.0-*", "from": 15000.0, "doc_count": 3}
                    ]},
                    "avg_price_by_category": {"buckets": [
                        {"key": "women", "doc_count": 6, "avg_price": {"value": 9100.25}},
                        {"key": "men", "doc_count": 4, "avg_price": {"value": 7475.0}}
                    ]}
                }
            }
        })
    }
}

// ============================================================================
// CUSTOM ASSERTIONS
// ============================================================================

pub mod assertions {
    //! Assertions for searchlab-specific validation.

    use super::*;

    /// Assert every `<b>` is closed before the next one opens.
    #[track_caller]
    pub fn assert_balanced_bold(markup: &str) {
        let mut open = false;
        let mut rest = markup;
        while let Some(idx) = rest.find('<') {
            let tail = &rest[idx..];
            if tail.starts_with(BOLD_OPEN) {
                assert!(!open, "nested <b> in {:?}", markup);
                open = true;
                rest = &tail[BOLD_OPEN.len()..];
            } else if tail.starts_with(BOLD_CLOSE) {
                assert!(open, "unmatched </b> in {:?}", markup);
                open = false;
                rest = &tail[BOLD_CLOSE.len()..];
            } else {
                panic!("unexpected markup in {:?}", markup);
            }
        }
        assert!(!open, "unclosed <b> in {:?}", markup);
    }

    /// Assert a builder result is a too-short warning with the given minimum.
    #[track_caller]
    pub fn assert_too_short<T: std::fmt::Debug>(result: &Result<T, QueryError>, min: usize) {
        match result {
            Err(QueryError::TermTooShort { min: got }) => {
                assert_eq!(*got, min, "Wrong minimum length");
            }
            other => panic!("Expected TermTooShort({}), got: {:?}", min, other),
        }
    }

    /// Assert every visible card field carries no markup other than bold tags.
    #[track_caller]
    pub fn assert_card_markup_safe(item: &DisplayItem) {
        for field in [&item.name, &item.description, &item.color, &item.price] {
            assert_balanced_bold(field);
        }
    }
}

//! Catalog aggregations: the fixed request list and a typed view over the
//! returned `aggregations` object.

use crate::request::{AggregationSpec, MetricType, RangeBucketSpec};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Price bucket edges, in the catalog's price unit.
pub const PRICE_RANGE_EDGES: [u64; 3] = [5000, 10000, 15000];

/// The five aggregations the overview page requests.
pub fn catalog_aggregations() -> Vec<AggregationSpec> {
    let [low, mid, high] = PRICE_RANGE_EDGES;
    vec![
        AggregationSpec::Terms {
            field: "category".to_string(),
            name: "categories".to_string(),
            size: 10,
        },
        AggregationSpec::Terms {
            field: "color".to_string(),
            name: "colors".to_string(),
            size: 20,
        },
        AggregationSpec::Stats {
            field: "price".to_string(),
            name: "price_stats".to_string(),
        },
        AggregationSpec::Range {
            field: "price".to_string(),
            name: "price_ranges".to_string(),
            ranges: vec![
                RangeBucketSpec { from: None, to: Some(low) },
                RangeBucketSpec { from: Some(low), to: Some(mid) },
                RangeBucketSpec { from: Some(mid), to: Some(high) },
                RangeBucketSpec { from: Some(high), to: None },
            ],
        },
        AggregationSpec::NestedStats {
            field: "category".to_string(),
            name: "avg_price_by_category".to_string(),
            size: 10,
            metric_name: "avg_price".to_string(),
            metric_type: MetricType::Avg,
            metric_field: "price".to_string(),
        },
    ]
}

// ============================================================================
// REPORT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bucket {
    pub key: Value,
    pub doc_count: u64,
}

impl Bucket {
    pub fn label(&self) -> String {
        match &self.key {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceStats {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
    #[serde(default)]
    pub avg: Option<f64>,
    #[serde(default)]
    pub sum: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeBucket {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub from: Option<f64>,
    #[serde(default)]
    pub to: Option<f64>,
    pub doc_count: u64,
}

impl RangeBucket {
    /// `"$5,000 - $10,000"`, with `Under`/`Over` for open ends.
    pub fn label(&self) -> String {
        let edge = |v: Option<f64>, open: &str| match v {
            Some(v) if v != 0.0 => format_usd_whole(v),
            _ => open.to_string(),
        };
        format!("{} - {}", edge(self.from, "Under"), edge(self.to, "Over"))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricBucket {
    pub key: Value,
    pub doc_count: u64,
    pub metric: Option<f64>,
}

impl MetricBucket {
    pub fn label(&self) -> String {
        match &self.key {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

/// Typed view over the `aggregations` object of a search result.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregationReport {
    pub categories: Vec<Bucket>,
    pub colors: Vec<Bucket>,
    pub price_stats: PriceStats,
    pub price_ranges: Vec<RangeBucket>,
    pub avg_price_by_category: Vec<MetricBucket>,
}

impl AggregationReport {
    /// Missing or malformed sections decode as empty.
    pub fn from_value(value: &Value) -> Self {
        let buckets = |name: &str| -> Vec<Value> {
            value
                .get(name)
                .and_then(|agg| agg.get("buckets"))
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default()
        };
        let decode = |items: Vec<Value>| {
            items
                .into_iter()
                .filter_map(|b| serde_json::from_value::<Bucket>(b).ok())
                .collect::<Vec<_>>()
        };

        let price_stats = value
            .get("price_stats")
            .and_then(|v| serde_json::from_value::<PriceStats>(v.clone()).ok())
            .unwrap_or_default();

        let price_ranges = buckets("price_ranges")
            .into_iter()
            .filter_map(|b| serde_json::from_value::<RangeBucket>(b).ok())
            .collect();

        let avg_price_by_category = buckets("avg_price_by_category")
            .into_iter()
            .filter_map(|b| {
                let key = b.get("key")?.clone();
                let doc_count = b.get("doc_count")?.as_u64()?;
                let metric = b
                    .get("avg_price")
                    .and_then(|m| m.get("value"))
                    .and_then(Value::as_f64);
                Some(MetricBucket {
                    key,
                    doc_count,
                    metric,
                })
            })
            .collect();

        Self {
            categories: decode(buckets("categories")),
            colors: decode(buckets("colors")),
            price_stats,
            price_ranges,
            avg_price_by_category,
        }
    }

    /// Share of all priced products falling in a bucket, in percent.
    pub fn share(&self, doc_count: u64) -> f64 {
        if self.price_stats.count == 0 {
            return 0.0;
        }
        doc_count as f64 / self.price_stats.count as f64 * 100.0
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
            && self.colors.is_empty()
            && self.price_ranges.is_empty()
            && self.avg_price_by_category.is_empty()
            && self.price_stats.count == 0
    }
}

/// US dollars with thousands separators and no decimals, e.g. `$5,000`.
pub fn format_usd_whole(amount: f64) -> String {
    let rounded = amount.round();
    let negative = rounded < 0.0;
    let digits = format!("{}", rounded.abs() as u64);
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if negative {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "categories": {"buckets": [{"key": "women", "doc_count": 6}, {"key": "men", "doc_count": 4}]},
            "colors": {"buckets": [{"key": "red", "doc_count": 3}]},
            "price_stats": {"count": 10, "min": 1999.0, "max": 18999.0, "avg": 8450.5, "sum": 84505.0},
            "price_ranges": {"buckets": [
                {"key": "*-5000.0", "to": 5000.0, "doc_count": 2},
                {"key": "5000.0-10000.0", "from": 5000.0, "to": 10000.0, "doc_count": 5},
                {"key": "15000.0-*", "from": 15000.0, "doc_count": 3}
            ]},
            "avg_price_by_category": {"buckets": [
                {"key": "women", "doc_count": 6, "avg_price": {"value": 9100.25}}
            ]}
        })
    }

    #[test]
    fn test_request_list_shape() {
        let body = serde_json::to_value(catalog_aggregations()).unwrap();
        assert_eq!(body[0], json!({"type": "terms", "field": "category", "name": "categories", "size": 10}));
        assert_eq!(body[3]["ranges"], json!([{"to": 5000}, {"from": 5000, "to": 10000}, {"from": 10000, "to": 15000}, {"from": 15000}]));
        assert_eq!(
            body[4],
            json!({
                "type": "nested_stats",
                "field": "category",
                "name": "avg_price_by_category",
                "size": 10,
                "metric_name": "avg_price",
                "metric_type": "avg",
                "metric_field": "price"
            })
        );
    }

    #[test]
    fn test_report_parses_all_sections() {
        let report = AggregationReport::from_value(&sample());
        assert_eq!(report.categories.len(), 2);
        assert_eq!(report.categories[0].label(), "women");
        assert_eq!(report.colors[0].doc_count, 3);
        assert_eq!(report.price_stats.count, 10);
        assert_eq!(report.price_ranges.len(), 3);
        assert_eq!(report.avg_price_by_category[0].metric, Some(9100.25));
        assert!((report.share(5) - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_range_labels() {
        let report = AggregationReport::from_value(&sample());
        let labels: Vec<String> = report.price_ranges.iter().map(|b| b.label()).collect();
        assert_eq!(labels, vec!["Under - $5,000", "$5,000 - $10,000", "$15,000 - Over"]);
    }

    #[test]
    fn test_missing_sections_are_empty() {
        let report = AggregationReport::from_value(&json!({}));
        assert!(report.is_empty());
        assert_eq!(report.share(3), 0.0);
    }

    #[test]
    fn test_format_usd_whole() {
        assert_eq!(format_usd_whole(0.0), "$0");
        assert_eq!(format_usd_whole(999.4), "$999");
        assert_eq!(format_usd_whole(8450.5), "$8,451");
        assert_eq!(format_usd_whole(1234567.0), "$1,234,567");
    }
}

//! Response envelopes returned by the gateway.

use crate::display::format_number;
use crate::request::SearchAttribute;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// Successful `/search` response: `{ "result": { "hits": ..., "took": ... } }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchEnvelope {
    pub result: SearchResult,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub hits: HitList,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub took: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregations: Option<Value>,
}

impl SearchEnvelope {
    pub fn records(&self) -> impl Iterator<Item = &ProductRecord> {
        self.result.hits.hits.iter().map(|hit| &hit.source)
    }

    pub fn total(&self) -> Option<u64> {
        self.result.hits.total.as_ref().map(|t| t.value)
    }

    pub fn took(&self) -> Option<u64> {
        self.result.took
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HitList {
    #[serde(default)]
    pub hits: Vec<Hit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<TotalHits>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hit {
    #[serde(rename = "_source")]
    pub source: ProductRecord,
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "_score", default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TotalHits {
    pub value: u64,
}

/// A catalog product as stored in the index.
///
/// `price` keeps its JSON number form so `100` stays `100` and `299.99`
/// stays `299.99` when rendered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub price: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
}

impl ProductRecord {
    /// The record's value for a searchable attribute, as shown in suggestions.
    pub fn attribute_text(&self, attribute: SearchAttribute) -> String {
        match attribute {
            SearchAttribute::Title => self.title.clone(),
            SearchAttribute::Description => self.description.clone(),
            SearchAttribute::Color => self.color.clone(),
            SearchAttribute::Price => self.price.as_ref().map(format_number).unwrap_or_default(),
        }
    }
}

/// Reply of the index management and upload endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AckEnvelope {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(rename = "errorMessage", default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl AckEnvelope {
    /// An explicit `success: false` is a failure; a missing flag is not.
    pub fn is_success(&self) -> bool {
        self.success.unwrap_or(true)
    }
}

//! Projection of product records into display cards.

use crate::highlight::highlight_escaped;
use crate::response::{ProductRecord, SearchEnvelope};
use serde::{Deserialize, Serialize};
use serde_json::Number;

const PLACEHOLDER_IMAGE_BASE: &str = "https://via.placeholder.com/800x400?text=";

/// One result card. `name`, `description`, `color` and the price digits may
/// carry `<b>` markup; everything else in them is HTML-escaped text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayItem {
    pub name: String,
    pub title: String,
    pub description: String,
    pub color: String,
    pub price: String,
    pub image_url: Option<String>,
    pub file_name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PriceStyle {
    /// `"$"` followed by the number as stored.
    #[default]
    Raw,
    /// Stored value is in cents; shown as dollars with two decimals.
    Cents,
}

/// How a page turns records into cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Projection<'a> {
    pub term: &'a str,
    pub price: PriceStyle,
    pub placeholder_images: bool,
}

impl<'a> Projection<'a> {
    /// No highlighting, raw prices.
    pub fn plain() -> Projection<'static> {
        Projection {
            term: "",
            price: PriceStyle::Raw,
            placeholder_images: false,
        }
    }

    pub fn highlighted(term: &'a str) -> Self {
        Self {
            term,
            price: PriceStyle::Raw,
            placeholder_images: false,
        }
    }

    /// Cents pricing with a generated image for records that have none.
    pub fn cents() -> Projection<'static> {
        Projection {
            term: "",
            price: PriceStyle::Cents,
            placeholder_images: true,
        }
    }

    pub fn project(&self, record: &ProductRecord) -> DisplayItem {
        let price = match (self.price, record.price.as_ref()) {
            (_, None) => "$".to_string(),
            (PriceStyle::Raw, Some(n)) => {
                format!("${}", highlight_escaped(&format_number(n), self.term))
            }
            (PriceStyle::Cents, Some(n)) => {
                format!("${:.2}", n.as_f64().unwrap_or_default() / 100.0)
            }
        };
        let image_url = match &record.image_url {
            Some(url) if !url.is_empty() => Some(url.clone()),
            _ if self.placeholder_images => Some(placeholder_image(&record.title)),
            _ => None,
        };

        DisplayItem {
            name: highlight_escaped(&record.title, self.term),
            title: record.title.clone(),
            description: highlight_escaped(&record.description, self.term),
            color: highlight_escaped(&record.color, self.term),
            price,
            image_url,
            file_name: record.file_name.clone(),
        }
    }

    pub fn project_all(&self, envelope: &SearchEnvelope) -> Vec<DisplayItem> {
        envelope.records().map(|r| self.project(r)).collect()
    }
}

/// Render a JSON number the way a browser stringifies it: whole floats lose
/// their fractional part.
pub fn format_number(n: &Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
        _ => n.to_string(),
    }
}

pub fn placeholder_image(title: &str) -> String {
    format!("{}{}", PLACEHOLDER_IMAGE_BASE, urlencoding::encode(title))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> ProductRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_highlighted_card() {
        let item = Projection::highlighted("red").project(&record(json!({
            "title": "Red Shoes",
            "description": "Bright red sneakers",
            "color": "red",
            "price": 100
        })));
        assert_eq!(item.name, "<b>Red</b> Shoes");
        assert_eq!(item.title, "Red Shoes");
        assert_eq!(item.description, "Bright <b>red</b> sneakers");
        assert_eq!(item.color, "<b>red</b>");
        assert_eq!(item.price, "$100");
    }

    #[test]
    fn test_price_digits_highlighted() {
        let item = Projection::highlighted("99").project(&record(json!({"title": "Coat", "price": 299.99})));
        assert_eq!(item.price, "$2<b>99</b>.<b>99</b>");
    }

    #[test]
    fn test_plain_card_escapes_markup() {
        let item = Projection::plain().project(&record(json!({"title": "<i>Hat</i>", "price": 5})));
        assert_eq!(item.name, "&lt;i&gt;Hat&lt;/i&gt;");
        assert_eq!(item.price, "$5");
        assert!(item.image_url.is_none());
    }

    #[test]
    fn test_cents_pricing_and_placeholder() {
        let item = Projection::cents().project(&record(json!({"title": "Blue Jeans", "price": 12999})));
        assert_eq!(item.price, "$129.99");
        assert_eq!(
            item.image_url.as_deref(),
            Some("https://via.placeholder.com/800x400?text=Blue%20Jeans")
        );
    }

    #[test]
    fn test_existing_image_kept() {
        let item = Projection::cents().project(&record(json!({
            "title": "Cap",
            "price": 500,
            "image_url": "https://cdn.example.com/cap.png"
        })));
        assert_eq!(item.image_url.as_deref(), Some("https://cdn.example.com/cap.png"));
        assert_eq!(item.price, "$5.00");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(&Number::from(10000)), "10000");
        assert_eq!(format_number(&Number::from_f64(100.0).unwrap()), "100");
        assert_eq!(format_number(&Number::from_f64(49.5).unwrap()), "49.5");
    }

    #[test]
    fn test_missing_price() {
        let item = Projection::plain().project(&record(json!({"title": "Mystery"})));
        assert_eq!(item.price, "$");
    }
}

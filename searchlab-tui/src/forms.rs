//! Per-page input forms.

use crate::traits::{FormRow, PageForm, RowKind};
use searchlab_core::builder::{resolve_minimum_should_match, DEFAULT_MINIMUM_SHOULD_MATCH};
use searchlab_core::{ComplexForm, MultiMatchForm, ProductForm, RangeOperator, SearchAttribute};

/// Slider bounds and step of the minimum-should-match control.
pub const MSM_MIN: u32 = 10;
pub const MSM_MAX: u32 = 100;
pub const MSM_STEP: u32 = 5;

fn checkbox(on: bool) -> &'static str {
    if on {
        "[x]"
    } else {
        "[ ]"
    }
}

/// Attribute select plus a term. Used by prefix and fuzzy style pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermForm {
    pub attribute: SearchAttribute,
    pub term: String,
    /// Hide the attribute row for pages that search a fixed field.
    pub fixed_attribute: bool,
}

impl TermForm {
    pub fn with_attribute() -> Self {
        Self {
            attribute: SearchAttribute::Title,
            term: String::new(),
            fixed_attribute: false,
        }
    }

    pub fn term_only() -> Self {
        Self {
            fixed_attribute: true,
            ..Self::with_attribute()
        }
    }

    fn term_row(&self) -> usize {
        if self.fixed_attribute {
            0
        } else {
            1
        }
    }
}

impl PageForm for TermForm {
    fn rows(&self) -> Vec<FormRow> {
        let mut rows = Vec::with_capacity(2);
        if !self.fixed_attribute {
            rows.push(FormRow::new("Attribute", self.attribute.label(), RowKind::Choice));
        }
        rows.push(FormRow::new("Search", self.term.clone(), RowKind::Text));
        rows
    }

    fn text_mut(&mut self, row: usize) -> Option<&mut String> {
        (row == self.term_row()).then_some(&mut self.term)
    }

    fn toggle(&mut self, row: usize) {
        if !self.fixed_attribute && row == 0 {
            self.attribute = self.attribute.next_text();
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchForm {
    pub attribute: SearchAttribute,
    pub term: String,
    pub minimum_should_match: u32,
}

impl Default for MatchForm {
    fn default() -> Self {
        Self {
            attribute: SearchAttribute::Title,
            term: String::new(),
            minimum_should_match: DEFAULT_MINIMUM_SHOULD_MATCH,
        }
    }
}

impl PageForm for MatchForm {
    fn rows(&self) -> Vec<FormRow> {
        vec![
            FormRow::new("Attribute", self.attribute.label(), RowKind::Choice),
            FormRow::new("Search", self.term.clone(), RowKind::Text),
            FormRow::new(
                "Minimum should match",
                format!("{}%", self.minimum_should_match),
                RowKind::Slider,
            ),
        ]
    }

    fn text_mut(&mut self, row: usize) -> Option<&mut String> {
        (row == 1).then_some(&mut self.term)
    }

    fn toggle(&mut self, row: usize) {
        if row == 0 {
            self.attribute = self.attribute.next_text();
        }
    }

    fn adjust(&mut self, row: usize, delta: i32) {
        if row != 2 {
            return;
        }
        let stepped = i64::from(self.minimum_should_match) + i64::from(delta) * i64::from(MSM_STEP);
        let clamped = stepped.clamp(i64::from(MSM_MIN), i64::from(MSM_MAX));
        self.minimum_should_match =
            resolve_minimum_should_match(self.minimum_should_match, Some(clamped));
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MultiMatchPageForm {
    pub term: String,
    pub fields: MultiMatchForm,
}

impl PageForm for MultiMatchPageForm {
    fn rows(&self) -> Vec<FormRow> {
        let mut rows = vec![FormRow::new("Search", self.term.clone(), RowKind::Text)];
        rows.extend(self.fields.fields.iter().map(|toggle| {
            FormRow::new(
                toggle.attribute.label(),
                format!("{} boost {}", checkbox(toggle.enabled), toggle.boost),
                RowKind::Toggle,
            )
        }));
        rows
    }

    fn text_mut(&mut self, row: usize) -> Option<&mut String> {
        (row == 0).then_some(&mut self.term)
    }

    fn toggle(&mut self, row: usize) {
        if let Some(field) = row.checked_sub(1).and_then(|i| self.fields.fields.get_mut(i)) {
            field.enabled = !field.enabled;
        }
    }

    fn adjust(&mut self, row: usize, delta: i32) {
        if let Some(field) = row.checked_sub(1).and_then(|i| self.fields.fields.get_mut(i)) {
            if delta > 0 {
                field.raise_boost();
            } else if delta < 0 {
                field.lower_boost();
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WildcardForm {
    pub attribute: SearchAttribute,
    pub pattern: String,
    pub case_insensitive: bool,
}

impl Default for WildcardForm {
    fn default() -> Self {
        Self {
            attribute: SearchAttribute::Title,
            pattern: String::new(),
            case_insensitive: true,
        }
    }
}

impl PageForm for WildcardForm {
    fn rows(&self) -> Vec<FormRow> {
        vec![
            FormRow::new("Attribute", self.attribute.label(), RowKind::Choice),
            FormRow::new("Pattern", self.pattern.clone(), RowKind::Text),
            FormRow::new(
                "Case insensitive",
                checkbox(self.case_insensitive),
                RowKind::Toggle,
            ),
        ]
    }

    fn text_mut(&mut self, row: usize) -> Option<&mut String> {
        (row == 1).then_some(&mut self.pattern)
    }

    fn toggle(&mut self, row: usize) {
        match row {
            0 => self.attribute = self.attribute.next_text(),
            2 => self.case_insensitive = !self.case_insensitive,
            _ => {}
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeForm {
    pub operator: RangeOperator,
    pub value: String,
}

impl Default for RangeForm {
    fn default() -> Self {
        Self {
            operator: RangeOperator::Gte,
            value: searchlab_core::builder::DEFAULT_RANGE_VALUE.to_string(),
        }
    }
}

impl PageForm for RangeForm {
    fn rows(&self) -> Vec<FormRow> {
        vec![
            FormRow::new("Operator", self.operator.label(), RowKind::Choice),
            FormRow::new("Price", self.value.clone(), RowKind::Text),
        ]
    }

    fn text_mut(&mut self, row: usize) -> Option<&mut String> {
        (row == 1).then_some(&mut self.value)
    }

    fn toggle(&mut self, row: usize) {
        if row == 0 {
            self.operator = self.operator.next();
        }
    }
}

impl PageForm for ComplexForm {
    fn rows(&self) -> Vec<FormRow> {
        vec![
            FormRow::new("Search", self.search_value.clone(), RowKind::Text),
            FormRow::new("Search type", self.search_type.label(), RowKind::Choice),
            FormRow::new("Title", self.title.clone(), RowKind::Text),
            FormRow::new("Description", self.description.clone(), RowKind::Text),
            FormRow::new("Category", self.category_label(), RowKind::Choice),
            FormRow::new("Color", self.color.clone(), RowKind::Text),
            FormRow::new("Price min", self.price_min.clone(), RowKind::Text),
            FormRow::new("Price max", self.price_max.clone(), RowKind::Text),
        ]
    }

    fn text_mut(&mut self, row: usize) -> Option<&mut String> {
        match row {
            0 => Some(&mut self.search_value),
            2 => Some(&mut self.title),
            3 => Some(&mut self.description),
            5 => Some(&mut self.color),
            6 => Some(&mut self.price_min),
            7 => Some(&mut self.price_max),
            _ => None,
        }
    }

    fn toggle(&mut self, row: usize) {
        match row {
            1 => self.search_type = self.search_type.next_choice(),
            4 => self.cycle_category(),
            _ => {}
        }
    }
}

impl PageForm for ProductForm {
    fn rows(&self) -> Vec<FormRow> {
        vec![
            FormRow::new("Name", self.name.clone(), RowKind::Text),
            FormRow::new("Description", self.description.clone(), RowKind::Text),
            FormRow::new("Price", self.price.clone(), RowKind::Text),
            FormRow::new("Category", self.category.clone(), RowKind::Text),
            FormRow::new("Color", self.color.clone(), RowKind::Text),
            FormRow::new("Image file", self.file_path.clone(), RowKind::Text),
        ]
    }

    fn text_mut(&mut self, row: usize) -> Option<&mut String> {
        match row {
            0 => Some(&mut self.name),
            1 => Some(&mut self.description),
            2 => Some(&mut self.price),
            3 => Some(&mut self.category),
            4 => Some(&mut self.color),
            5 => Some(&mut self.file_path),
            _ => None,
        }
    }
}

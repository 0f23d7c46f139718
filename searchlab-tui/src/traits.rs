//! Common traits for TUI components

/// How a form row reacts to input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    /// Free text, edited in insert mode.
    Text,
    /// Cycles through fixed choices with space.
    Choice,
    /// Checkbox; space flips it, left/right adjust its boost if it has one.
    Toggle,
    /// Number adjusted with left/right.
    Slider,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormRow {
    pub label: String,
    pub value: String,
    pub kind: RowKind,
}

impl FormRow {
    pub fn new(label: impl Into<String>, value: impl Into<String>, kind: RowKind) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            kind,
        }
    }
}

/// A page's editable input, addressed row by row.
pub trait PageForm {
    fn rows(&self) -> Vec<FormRow>;

    /// The text buffer behind a [`RowKind::Text`] row.
    fn text_mut(&mut self, row: usize) -> Option<&mut String>;

    fn toggle(&mut self, _row: usize) {}

    fn adjust(&mut self, _row: usize, _delta: i32) {}

    fn row_count(&self) -> usize {
        self.rows().len()
    }

    fn is_text(&self, row: usize) -> bool {
        self.rows()
            .get(row)
            .map(|r| r.kind == RowKind::Text)
            .unwrap_or(false)
    }
}

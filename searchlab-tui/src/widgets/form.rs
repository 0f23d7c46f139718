//! Form panel widget.

use crate::traits::{FormRow, RowKind};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub struct FormPanel<'a> {
    pub title: &'a str,
    pub rows: &'a [FormRow],
    pub focus: usize,
    pub editing: bool,
    pub label_style: Style,
    pub value_style: Style,
    pub focus_style: Style,
    pub hint_style: Style,
}

impl<'a> FormPanel<'a> {
    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let width = self
            .rows
            .iter()
            .map(|r| r.label.chars().count())
            .max()
            .unwrap_or(0);

        let lines: Vec<Line> = self
            .rows
            .iter()
            .enumerate()
            .map(|(idx, row)| {
                let focused = idx == self.focus;
                let marker = if focused { "> " } else { "  " };
                let label_style = if focused {
                    self.focus_style
                } else {
                    self.label_style
                };
                let mut value = row.value.clone();
                if focused && self.editing {
                    value.push('_');
                }
                Line::from(vec![
                    Span::styled(marker, self.focus_style),
                    Span::styled(format!("{:<width$}  ", row.label, width = width), label_style),
                    Span::styled(value, self.value_style),
                    Span::styled(format!("  {}", hint(row.kind, focused)), self.hint_style),
                ])
            })
            .collect();

        let paragraph = Paragraph::new(lines)
            .block(Block::default().title(self.title).borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }
}

fn hint(kind: RowKind, focused: bool) -> &'static str {
    if !focused {
        return "";
    }
    match kind {
        RowKind::Text => "[i] edit",
        RowKind::Choice => "[space] change",
        RowKind::Toggle => "[space] toggle [h/l] boost",
        RowKind::Slider => "[h/l] adjust",
    }
}

//! Detail panel widget for showing label/value pairs.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub struct DetailPanel<'a> {
    pub title: &'a str,
    pub fields: Vec<(&'a str, String)>,
    pub style: Style,
    /// Shown instead of the fields when there are none.
    pub placeholder: &'a str,
}

impl<'a> DetailPanel<'a> {
    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let text = if self.fields.is_empty() {
            Text::from(self.placeholder)
        } else {
            let width = self
                .fields
                .iter()
                .map(|(label, _)| label.chars().count())
                .max()
                .unwrap_or(0);
            Text::from(
                self.fields
                    .iter()
                    .map(|(label, value)| {
                        Line::from(vec![
                            Span::styled(format!("{:<width$} ", label, width = width), self.style),
                            Span::raw(value.clone()),
                        ])
                    })
                    .collect::<Vec<_>>(),
            )
        };

        let widget = Paragraph::new(text)
            .block(Block::default().title(self.title).borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(widget, area);
    }
}

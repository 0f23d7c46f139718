//! Status line for a search leg or result list.

use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub struct StatusIndicator {
    pub title: String,
    pub status: String,
    pub style: Style,
}

impl StatusIndicator {
    /// Summarize a reply: loading, or took/total when known.
    pub fn summary(loading: bool, took: Option<u64>, total: Option<u64>) -> String {
        if loading {
            return "Loading...".to_string();
        }
        match (took, total) {
            (Some(took), Some(total)) => format!("{} hits in {} ms", total, took),
            (Some(took), None) => format!("{} ms", took),
            (None, Some(total)) => format!("{} hits", total),
            (None, None) => "-".to_string(),
        }
    }

    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let paragraph = Paragraph::new(self.status.clone()).style(self.style).block(
            Block::default()
                .title(self.title.as_str())
                .borders(Borders::ALL),
        );
        f.render_widget(paragraph, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_variants() {
        assert_eq!(StatusIndicator::summary(true, Some(3), Some(1)), "Loading...");
        assert_eq!(StatusIndicator::summary(false, Some(12), Some(5)), "5 hits in 12 ms");
        assert_eq!(StatusIndicator::summary(false, None, None), "-");
    }
}

//! Result cards.
//!
//! Card text arrives as escaped HTML whose only markup is `<b>`. It is
//! turned into styled spans here; nothing else is interpreted.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use searchlab_core::{DisplayItem, BOLD_CLOSE, BOLD_OPEN};

/// Split highlighted markup into plain and bold spans.
pub fn markup_spans(markup: &str, base: Style) -> Vec<Span<'static>> {
    let bold = base.add_modifier(Modifier::BOLD);
    let mut spans = Vec::new();
    let mut rest = markup;
    while let Some(start) = rest.find(BOLD_OPEN) {
        if start > 0 {
            spans.push(Span::styled(unescape_html(&rest[..start]), base));
        }
        let after = &rest[start + BOLD_OPEN.len()..];
        match after.find(BOLD_CLOSE) {
            Some(end) => {
                spans.push(Span::styled(unescape_html(&after[..end]), bold));
                rest = &after[end + BOLD_CLOSE.len()..];
            }
            None => {
                spans.push(Span::styled(unescape_html(after), bold));
                rest = "";
            }
        }
    }
    if !rest.is_empty() {
        spans.push(Span::styled(unescape_html(rest), base));
    }
    spans
}

/// Reverse the five entities produced when card text is escaped.
pub fn unescape_html(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

pub struct CardList<'a> {
    pub title: String,
    pub items: &'a [DisplayItem],
    pub scroll: usize,
    pub empty_text: &'a str,
    pub border_style: Style,
    pub title_style: Style,
    pub text_style: Style,
    pub dim_style: Style,
}

impl<'a> CardList<'a> {
    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let block = Block::default()
            .title(self.title.as_str())
            .borders(Borders::ALL)
            .border_style(self.border_style);

        if self.items.is_empty() {
            let empty = Paragraph::new(self.empty_text)
                .style(self.dim_style)
                .block(block);
            f.render_widget(empty, area);
            return;
        }

        let mut lines: Vec<Line> = Vec::new();
        for item in self.items.iter().skip(self.scroll) {
            let mut heading = markup_spans(&item.name, self.title_style);
            heading.push(Span::raw("  "));
            heading.extend(markup_spans(&item.price, self.text_style));
            lines.push(Line::from(heading));

            if !item.description.is_empty() {
                lines.push(Line::from(markup_spans(&item.description, self.text_style)));
            }

            let mut meta = vec![Span::styled("color: ", self.dim_style)];
            meta.extend(markup_spans(&item.color, self.text_style));
            if let Some(url) = &item.image_url {
                meta.push(Span::styled(format!("  image: {}", url), self.dim_style));
            }
            lines.push(Line::from(meta));
            lines.push(Line::default());
        }

        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false });
        f.render_widget(paragraph, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of(spans: &[Span<'_>]) -> String {
        spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_bold_segments_become_bold_spans() {
        let spans = markup_spans("<b>Red</b> Shoes", Style::default());
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].content, "Red");
        assert!(spans[0].style.add_modifier.contains(Modifier::BOLD));
        assert_eq!(spans[1].content, " Shoes");
        assert!(!spans[1].style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_entities_are_unescaped_after_splitting() {
        let spans = markup_spans("&lt;b&gt; <b>&amp;</b>", Style::default());
        assert_eq!(text_of(&spans), "<b> &");
        assert_eq!(spans.len(), 2);
    }

    #[test]
    fn test_plain_text_is_single_span() {
        let spans = markup_spans("no highlight", Style::default());
        assert_eq!(spans.len(), 1);
        assert!(markup_spans("", Style::default()).is_empty());
    }

    #[test]
    fn test_unescape_is_single_pass_for_amp() {
        assert_eq!(unescape_html("&amp;lt;"), "&lt;");
    }
}

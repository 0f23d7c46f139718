//! Share bar for facet buckets.

use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Gauge},
    Frame,
};

/// A bucket's document count drawn against the catalog total.
pub struct ShareBar {
    pub label: String,
    /// Share of the catalog, in percent.
    pub percent: f64,
    pub style: Style,
}

impl ShareBar {
    pub fn ratio(&self) -> f64 {
        if self.percent.is_finite() {
            (self.percent / 100.0).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let gauge = Gauge::default()
            .block(Block::default().title(self.label.as_str()).borders(Borders::ALL))
            .gauge_style(self.style)
            .label(format!("{:.1}%", self.percent))
            .ratio(self.ratio());
        f.render_widget(gauge, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio_is_clamped() {
        let bar = |percent| ShareBar {
            label: String::new(),
            percent,
            style: Style::default(),
        };
        assert_eq!(bar(150.0).ratio(), 1.0);
        assert_eq!(bar(-3.0).ratio(), 0.0);
        assert_eq!(bar(f64::NAN).ratio(), 0.0);
        assert!((bar(25.0).ratio() - 0.25).abs() < f64::EPSILON);
    }
}

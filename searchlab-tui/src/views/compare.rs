//! Vector and hybrid comparison pages.

use crate::state::{App, LegState};
use crate::views::{form_height, render_form, render_intro};
use crate::widgets::{CardList, StatusIndicator};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    Frame,
};
use searchlab_core::VectorMode;

pub fn render(f: &mut Frame<'_>, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(form_height(app)),
            Constraint::Min(0),
        ])
        .split(area);

    render_intro(f, app, chunks[0]);
    render_form(f, app, chunks[1]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[2]);

    let Some(comparison) = app.comparison(app.active_page) else {
        return;
    };
    let scroll = app.status(app.active_page).map(|s| s.scroll).unwrap_or(0);
    for (mode, area) in [VectorMode::OnDisk, VectorMode::InMemory]
        .into_iter()
        .zip(columns.iter())
    {
        render_leg(f, app, *area, mode, comparison.leg(mode), scroll);
    }
}

fn render_leg(
    f: &mut Frame<'_>,
    app: &App,
    area: Rect,
    mode: VectorMode,
    leg: &LegState,
    scroll: usize,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    StatusIndicator {
        title: mode.label().to_string(),
        status: StatusIndicator::summary(leg.loading, leg.took, leg.total),
        style: Style::default().fg(app.theme.secondary),
    }
    .render(f, chunks[0]);

    CardList {
        title: format!("{} results", mode.label()),
        items: &leg.items,
        scroll,
        empty_text: "No results yet.",
        border_style: Style::default().fg(app.theme.border),
        title_style: Style::default().fg(app.theme.primary),
        text_style: Style::default().fg(app.theme.text),
        dim_style: Style::default().fg(app.theme.text_dim),
    }
    .render(f, chunks[1]);
}

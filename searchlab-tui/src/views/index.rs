//! Catalog and vector index management pages.

use crate::nav::Page;
use crate::state::{App, IndexAction};
use crate::views::render_intro;
use crate::widgets::StatusIndicator;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    Frame,
};

pub fn render(f: &mut Frame<'_>, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    render_intro(f, app, chunks[0]);

    let page = app.active_page;
    let action = match page {
        Page::VectorIndex => app.vector_action,
        _ => app.catalog_action,
    };
    let loading = app.status(page).map(|s| s.loading).unwrap_or(false);
    let status = match (loading, action) {
        (true, Some(IndexAction::Create)) => "Creating index...",
        (true, Some(IndexAction::Delete)) => "Deleting index...",
        (false, Some(_)) => "Done. See the alert below.",
        _ => "Idle",
    };
    StatusIndicator {
        title: page.title().to_string(),
        status: status.to_string(),
        style: Style::default().fg(app.theme.secondary),
    }
    .render(f, chunks[1]);
}

//! Upload product page.

use crate::state::App;
use crate::views::{form_height, render_form, render_intro};
use crate::widgets::StatusIndicator;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    Frame,
};

pub fn render(f: &mut Frame<'_>, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(form_height(app)),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(area);

    render_intro(f, app, chunks[0]);
    render_form(f, app, chunks[1]);

    let loading = app
        .status(app.active_page)
        .map(|s| s.loading)
        .unwrap_or(false);
    StatusIndicator {
        title: "Upload".to_string(),
        status: if loading {
            "Uploading...".to_string()
        } else {
            "Press Enter to upload and index".to_string()
        },
        style: Style::default().fg(app.theme.secondary),
    }
    .render(f, chunks[2]);
}

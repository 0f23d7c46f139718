//! Single-list search pages: prefix, match, multi match, wildcard, range,
//! fuzzy and complex.

use crate::nav::Page;
use crate::state::App;
use crate::views::{form_height, render_form, render_intro};
use crate::widgets::{CardList, StatusIndicator};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, List, ListItem},
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

    let page = app.active_page;
    let status = app.status(page);
    let list = app.results(page);
    let summary = StatusIndicator::summary(
        status.map(|s| s.loading).unwrap_or(false),
        list.and_then(|l| l.took),
        list.and_then(|l| l.total),
    );
    StatusIndicator {
        title: "Results".to_string(),
        status: summary,
        style: Style::default().fg(app.theme.secondary),
    }
    .render(f, chunks[2]);

    let suggestions: &[String] = list.map(|l| l.suggestions.as_slice()).unwrap_or(&[]);
    let body = if suggests(page) && !suggestions.is_empty() {
        let split = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
            .split(chunks[3]);
        let items: Vec<ListItem> = suggestions
            .iter()
            .map(|s| ListItem::new(s.as_str()))
            .collect();
        let list = List::new(items).block(
            Block::default()
                .title("Suggestions")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border)),
        );
        f.render_widget(list, split[0]);
        split[1]
    } else {
        chunks[3]
    };

    let items = list.map(|l| l.items.as_slice()).unwrap_or(&[]);
    CardList {
        title: format!("{} results", page.title()),
        items,
        scroll: status.map(|s| s.scroll).unwrap_or(0),
        empty_text: "No results yet. Fill in the query and press Enter.",
        border_style: Style::default().fg(app.theme.border),
        title_style: Style::default()
            .fg(app.theme.primary)
            .add_modifier(Modifier::UNDERLINED),
        text_style: Style::default().fg(app.theme.text),
        dim_style: Style::default().fg(app.theme.text_dim),
    }
    .render(f, body);
}

fn suggests(page: Page) -> bool {
    page == Page::Prefix
}

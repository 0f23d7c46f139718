//! Page rendering dispatch.

pub mod aggregations;
pub mod compare;
pub mod config;
pub mod home;
pub mod index;
pub mod search;
pub mod upload;

use crate::keys::InputMode;
use crate::nav::Page;
use crate::state::App;
use crate::theme::level_color;
use crate::widgets::FormPanel;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::Span,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

pub fn render_view(f: &mut Frame<'_>, app: &App) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.size());

    render_header(f, app, layout[0]);

    match app.active_page {
        Page::Home => home::render(f, app, layout[1]),
        Page::IndexCatalog | Page::VectorIndex => index::render(f, app, layout[1]),
        Page::Aggregations => aggregations::render(f, app, layout[1]),
        Page::VectorSearch | Page::HybridSearch => compare::render(f, app, layout[1]),
        Page::Upload => upload::render(f, app, layout[1]),
        Page::Config => config::render(f, app, layout[1]),
        _ => search::render(f, app, layout[1]),
    }

    render_footer(f, app, layout[2]);

    if app.show_help {
        render_help(f, app);
    }
}

/// Static explanation shown above each page.
pub fn help_text(page: Page) -> &'static str {
    match page {
        Page::Home => "Pick a query type. Each page builds the request body for you and shows what came back.",
        Page::IndexCatalog => "Load the sample product catalog into the search domain before trying the keyword pages. [Enter] index, [d] delete.",
        Page::Prefix => "Prefix queries match terms that start with the typed text. Suggestions update as you type; [Enter] loads the cards.",
        Page::Match => "A match query analyzes the term and requires the given percentage of its tokens to match. Prices are stored in cents.",
        Page::MultiMatch => "Search one term across several fields. Enable fields and raise a boost to weigh it higher. Cards refresh as you type once the term has 3 characters.",
        Page::Wildcard => "Use * for any run of characters and ? for exactly one, e.g. sh*s or sh?e.",
        Page::Range => "Filter products by price, for example everything greater than or equal to 10000.",
        Page::Fuzzy => "Fuzzy search tolerates typos: try 'shose' for shoes.",
        Page::Complex => "Combine free text with per-field filters. Empty fields are left out of the query.",
        Page::Aggregations => "Facets over the whole catalog: categories, colors, price statistics and price bands. [Enter] refresh.",
        Page::VectorIndex => "Create embeddings for every product so semantic search can run. [Enter] index, [d] delete.",
        Page::VectorSearch => "Semantic search by meaning, run against on-disk and in-memory vector indexes side by side.",
        Page::HybridSearch => "Keyword and vector scores combined, compared across on-disk and in-memory indexes.",
        Page::Upload => "Add your own product: its image is uploaded to storage and the product is indexed into the catalog.",
        Page::Config => "Active configuration. Edit the TOML file and restart to change it.",
    }
}

fn render_header(f: &mut Frame<'_>, app: &App, area: Rect) {
    let title = format!(
        "SEARCHLAB | {} [{}/{}] | {}",
        app.active_page.title(),
        app.active_page.index() + 1,
        Page::all().len(),
        app.config.auth.identity
    );
    let block = Block::default().borders(Borders::ALL).title(Span::styled(
        title,
        Style::default().fg(app.theme.primary),
    ));
    let loading = app
        .status(app.active_page)
        .map(|s| s.loading)
        .unwrap_or(false);
    let line = if loading { "working..." } else { "" };
    f.render_widget(
        Paragraph::new(line)
            .style(Style::default().fg(app.theme.tertiary))
            .block(block),
        area,
    );
}

fn render_footer(f: &mut Frame<'_>, app: &App, area: Rect) {
    let help = match app.mode {
        InputMode::Editing => "typing • Enter submit • Esc stop editing • Tab next field",
        InputMode::Normal => {
            "Tab/1-0 page • j/k move • i edit • space toggle • h/l adjust • Enter run • ? help • q quit"
        }
    };
    let alert = app.status(app.active_page).and_then(|s| s.alert.as_ref());
    let (text, style) = if let Some(note) = alert {
        (
            format!("{}: {}", note.level.label(), note.message),
            Style::default().fg(level_color(note.level, &app.theme)),
        )
    } else {
        (help.to_string(), Style::default().fg(app.theme.text_dim))
    };
    let footer = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL))
        .style(style);
    f.render_widget(footer, area);
}

fn render_help(f: &mut Frame<'_>, app: &App) {
    let area = centered(f.size(), 70, 50);
    let body = format!(
        "{}\n\nx / Esc  dismiss alert\nd        delete index (index pages)\nPgUp/PgDn scroll results\n? close help",
        help_text(app.active_page)
    );
    let popup = Paragraph::new(body)
        .wrap(Wrap { trim: false })
        .style(Style::default().fg(app.theme.text))
        .block(
            Block::default()
                .title(format!("Help: {}", app.active_page.title()))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border_focus)),
        );
    f.render_widget(Clear, area);
    f.render_widget(popup, area);
}

fn centered(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

/// Page help paragraph.
pub(crate) fn render_intro(f: &mut Frame<'_>, app: &App, area: Rect) {
    let intro = Paragraph::new(help_text(app.active_page))
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(app.theme.text_dim))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(intro, area);
}

pub(crate) fn render_form(f: &mut Frame<'_>, app: &App, area: Rect) {
    let rows = app
        .form(app.active_page)
        .map(|form| form.rows())
        .unwrap_or_default();
    let focus = app.status(app.active_page).map(|s| s.focus).unwrap_or(0);
    let panel = FormPanel {
        title: "Query",
        rows: &rows,
        focus,
        editing: app.mode == InputMode::Editing,
        label_style: Style::default().fg(app.theme.text_dim),
        value_style: Style::default().fg(app.theme.text),
        focus_style: Style::default().fg(app.theme.primary),
        hint_style: Style::default().fg(app.theme.text_muted),
    };
    panel.render(f, area);
}

/// Height a form needs including its border.
pub(crate) fn form_height(app: &App) -> u16 {
    app.form(app.active_page)
        .map(|form| form.row_count() as u16 + 2)
        .unwrap_or(0)
}

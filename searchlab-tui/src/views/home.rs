//! Home page: the list of query types.

use crate::nav::Page;
use crate::state::App;
use crate::views::render_intro;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

pub fn render(f: &mut Frame<'_>, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(0)])
        .split(area);

    render_intro(f, app, chunks[0]);

    let items: Vec<ListItem> = Page::all()
        .iter()
        .enumerate()
        .map(|(idx, page)| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:>2} {:<16}", idx + 1, page.title()),
                    Style::default().fg(app.theme.primary),
                ),
                Span::styled(page.summary(), Style::default().fg(app.theme.text_dim)),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().title("Pages").borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .bg(app.theme.bg_highlight)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");
    let mut state = ListState::default();
    state.select(Some(app.home_selected));
    f.render_stateful_widget(list, chunks[1], &mut state);
}

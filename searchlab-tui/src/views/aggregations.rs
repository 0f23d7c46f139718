//! Aggregations page: facets and price statistics.

use crate::state::App;
use crate::theme::share_color;
use crate::views::render_intro;
use crate::widgets::{DetailPanel, ShareBar, StatusIndicator};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::{Block, Borders, List, ListItem},
    Frame,
};
use searchlab_core::{format_usd_whole, AggregationReport, Bucket};

pub fn render(f: &mut Frame<'_>, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    render_intro(f, app, chunks[0]);

    let loading = app
        .status(app.active_page)
        .map(|s| s.loading)
        .unwrap_or(false);
    let summary = if loading {
        "Loading...".to_string()
    } else {
        match (&app.aggregation_report, app.aggregation_took) {
            (Some(report), _) if report.is_empty() => "No aggregations returned".to_string(),
            (Some(report), took) => format!(
                "{} priced products{}",
                report.price_stats.count,
                took.map(|t| format!(" in {} ms", t)).unwrap_or_default()
            ),
            (None, _) => "Press Enter to load".to_string(),
        }
    };
    StatusIndicator {
        title: "Catalog".to_string(),
        status: summary,
        style: Style::default().fg(app.theme.secondary),
    }
    .render(f, chunks[1]);

    let Some(report) = &app.aggregation_report else {
        return;
    };

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[2]);
    render_facets(f, app, report, columns[0]);
    render_prices(f, app, report, columns[1]);
}

fn render_facets(f: &mut Frame<'_>, app: &App, report: &AggregationReport, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_share_bars(f, app, report, "Categories", &report.categories, chunks[0]);

    let colors: Vec<ListItem> = report
        .colors
        .iter()
        .map(|b| ListItem::new(format!("{:<12} {}", b.label(), b.doc_count)))
        .collect();
    f.render_widget(
        List::new(colors).block(Block::default().title("Colors").borders(Borders::ALL)),
        chunks[1],
    );
}

fn render_share_bars(
    f: &mut Frame<'_>,
    app: &App,
    report: &AggregationReport,
    title: &str,
    buckets: &[Bucket],
    area: Rect,
) {
    let block = Block::default().title(title).borders(Borders::ALL);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            buckets
                .iter()
                .map(|_| Constraint::Length(3))
                .chain(std::iter::once(Constraint::Min(0)))
                .collect::<Vec<_>>(),
        )
        .split(inner);

    for (bucket, row) in buckets.iter().zip(rows.iter()) {
        let percent = report.share(bucket.doc_count);
        ShareBar {
            label: format!("{} ({})", bucket.label(), bucket.doc_count),
            percent,
            style: Style::default().fg(share_color(percent, &app.theme)),
        }
        .render(f, *row);
    }
}

fn render_prices(f: &mut Frame<'_>, app: &App, report: &AggregationReport, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7),
            Constraint::Percentage(50),
            Constraint::Min(0),
        ])
        .split(area);

    let stats = &report.price_stats;
    let usd = |v: Option<f64>| v.map(format_usd_whole).unwrap_or_else(|| "-".to_string());
    let mut fields = Vec::new();
    if stats.count > 0 {
        fields.push(("Count", stats.count.to_string()));
        fields.push(("Min", usd(stats.min)));
        fields.push(("Max", usd(stats.max)));
        fields.push(("Average", usd(stats.avg)));
        fields.push(("Total", usd(stats.sum)));
    }
    DetailPanel {
        title: "Price statistics",
        fields,
        style: Style::default().fg(app.theme.secondary),
        placeholder: "No price statistics",
    }
    .render(f, chunks[0]);

    let ranges: Vec<ListItem> = report
        .price_ranges
        .iter()
        .map(|b| ListItem::new(format!("{:<22} {}", b.label(), b.doc_count)))
        .collect();
    f.render_widget(
        List::new(ranges).block(Block::default().title("Price ranges").borders(Borders::ALL)),
        chunks[1],
    );

    let averages: Vec<ListItem> = report
        .avg_price_by_category
        .iter()
        .map(|b| ListItem::new(format!("{:<12} {}", b.label(), usd(b.metric))))
        .collect();
    f.render_widget(
        List::new(averages).block(
            Block::default()
                .title("Average price by category")
                .borders(Borders::ALL),
        ),
        chunks[2],
    );
}

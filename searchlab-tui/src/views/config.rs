//! Configuration viewer.

use crate::state::App;
use crate::widgets::DetailPanel;
use ratatui::{layout::Rect, style::Style, Frame};

pub fn render(f: &mut Frame<'_>, app: &App, area: Rect) {
    let config = &app.config;
    let detail = DetailPanel {
        title: "Config",
        fields: vec![
            ("API base URL", config.api_base_url.clone()),
            ("Identity", config.auth.identity.clone()),
            ("ID token", "<redacted>".to_string()),
            ("Request timeout", format!("{} ms", config.request_timeout_ms)),
            ("Refresh interval", format!("{} ms", config.refresh_interval_ms)),
            ("State file", config.persistence_path.display().to_string()),
            ("Log file", config.error_log_path.display().to_string()),
            ("Theme", config.theme.name.clone()),
        ],
        style: Style::default().fg(app.theme.secondary),
        placeholder: "",
    };
    detail.render(f, area);
}

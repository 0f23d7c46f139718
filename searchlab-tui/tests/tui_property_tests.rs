use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use proptest::prelude::*;
use searchlab_tui::config::{AuthConfig, ConfigError, ThemeConfig, TuiConfig};
use searchlab_tui::keys::{map_key, Action, InputMode};
use searchlab_tui::nav::Page;
use searchlab_tui::notifications::NotificationLevel;
use searchlab_tui::theme::{level_color, share_color, SynthBruteTheme};
use std::io::Write;

fn base_config() -> TuiConfig {
    TuiConfig {
        api_base_url: "https://api.example.com/prod".to_string(),
        auth: AuthConfig {
            id_token: "header.payload.signature".to_string(),
            identity: "tester@example.com".to_string(),
        },
        request_timeout_ms: 5_000,
        refresh_interval_ms: 250,
        persistence_path: "tmp/searchlab-ui.json".into(),
        error_log_path: "tmp/searchlab.log".into(),
        theme: ThemeConfig {
            name: "synthbrute".to_string(),
        },
    }
}

fn press(code: KeyCode) -> KeyEvent {
    KeyEvent {
        code,
        modifiers: KeyModifiers::NONE,
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    }
}

const VALID_TOML: &str = r#"
api_base_url = "https://api.example.com/prod"
request_timeout_ms = 5000
refresh_interval_ms = 250
persistence_path = "tmp/searchlab-ui.json"
error_log_path = "tmp/searchlab.log"

[auth]
id_token = "header.payload.signature"
identity = "tester@example.com"

[theme]
name = "synthbrute"
"#;

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn base_config_is_valid() {
    assert!(base_config().validate().is_ok());
}

#[test]
fn config_requires_id_token() {
    let mut config = base_config();
    config.auth.id_token = "  ".to_string();
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidValue { field: "auth.id_token", .. })
    ));
}

#[test]
fn config_requires_http_base_url() {
    let mut config = base_config();
    config.api_base_url = "ftp://api.example.com".to_string();
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidValue { field: "api_base_url", .. })
    ));
}

#[test]
fn config_rejects_zero_timeout() {
    let mut config = base_config();
    config.request_timeout_ms = 0;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidValue { field: "request_timeout_ms", .. })
    ));
}

#[test]
fn config_rejects_unknown_theme() {
    let mut config = base_config();
    config.theme.name = "solarized".to_string();
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidValue { field: "theme.name", .. })
    ));
}

#[test]
fn config_parses_from_file() {
    let file = write_config(VALID_TOML);
    let config = TuiConfig::from_path(file.path()).unwrap();
    assert!(config.validate().is_ok());
    assert_eq!(config.api_base_url, "https://api.example.com/prod");
    assert_eq!(config.auth.identity, "tester@example.com");

    let session = config.session().unwrap();
    assert_eq!(session.id_token(), "header.payload.signature");
}

#[test]
fn config_rejects_unknown_fields() {
    let contents = format!("{}\ntenant_id = \"abc\"\n", VALID_TOML.trim_end());
    let file = write_config(&contents);
    assert!(matches!(
        TuiConfig::from_path(file.path()),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn config_rejects_missing_fields() {
    let file = write_config("api_base_url = \"https://api.example.com\"\n");
    assert!(matches!(
        TuiConfig::from_path(file.path()),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn config_debug_redacts_token() {
    let rendered = format!("{:?}", base_config());
    assert!(!rendered.contains("header.payload.signature"));
    assert!(rendered.contains("<redacted>"));
}

#[test]
fn theme_level_colors_are_distinct() {
    let theme = SynthBruteTheme::synthbrute();
    assert_eq!(level_color(NotificationLevel::Error, &theme), theme.error);
    assert_eq!(level_color(NotificationLevel::Success, &theme), theme.success);
    assert_ne!(
        level_color(NotificationLevel::Info, &theme),
        level_color(NotificationLevel::Warning, &theme)
    );
}

#[test]
fn theme_share_color_thresholds() {
    let theme = SynthBruteTheme::synthbrute();
    assert_eq!(share_color(5.0, &theme), theme.primary_dim);
    assert_eq!(share_color(20.0, &theme), theme.primary);
    assert_eq!(share_color(75.0, &theme), theme.secondary);
}

#[test]
fn page_keys_reach_every_numbered_page() {
    for index in 0..10 {
        let digit = if index == 9 {
            '0'
        } else {
            char::from(b'1' + index as u8)
        };
        let action = map_key(press(KeyCode::Char(digit)), InputMode::Normal);
        assert_eq!(action, Some(Action::SwitchPage(index)));
        assert!(Page::from_index(index).is_some());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_editing_inserts_every_char(c in any::<char>()) {
        let action = map_key(press(KeyCode::Char(c)), InputMode::Editing);
        prop_assert_eq!(action, Some(Action::Insert(c)));
    }

    #[test]
    fn prop_digits_switch_pages(d in 1u8..=9) {
        let action = map_key(press(KeyCode::Char(char::from(b'0' + d))), InputMode::Normal);
        prop_assert_eq!(action, Some(Action::SwitchPage(usize::from(d) - 1)));
    }

    #[test]
    fn prop_release_events_are_ignored(c in any::<char>(), editing in any::<bool>()) {
        let mut event = press(KeyCode::Char(c));
        event.kind = KeyEventKind::Release;
        let mode = if editing { InputMode::Editing } else { InputMode::Normal };
        prop_assert_eq!(map_key(event, mode), None);
    }

    #[test]
    fn prop_share_color_is_monotonic(a in 0.0f64..100.0, b in 0.0f64..100.0) {
        let theme = SynthBruteTheme::synthbrute();
        let rank = |p: f64| {
            let color = share_color(p, &theme);
            if color == theme.primary_dim { 0 } else if color == theme.primary { 1 } else { 2 }
        };
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(rank(lo) <= rank(hi));
    }
}

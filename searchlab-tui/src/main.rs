//! searchlab TUI entry point.

use crossterm::{
    event::{self, Event as CrosstermEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use searchlab_core::Session;
use searchlab_tui::api_client::GatewayClient;
use searchlab_tui::config::TuiConfig;
use searchlab_tui::dispatch::{execute as run_dispatch, Dispatch};
use searchlab_tui::error::TuiError;
use searchlab_tui::events::TuiEvent;
use searchlab_tui::keys::map_key;
use searchlab_tui::persistence::{self, PersistedState};
use searchlab_tui::state::App;
use searchlab_tui::telemetry::init_tracing;
use searchlab_tui::views::render_view;
use std::io::{self, Stdout};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

#[tokio::main]
async fn main() -> Result<(), TuiError> {
    let config = TuiConfig::load()?;
    init_tracing(&config.error_log_path)?;
    let session = config.session()?;
    let client = GatewayClient::new(&config)?;
    info!(base_url = client.base_url(), identity = session.identity(), "searchlab starting");

    let mut app = App::new(config);
    match persistence::load(&app.config.persistence_path) {
        Ok(Some(state)) => app.switch_to(state.active_page),
        Ok(None) => {}
        Err(err) => warn!(error = %err, "ignoring unreadable UI state"),
    }

    let mut terminal = setup_terminal()?;
    let _guard = TerminalGuard {};

    let (event_tx, mut event_rx) = mpsc::channel::<TuiEvent>(256);
    spawn_input_reader(event_tx.clone());

    let tick_rate = Duration::from_millis(app.config.refresh_interval_ms);
    let mut ticker = tokio::time::interval(tick_rate);

    loop {
        terminal.draw(|f| render_view(f, &app))?;

        tokio::select! {
            _ = ticker.tick() => {}
            Some(event) = event_rx.recv() => {
                handle_event(&mut app, event, &client, &session, &event_tx);
            }
        }

        if app.should_quit {
            break;
        }
    }

    let persisted = PersistedState {
        active_page: app.active_page,
    };
    if let Err(err) = persistence::save(&app.config.persistence_path, &persisted) {
        warn!(error = %err, "failed to persist UI state");
    }
    info!("searchlab stopped");

    Ok(())
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>, TuiError> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let mut stdout = io::stdout();
        let _ = execute!(stdout, LeaveAlternateScreen);
    }
}

fn spawn_input_reader(sender: mpsc::Sender<TuiEvent>) {
    std::thread::spawn(move || loop {
        if let Ok(true) = event::poll(Duration::from_millis(200)) {
            if let Ok(evt) = event::read() {
                let sent = match evt {
                    CrosstermEvent::Key(key) => sender.blocking_send(TuiEvent::Input(key)),
                    CrosstermEvent::Resize(width, height) => {
                        sender.blocking_send(TuiEvent::Resize { width, height })
                    }
                    _ => Ok(()),
                };
                if sent.is_err() {
                    break;
                }
            }
        }
    });
}

fn handle_event(
    app: &mut App,
    event: TuiEvent,
    client: &GatewayClient,
    session: &Session,
    sender: &mpsc::Sender<TuiEvent>,
) {
    match event {
        TuiEvent::Input(key) => {
            if let Some(action) = map_key(key, app.mode) {
                for dispatch in app.handle_action(action) {
                    spawn_dispatch(client, session, sender, dispatch);
                }
            }
        }
        TuiEvent::Outcome(outcome) => {
            app.apply(*outcome);
        }
        TuiEvent::Resize { width, height } => debug!(width, height, "terminal resized"),
    }
}

/// Run a call off the UI loop; its outcome comes back as an event.
fn spawn_dispatch(
    client: &GatewayClient,
    session: &Session,
    sender: &mpsc::Sender<TuiEvent>,
    dispatch: Dispatch,
) {
    let client = client.clone();
    let session = session.clone();
    let sender = sender.clone();
    tokio::spawn(async move {
        let outcome = run_dispatch(&client, &session, dispatch).await;
        if sender.send(TuiEvent::Outcome(Box::new(outcome))).await.is_err() {
            debug!("event loop gone, outcome discarded");
        }
    });
}

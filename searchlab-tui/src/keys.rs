//! Keybinding definitions for the TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Normal mode navigates; editing mode sends keystrokes to the focused field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Editing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    NextPage,
    PrevPage,
    SwitchPage(usize),
    MoveUp,
    MoveDown,
    ScrollUp,
    ScrollDown,
    StartEdit,
    Insert(char),
    Backspace,
    Submit,
    Cancel,
    Toggle,
    Increase,
    Decrease,
    Delete,
    Dismiss,
    OpenHelp,
}

pub fn map_key(event: KeyEvent, mode: InputMode) -> Option<Action> {
    let KeyEvent {
        code,
        modifiers,
        kind,
        ..
    } = event;

    if kind == KeyEventKind::Release {
        return None;
    }

    if modifiers.contains(KeyModifiers::CONTROL) {
        return match code {
            KeyCode::Char('c') => Some(Action::Quit),
            _ => None,
        };
    }

    match mode {
        InputMode::Editing => map_editing(code),
        InputMode::Normal => map_normal(code),
    }
}

fn map_editing(code: KeyCode) -> Option<Action> {
    match code {
        KeyCode::Esc => Some(Action::Cancel),
        KeyCode::Enter => Some(Action::Submit),
        KeyCode::Backspace => Some(Action::Backspace),
        KeyCode::Tab | KeyCode::Down => Some(Action::MoveDown),
        KeyCode::BackTab | KeyCode::Up => Some(Action::MoveUp),
        KeyCode::Char(c) => Some(Action::Insert(c)),
        _ => None,
    }
}

fn map_normal(code: KeyCode) -> Option<Action> {
    match code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char('?') => Some(Action::OpenHelp),
        KeyCode::Char('i') | KeyCode::Char('e') => Some(Action::StartEdit),
        KeyCode::Char('d') => Some(Action::Delete),
        KeyCode::Char('x') | KeyCode::Esc => Some(Action::Dismiss),
        KeyCode::Char(' ') => Some(Action::Toggle),
        KeyCode::Enter => Some(Action::Submit),
        KeyCode::Tab => Some(Action::NextPage),
        KeyCode::BackTab => Some(Action::PrevPage),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::MoveUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::MoveDown),
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('-') => Some(Action::Decrease),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('+') => Some(Action::Increase),
        KeyCode::PageUp => Some(Action::ScrollUp),
        KeyCode::PageDown => Some(Action::ScrollDown),
        KeyCode::Char(c) if c.is_ascii_digit() => {
            let idx = match c {
                '0' => 9,
                d => d.to_digit(10)? as usize - 1,
            };
            Some(Action::SwitchPage(idx))
        }
        _ => None,
    }
}

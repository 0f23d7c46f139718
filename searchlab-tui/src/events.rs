//! Event types for the TUI event loop.

use crate::dispatch::Outcome;
use crossterm::event::KeyEvent;

#[derive(Debug)]
pub enum TuiEvent {
    Input(KeyEvent),
    Resize { width: u16, height: u16 },
    Outcome(Box<Outcome>),
}

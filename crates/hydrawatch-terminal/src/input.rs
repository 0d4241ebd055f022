//! Non-blocking input polling.
//!
//! Each tick drains pending terminal events until it finds one typed
//! character. Resize events seen along the way collapse into a single
//! pending-resize flag that the render loop consumes at the top of its next
//! iteration.

use std::time::Duration;

use crossterm::event::{Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::error::TuiError;
use crate::terminal::Terminal;

/// What one tick of polling produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickInput {
    /// The typed character, if any.
    pub key: Option<char>,
    /// Ctrl+C was pressed.
    pub quit: bool,
}

/// Ctrl+C. Raw mode turns it into a key event instead of SIGINT.
pub fn is_quit(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

/// No modifier other than Shift, so Ctrl+S is not read as `s`.
fn is_plain(key: &KeyEvent) -> bool {
    (key.modifiers - KeyModifiers::SHIFT).is_empty()
}

/// Polls the terminal without blocking and tracks resize notifications.
#[derive(Debug, Default)]
pub struct InputPoller {
    resize_pending: bool,
}

impl InputPoller {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume the pending-resize flag.
    pub fn take_resize(&mut self) -> bool {
        std::mem::take(&mut self.resize_pending)
    }

    pub const fn resize_pending(&self) -> bool {
        self.resize_pending
    }

    /// Read at most one character. Never waits for input.
    pub fn poll_tick<T: Terminal + ?Sized>(&mut self, terminal: &T) -> Result<TickInput, TuiError> {
        let mut input = TickInput::default();
        while terminal.poll(Duration::ZERO)? {
            match terminal.read_event()? {
                CrosstermEvent::Resize(..) => self.resize_pending = true,
                CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                    if is_quit(&key) {
                        input.quit = true;
                        break;
                    }
                    if !is_plain(&key) {
                        continue;
                    }
                    if let KeyCode::Char(ch) = key.code {
                        input.key = Some(ch);
                        break;
                    }
                }
                _ => {}
            }
        }
        Ok(input)
    }
}

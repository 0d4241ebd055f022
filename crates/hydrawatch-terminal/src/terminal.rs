//! Terminal abstraction: a crossterm implementation for real runs and a
//! scripted one for tests.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::io::{self, Stdout, Write};
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, Event as CrosstermEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};

use crate::error::TuiError;

/// Terminal operations the render loop depends on.
pub trait Terminal {
    /// Raw mode, alternate screen, hidden cursor.
    fn enter(&mut self) -> Result<(), TuiError>;
    /// Undo [`Terminal::enter`]. Best effort; never fails on a half-set-up terminal.
    fn leave(&mut self) -> Result<(), TuiError>;
    /// `(columns, rows)`.
    fn size(&self) -> Result<(u16, u16), TuiError>;
    fn poll(&self, timeout: Duration) -> Result<bool, TuiError>;
    fn read_event(&self) -> Result<CrosstermEvent, TuiError>;
    /// Write one complete frame and flush.
    fn write_frame(&mut self, frame: &[u8]) -> Result<(), TuiError>;
}

/// Real crossterm terminal on stdout.
pub struct CrosstermTerminal {
    stdout: Stdout,
}

impl CrosstermTerminal {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
        }
    }
}

impl Default for CrosstermTerminal {
    fn default() -> Self {
        Self::new()
    }
}

impl Terminal for CrosstermTerminal {
    fn enter(&mut self) -> Result<(), TuiError> {
        enable_raw_mode().map_err(|_| TuiError::TerminalNotAvailable)?;
        execute!(self.stdout, EnterAlternateScreen, cursor::Hide)?;
        Ok(())
    }

    fn leave(&mut self) -> Result<(), TuiError> {
        let _ = execute!(self.stdout, cursor::Show, LeaveAlternateScreen);
        let _ = disable_raw_mode();
        Ok(())
    }

    fn size(&self) -> Result<(u16, u16), TuiError> {
        Ok(crossterm::terminal::size()?)
    }

    fn poll(&self, timeout: Duration) -> Result<bool, TuiError> {
        Ok(event::poll(timeout)?)
    }

    fn read_event(&self) -> Result<CrosstermEvent, TuiError> {
        Ok(event::read()?)
    }

    fn write_frame(&mut self, frame: &[u8]) -> Result<(), TuiError> {
        self.stdout.write_all(frame)?;
        self.stdout.flush()?;
        Ok(())
    }
}

/// Scripted terminal with a generic writer for capturing output.
///
/// Poll results and events are replayed from queues; a resize event updates
/// the reported size when it is read.
pub struct TestableTerminal<W: Write> {
    writer: W,
    size: Cell<(u16, u16)>,
    raw_mode: bool,
    alternate_screen: bool,
    frames: usize,
    events: RefCell<VecDeque<CrosstermEvent>>,
    poll_results: RefCell<VecDeque<bool>>,
    size_queries: Cell<usize>,
}

impl<W: Write> TestableTerminal<W> {
    pub fn new(writer: W, width: u16, height: u16) -> Self {
        Self {
            writer,
            size: Cell::new((width, height)),
            raw_mode: false,
            alternate_screen: false,
            frames: 0,
            events: RefCell::new(VecDeque::new()),
            poll_results: RefCell::new(VecDeque::new()),
            size_queries: Cell::new(0),
        }
    }

    /// Queue events to be returned by `read_event`.
    pub fn with_events(self, events: Vec<CrosstermEvent>) -> Self {
        *self.events.borrow_mut() = events.into_iter().collect();
        self
    }

    /// Queue poll results. Once exhausted, `poll` reports no input.
    pub fn with_polls(self, polls: Vec<bool>) -> Self {
        *self.poll_results.borrow_mut() = polls.into_iter().collect();
        self
    }

    pub fn is_raw_mode(&self) -> bool {
        self.raw_mode
    }

    pub fn is_alternate_screen(&self) -> bool {
        self.alternate_screen
    }

    /// Frames written so far.
    pub fn frames_written(&self) -> usize {
        self.frames
    }

    /// How many times the geometry was queried.
    pub fn size_queries(&self) -> usize {
        self.size_queries.get()
    }

    /// Get the underlying writer (consumes self).
    pub fn into_writer(self) -> W {
        self.writer
    }
}

impl<W: Write> Terminal for TestableTerminal<W> {
    fn enter(&mut self) -> Result<(), TuiError> {
        self.raw_mode = true;
        self.alternate_screen = true;
        execute!(self.writer, EnterAlternateScreen, cursor::Hide)?;
        Ok(())
    }

    fn leave(&mut self) -> Result<(), TuiError> {
        self.raw_mode = false;
        self.alternate_screen = false;
        let _ = execute!(self.writer, cursor::Show, LeaveAlternateScreen);
        Ok(())
    }

    fn size(&self) -> Result<(u16, u16), TuiError> {
        self.size_queries.set(self.size_queries.get() + 1);
        Ok(self.size.get())
    }

    fn poll(&self, _timeout: Duration) -> Result<bool, TuiError> {
        Ok(self.poll_results.borrow_mut().pop_front().unwrap_or(false))
    }

    fn read_event(&self) -> Result<CrosstermEvent, TuiError> {
        let event = self
            .events
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| TuiError::Io(io::Error::new(io::ErrorKind::WouldBlock, "no events")))?;
        if let CrosstermEvent::Resize(width, height) = event {
            self.size.set((width, height));
        }
        Ok(event)
    }

    fn write_frame(&mut self, frame: &[u8]) -> Result<(), TuiError> {
        self.writer.write_all(frame)?;
        self.writer.flush()?;
        self.frames += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent};

    #[test]
    fn test_testable_enter_leave() {
        let mut term = TestableTerminal::new(Vec::new(), 80, 24);
        term.enter().unwrap();
        assert!(term.is_raw_mode());
        assert!(term.is_alternate_screen());
        term.leave().unwrap();
        assert!(!term.is_raw_mode());
        let output = String::from_utf8(term.into_writer()).unwrap();
        assert!(output.contains("\x1b[?1049h"));
        assert!(output.contains("\x1b[?1049l"));
    }

    #[test]
    fn test_testable_polls_then_defaults_false() {
        let term = TestableTerminal::new(Vec::new(), 80, 24).with_polls(vec![true, false]);
        assert!(term.poll(Duration::ZERO).unwrap());
        assert!(!term.poll(Duration::ZERO).unwrap());
        assert!(!term.poll(Duration::ZERO).unwrap());
    }

    #[test]
    fn test_testable_resize_updates_size() {
        let term = TestableTerminal::new(Vec::new(), 80, 24)
            .with_events(vec![CrosstermEvent::Resize(100, 40)]);
        assert_eq!(term.size().unwrap(), (80, 24));
        term.read_event().unwrap();
        assert_eq!(term.size().unwrap(), (100, 40));
        assert_eq!(term.size_queries(), 2);
    }

    #[test]
    fn test_testable_read_event_empty() {
        let term = TestableTerminal::new(Vec::new(), 80, 24);
        assert!(matches!(term.read_event(), Err(TuiError::Io(_))));
        let term = TestableTerminal::new(Vec::new(), 80, 24)
            .with_events(vec![CrosstermEvent::Key(KeyEvent::from(KeyCode::Char('s')))]);
        assert!(matches!(term.read_event(), Ok(CrosstermEvent::Key(_))));
    }

    #[test]
    fn test_write_frame_counts() {
        let mut term = TestableTerminal::new(Vec::new(), 80, 24);
        term.write_frame(b"one").unwrap();
        term.write_frame(b"two").unwrap();
        assert_eq!(term.frames_written(), 2);
        assert_eq!(term.into_writer(), b"onetwo".to_vec());
    }
}

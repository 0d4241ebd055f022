//! The render loop.
//!
//! An outer loop queries terminal geometry; an inner loop ticks the dashboard
//! until a resize is pending, then falls back to the outer loop. Interaction
//! state lives in the [`Dashboard`] and survives every restart.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use hydrawatch_core::{Dashboard, DeviceSource, HydraConfig};

use crate::error::TuiError;
use crate::input::InputPoller;
use crate::terminal::Terminal;

/// Loop timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunnerConfig {
    /// Sleep between ticks.
    pub refresh: Duration,
    /// Stop after this many ticks. `None` runs until Ctrl+C.
    pub max_ticks: Option<u64>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            refresh: Duration::from_millis(100),
            max_ticks: None,
        }
    }
}

impl RunnerConfig {
    pub fn from_config(config: &HydraConfig) -> Self {
        Self {
            refresh: Duration::from_millis(config.refresh_ms),
            ..Default::default()
        }
    }
}

/// Wall-clock unix seconds.
pub fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| i64::try_from(d.as_secs()).unwrap_or(i64::MAX))
        .unwrap_or_default()
}

/// Drives a [`Dashboard`] against a terminal.
pub struct Runner<'a, T: Terminal> {
    terminal: T,
    dashboard: Dashboard,
    source: &'a dyn DeviceSource,
    config: RunnerConfig,
    poller: InputPoller,
    clock: Box<dyn Fn() -> i64 + 'a>,
    ticks: u64,
    restarts: u64,
}

impl<'a, T: Terminal> Runner<'a, T> {
    pub fn new(terminal: T, dashboard: Dashboard, source: &'a dyn DeviceSource) -> Self {
        Self {
            terminal,
            dashboard,
            source,
            config: RunnerConfig::default(),
            poller: InputPoller::new(),
            clock: Box::new(unix_now),
            ticks: 0,
            restarts: 0,
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: RunnerConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the wall clock.
    #[must_use]
    pub fn with_clock(mut self, clock: impl Fn() -> i64 + 'a) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub const fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }

    pub const fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Geometry restarts caused by resizes.
    pub const fn restarts(&self) -> u64 {
        self.restarts
    }

    pub fn into_terminal(self) -> T {
        self.terminal
    }

    /// Enter the terminal, loop until stopped and restore the terminal, even
    /// when the loop fails.
    pub fn run(&mut self) -> Result<(), TuiError> {
        self.terminal.enter()?;
        let result = self.run_loop();
        self.terminal.leave()?;
        result
    }

    fn run_loop(&mut self) -> Result<(), TuiError> {
        loop {
            let (_, rows) = self.terminal.size()?;
            let height = usize::from(rows);
            tracing::debug!(height, "terminal geometry");

            loop {
                if self.poller.take_resize() {
                    self.restarts += 1;
                    break;
                }

                let input = self.poller.poll_tick(&self.terminal)?;
                if input.quit {
                    tracing::info!(ticks = self.ticks, "stopped by user");
                    return Ok(());
                }

                let now = (self.clock)();
                if let Some(frame) = self
                    .dashboard
                    .tick_guarded(self.source, input.key, height, now)
                {
                    self.terminal.write_frame(frame.as_bytes())?;
                }

                self.ticks += 1;
                if self.config.max_ticks.is_some_and(|max| self.ticks >= max) {
                    return Ok(());
                }
                std::thread::sleep(self.config.refresh);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::TestableTerminal;
    use crossterm::event::{Event as CrosstermEvent, KeyCode, KeyEvent, KeyModifiers};
    use hydrawatch_core::{ColorMode, DeviceRow, DisplayFlags, SharedState, SortOrder};

    const NOW: i64 = 50_000;

    fn fast() -> RunnerConfig {
        RunnerConfig {
            refresh: Duration::ZERO,
            max_ticks: None,
        }
    }

    fn dashboard() -> Dashboard {
        Dashboard::new(&HydraConfig::default(), DisplayFlags::default(), ColorMode::Mono)
    }

    fn ctrl_c() -> CrosstermEvent {
        CrosstermEvent::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL))
    }

    #[test]
    fn test_runner_config_from_hydra_config() {
        let config = HydraConfig {
            refresh_ms: 250,
            ..Default::default()
        };
        assert_eq!(
            RunnerConfig::from_config(&config).refresh,
            Duration::from_millis(250)
        );
    }

    #[test]
    fn test_unix_now_is_positive() {
        assert!(unix_now() > 1_600_000_000);
    }

    #[test]
    fn test_ctrl_c_stops_and_restores() {
        let shared = SharedState::new();
        let term = TestableTerminal::new(Vec::new(), 80, 24)
            .with_polls(vec![false, false, true])
            .with_events(vec![ctrl_c()]);
        let mut runner = Runner::new(term, dashboard(), &shared)
            .with_config(fast())
            .with_clock(|| NOW);
        runner.run().unwrap();
        assert_eq!(runner.ticks(), 2);
        let term = runner.into_terminal();
        assert!(!term.is_raw_mode());
        assert_eq!(term.frames_written(), 2);
    }

    #[test]
    fn test_max_ticks() {
        let shared = SharedState::new();
        let term = TestableTerminal::new(Vec::new(), 80, 24);
        let mut runner = Runner::new(term, dashboard(), &shared).with_config(RunnerConfig {
            refresh: Duration::ZERO,
            max_ticks: Some(5),
        });
        runner.run().unwrap();
        assert_eq!(runner.ticks(), 5);
        assert_eq!(runner.into_terminal().frames_written(), 5);
    }

    #[test]
    fn test_resize_restarts_and_preserves_state() {
        let shared = SharedState::new();
        shared.ingest(DeviceRow::new("A", NOW).with_rssi(-40));
        let term = TestableTerminal::new(Vec::new(), 80, 24)
            .with_polls(vec![true, true, true, false, true])
            .with_events(vec![
                CrosstermEvent::Key(KeyEvent::from(KeyCode::Char('r'))),
                CrosstermEvent::Resize(80, 30),
                CrosstermEvent::Resize(80, 40),
                ctrl_c(),
            ]);
        let mut runner = Runner::new(term, dashboard(), &shared)
            .with_config(fast())
            .with_clock(|| NOW);
        runner.run().unwrap();
        assert_eq!(runner.restarts(), 1);
        assert_eq!(runner.dashboard().state().sort_order, SortOrder::Descending);
        let term = runner.into_terminal();
        assert_eq!(term.size_queries(), 2);
    }
}

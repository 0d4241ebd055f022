//! Terminal front end for hydrawatch.
//!
//! Wraps [`hydrawatch_core::Dashboard`] in a crossterm render loop: raw-mode
//! input polling with resize coalescing, one full-frame write per tick, a
//! welcome screen, capture replay and file logging.
//!
//! # Example
//!
//! ```no_run
//! use hydrawatch_core::{ColorMode, Dashboard, DisplayFlags, HydraConfig, SharedState};
//! use hydrawatch_terminal::{CrosstermTerminal, Runner, RunnerConfig};
//!
//! let config = HydraConfig::load();
//! let shared = SharedState::new();
//! let dashboard = Dashboard::new(&config, DisplayFlags::default(), ColorMode::detect());
//! Runner::new(CrosstermTerminal::new(), dashboard, &shared)
//!     .with_config(RunnerConfig::from_config(&config))
//!     .run()?;
//! # Ok::<(), hydrawatch_terminal::TuiError>(())
//! ```

mod error;
pub mod input;
pub mod logging;
pub mod replay;
pub mod runner;
pub mod terminal;
pub mod welcome;

pub use error::TuiError;
pub use input::{InputPoller, TickInput};
pub use replay::{ReplayFeeder, ReplayStats};
pub use runner::{unix_now, Runner, RunnerConfig};
pub use terminal::{CrosstermTerminal, TestableTerminal, Terminal};

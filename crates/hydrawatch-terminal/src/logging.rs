//! Log sink setup.
//!
//! Stdout belongs to the dashboard, so logs go to a file.

use std::backtrace::Backtrace;
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use tracing::Level;
use tracing_subscriber::{prelude::*, EnvFilter};

use crate::error::TuiError;

/// Default log file location.
pub const DEFAULT_LOG_FILE: &str = "/tmp/hydrawatch.log";

/// Level used when `RUST_LOG` does not say otherwise.
pub const fn log_level(debug: bool) -> Level {
    if debug {
        Level::DEBUG
    } else {
        Level::INFO
    }
}

/// Install a global subscriber writing to `path` (truncated).
pub fn init_logging(path: &Path, debug: bool) -> Result<(), TuiError> {
    let file = File::create(path)?;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(false),
        )
        .with(EnvFilter::from_default_env().add_directive(log_level(debug).into()))
        .try_init()
        .map_err(|e| TuiError::Logging(e.to_string()))?;
    tracing::info!(path = %path.display(), "logging started");
    Ok(())
}

/// Route panic reports into the log instead of the screen.
///
/// Render-pass panics are caught and the dashboard keeps running, so the
/// default hook's stderr output would land on top of the frame.
pub fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        let backtrace = Backtrace::force_capture();
        tracing::error!("{info}\n{backtrace}");
    }));
}

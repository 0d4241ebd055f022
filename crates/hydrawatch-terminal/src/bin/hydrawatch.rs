//! hydrawatch: live Bluetooth device dashboard
//!
//! Run: cargo run -p hydrawatch-terminal --bin hydrawatch -- --replay capture.jsonl

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;

use hydrawatch_core::{ColorMode, Dashboard, DisplayFlags, HydraConfig, SharedState};
use hydrawatch_terminal::logging::{init_logging, install_panic_hook, DEFAULT_LOG_FILE};
use hydrawatch_terminal::welcome::{show_welcome, welcome_message};
use hydrawatch_terminal::{unix_now, CrosstermTerminal, ReplayFeeder, Runner, RunnerConfig, TuiError};

/// Live table of nearby Bluetooth devices
#[derive(Parser, Debug)]
#[command(name = "hydrawatch", version, about, long_about = None)]
struct Cli {
    /// Path to custom config file (YAML)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Seconds after the last sighting before a device leaves the table
    #[arg(short, long)]
    timeout: Option<i64>,

    /// Refresh interval in milliseconds
    #[arg(long)]
    refresh_ms: Option<u64>,

    /// Replay a JSON-lines capture instead of live data
    #[arg(long, value_name = "PATH")]
    replay: Option<PathBuf>,

    /// Delay between replayed records in milliseconds
    #[arg(long)]
    replay_interval_ms: Option<u64>,

    /// Mask hardware addresses on screen
    #[arg(long)]
    demo: bool,

    /// Show record ids and log at debug level
    #[arg(short, long)]
    debug: bool,

    /// Disable colors (use plain text)
    #[arg(long)]
    no_color: bool,

    /// Log file path
    #[arg(long, default_value = DEFAULT_LOG_FILE)]
    log_file: PathBuf,

    /// Render once to stdout and exit
    #[arg(long)]
    render_once: bool,

    /// Terminal height for render-once mode
    #[arg(long, default_value = "40")]
    height: u16,

    /// Dump default configuration to stdout and exit
    #[arg(long)]
    dump_config: bool,

    /// Skip the welcome screen
    #[arg(long)]
    no_welcome: bool,
}

impl Cli {
    /// File config with command-line overrides applied.
    fn resolve_config(&self) -> HydraConfig {
        let mut config = match &self.config {
            Some(path) => HydraConfig::load_from_file(path).unwrap_or_else(|err| {
                tracing::warn!(path = %path.display(), "could not load config, using defaults: {err}");
                HydraConfig::default()
            }),
            None => HydraConfig::load(),
        };
        if let Some(timeout) = self.timeout {
            config.timeout_secs = timeout;
        }
        if let Some(refresh_ms) = self.refresh_ms {
            config.refresh_ms = refresh_ms;
        }
        if let Some(interval) = self.replay_interval_ms {
            config.replay_interval_ms = interval;
        }
        config.demo_mode |= self.demo;
        config.debug |= self.debug;
        config
    }
}

fn main() -> Result<(), TuiError> {
    let cli = Cli::parse();

    if cli.dump_config {
        println!("{}", HydraConfig::default_yaml());
        return Ok(());
    }

    init_logging(&cli.log_file, cli.debug)?;
    let config = cli.resolve_config();
    tracing::debug!(?config, "resolved configuration");

    let flags = DisplayFlags {
        file_replay: cli.replay.clone(),
        debug: config.debug,
        demo: config.demo_mode,
    };
    let color = if cli.no_color {
        ColorMode::Mono
    } else {
        ColorMode::detect()
    };
    let shared = Arc::new(SharedState::new());

    if cli.render_once {
        if let Some(path) = &cli.replay {
            ReplayFeeder::spawn(path, Duration::ZERO, Arc::clone(&shared))?.join()?;
        }
        let mut dashboard = Dashboard::new(&config, flags, color);
        let frame = dashboard.tick(shared.as_ref(), None, usize::from(cli.height), unix_now())?;
        println!("{}", frame.text);
        return Ok(());
    }

    if !cli.no_welcome {
        let message = welcome_message(config.timeout_secs, cli.replay.as_deref(), color);
        show_welcome(&mut io::stdin().lock(), &mut io::stdout(), &message)?;
    }

    let feeder = match &cli.replay {
        Some(path) => Some(ReplayFeeder::spawn(
            path,
            Duration::from_millis(config.replay_interval_ms),
            Arc::clone(&shared),
        )?),
        None => None,
    };

    install_panic_hook();
    let dashboard = Dashboard::new(&config, flags, color);
    let result = Runner::new(CrosstermTerminal::new(), dashboard, shared.as_ref())
        .with_config(RunnerConfig::from_config(&config))
        .run();

    if let Some(feeder) = feeder {
        match feeder.stop() {
            Ok(stats) => tracing::info!(applied = stats.applied, skipped = stats.skipped, "replay stopped"),
            Err(err) => tracing::warn!("replay failed: {err}"),
        }
    }
    tracing::info!("Goodbye!");
    result
}

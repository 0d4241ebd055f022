//! Capture replay: feeds JSON-lines device records into the live set from a
//! background thread, one record per interval.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use hydrawatch_core::{DashError, DeviceRow, SharedState};

/// Outcome of a replay run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReplayStats {
    /// Records merged into the live set.
    pub applied: usize,
    /// Malformed lines that were logged and skipped.
    pub skipped: usize,
}

/// Decode one capture line. `line_no` is 1-based.
pub fn parse_record(line_no: usize, line: &str) -> Result<DeviceRow, DashError> {
    serde_json::from_str(line).map_err(|e| DashError::Replay {
        line: line_no,
        reason: e.to_string(),
    })
}

/// Feed every record from `reader` into `shared`, sleeping `interval` after
/// each one. Stops early once `stop` is set.
pub fn feed<R: BufRead>(
    reader: R,
    interval: Duration,
    shared: &SharedState,
    stop: &AtomicBool,
) -> Result<ReplayStats, DashError> {
    let mut stats = ReplayStats::default();
    for (idx, line) in reader.lines().enumerate() {
        if stop.load(Ordering::Relaxed) {
            break;
        }
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match parse_record(idx + 1, line) {
            Ok(row) => {
                shared.ingest(row);
                stats.applied += 1;
            }
            Err(err) => {
                tracing::warn!("skipping record: {err}");
                stats.skipped += 1;
                continue;
            }
        }
        if !interval.is_zero() {
            std::thread::sleep(interval);
        }
    }
    tracing::info!(applied = stats.applied, skipped = stats.skipped, "replay finished");
    Ok(stats)
}

/// Handle to a running replay thread.
pub struct ReplayFeeder {
    stop: Arc<AtomicBool>,
    handle: JoinHandle<Result<ReplayStats, DashError>>,
}

impl ReplayFeeder {
    /// Open `path` and start feeding it into `shared`.
    ///
    /// A missing or unreadable file fails here rather than in the thread.
    pub fn spawn(path: &Path, interval: Duration, shared: Arc<SharedState>) -> Result<Self, DashError> {
        let reader = BufReader::new(File::open(path)?);
        let stop = Arc::new(AtomicBool::new(false));
        let stop_thread = Arc::clone(&stop);
        tracing::info!(path = %path.display(), "replaying capture");
        let handle = std::thread::spawn(move || feed(reader, interval, &shared, &stop_thread));
        Ok(Self { stop, handle })
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Ask the thread to stop and wait for it.
    pub fn stop(self) -> Result<ReplayStats, DashError> {
        self.stop.store(true, Ordering::Relaxed);
        self.join()
    }

    /// Wait for the thread to reach the end of the capture.
    pub fn join(self) -> Result<ReplayStats, DashError> {
        self.handle.join().unwrap_or_else(|_| {
            Err(DashError::Replay {
                line: 0,
                reason: "replay thread panicked".to_string(),
            })
        })
    }
}

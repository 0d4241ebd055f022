//! Per-tick render pipeline.
//!
//! One call to [`Dashboard::tick`] applies pending input, expires stale rows,
//! classifies and sorts what is left, issues keep-alive probes and lays out a
//! frame. The caller owns the terminal; this module never touches it.

use std::panic::{catch_unwind, AssertUnwindSafe};

use crate::color::ColorMode;
use crate::config::{DisplayFlags, HydraConfig};
use crate::device::DeviceRow;
use crate::error::DashError;
use crate::layout::{render_frame, Frame, LayoutParams, StatusInfo};
use crate::policy::RowPolicy;
use crate::shared::DeviceSource;
use crate::sort::sort_rows;
use crate::state::DisplayState;

/// Render pipeline plus the interaction state it carries between ticks.
#[derive(Debug, Clone)]
pub struct Dashboard {
    state: DisplayState,
    policy: RowPolicy,
    flags: DisplayFlags,
    color: ColorMode,
}

impl Dashboard {
    pub fn new(config: &HydraConfig, flags: DisplayFlags, color: ColorMode) -> Self {
        Self {
            state: DisplayState::new(),
            policy: RowPolicy::new(config.policy()),
            flags,
            color,
        }
    }

    pub const fn state(&self) -> &DisplayState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut DisplayState {
        &mut self.state
    }

    pub const fn flags(&self) -> &DisplayFlags {
        &self.flags
    }

    pub const fn policy(&self) -> &RowPolicy {
        &self.policy
    }

    /// Run one pass of the pipeline and return the frame to flush.
    ///
    /// Expiry and keep-alive probing are skipped while replaying a capture,
    /// and replayed rows are aged against the newest capture timestamp.
    pub fn tick(
        &mut self,
        source: &dyn DeviceSource,
        input: Option<char>,
        height: usize,
        now: i64,
    ) -> Result<Frame, DashError> {
        if let Some(ch) = input {
            self.state.handle_char(ch);
        }

        let replay = self.flags.is_replay();
        let snapshot = if replay {
            source.live().snapshot()
        } else {
            self.policy.expire(source.live(), now);
            // The collaborator keeps writing after expiry ran
            let cutoff = self.policy.expiry_cutoff(now);
            let mut rows = source.live().snapshot();
            rows.retain(|row| row.last_seen >= cutoff);
            rows
        };
        let now = if replay { capture_clock(&snapshot, now) } else { now };

        let status = StatusInfo {
            queues: source.queue_depths(),
            scanner: source.scanner_status(),
            timeout_secs: self.policy.config().timeout_secs,
        };

        let mut rows = self.policy.annotate(snapshot, now);
        sort_rows(&mut rows, self.state.sort_key, self.state.sort_order, now);

        if !replay {
            for annotated in &rows {
                self.policy.keep_alive(&annotated.row, now, source);
            }
        }

        let columns = self.state.column_set.printable(self.flags.debug);
        let params = LayoutParams {
            columns: &columns,
            sort_key: self.state.sort_key,
            sort_order: self.state.sort_order,
            height,
            now,
            flags: &self.flags,
            color: self.color,
        };
        let frame = render_frame(&rows, &status, &params)?;
        self.state.reconcile(frame.columns.clone());
        Ok(frame)
    }

    /// [`Dashboard::tick`] behind the render-pass boundary.
    ///
    /// Errors and panics are logged and the frame is dropped; the next tick
    /// runs normally.
    pub fn tick_guarded(
        &mut self,
        source: &dyn DeviceSource,
        input: Option<char>,
        height: usize,
        now: i64,
    ) -> Option<Frame> {
        let result = catch_unwind(AssertUnwindSafe(|| self.tick(source, input, height, now)))
            .unwrap_or_else(|payload| Err(DashError::RenderPanic(panic_message(payload.as_ref()))));

        match result {
            Ok(frame) => Some(frame),
            Err(err) => {
                tracing::error!(error = %err, "render pass abandoned");
                None
            }
        }
    }
}

/// Replayed rows carry capture timestamps, so ages are measured from the
/// newest sighting in the capture instead of the wall clock.
fn capture_clock(rows: &[DeviceRow], wall: i64) -> i64 {
    rows.iter().map(|row| row.last_seen).max().unwrap_or(wall)
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

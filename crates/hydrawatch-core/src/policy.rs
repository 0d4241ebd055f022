//! Per-row policy: expiry, recency highlighting, keep-alive probing and
//! on-screen address redaction.

use crate::device::{DeviceMode, DeviceRow};
use crate::shared::{DeviceSource, LiveDevices, ProbeRequest};

/// Time windows driving the row policy, all in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolicyConfig {
    pub timeout_secs: i64,
    pub keepalive_lead_secs: i64,
    pub expiry_warning_secs: i64,
    pub new_device_secs: i64,
    pub recent_device_secs: i64,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 300,
            keepalive_lead_secs: 45,
            expiry_warning_secs: 20,
            new_device_secs: 10,
            recent_device_secs: 30,
        }
    }
}

/// Recency classification, evaluated fresh every tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recency {
    /// Created within the "new" window.
    New,
    /// Created within the "recent" window.
    Recent,
    /// Close to dropping out of the live set.
    Expiring,
    Normal,
}

/// A row with its per-tick classification.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotatedRow {
    pub row: DeviceRow,
    pub recency: Recency,
}

/// Applies [`PolicyConfig`] to rows of the live set.
#[derive(Debug, Clone, Copy, Default)]
pub struct RowPolicy {
    config: PolicyConfig,
}

impl RowPolicy {
    pub const fn new(config: PolicyConfig) -> Self {
        Self { config }
    }

    pub const fn config(&self) -> &PolicyConfig {
        &self.config
    }

    /// Rows last seen before this instant are expired.
    pub const fn expiry_cutoff(&self, now: i64) -> i64 {
        now - self.config.timeout_secs
    }

    /// Seconds of idleness before a keep-alive is due. Never negative, so a
    /// lead at or above the timeout cannot push the threshold past `now`.
    pub const fn keepalive_window(&self) -> i64 {
        let window = self.config.timeout_secs - self.config.keepalive_lead_secs;
        if window > 0 {
            window
        } else {
            0
        }
    }

    /// Rows (and probe history) older than this instant need a keep-alive.
    pub const fn keepalive_threshold(&self, now: i64) -> i64 {
        now - self.keepalive_window()
    }

    /// Delete expired rows from the live set. Safe to call repeatedly.
    pub fn expire(&self, live: &LiveDevices, now: i64) -> usize {
        let removed = live.remove_expired(self.expiry_cutoff(now));
        if removed > 0 {
            tracing::trace!(removed, "expired devices");
        }
        removed
    }

    pub const fn classify(&self, row: &DeviceRow, now: i64) -> Recency {
        if row.created > now - self.config.new_device_secs {
            Recency::New
        } else if row.created > now - self.config.recent_device_secs {
            Recency::Recent
        } else if row.last_seen < now - self.config.timeout_secs + self.config.expiry_warning_secs
        {
            Recency::Expiring
        } else {
            Recency::Normal
        }
    }

    /// Enqueue a probe for an idle classic device unless one was issued
    /// within the current keep-alive window. Returns whether a probe was sent.
    pub fn keep_alive(&self, row: &DeviceRow, now: i64, source: &dyn DeviceSource) -> bool {
        if row.mode() != DeviceMode::Classic {
            return false;
        }
        let threshold = self.keepalive_threshold(now);
        if row.last_seen >= threshold {
            return false;
        }
        if !source.query_history().try_claim(&row.address, threshold, now) {
            return false;
        }
        tracing::debug!(address = %row.address, "queueing keep-alive probe");
        source.push_probe(ProbeRequest::probe(row.address.clone()));
        true
    }

    /// Classify every row.
    pub fn annotate(&self, rows: Vec<DeviceRow>, now: i64) -> Vec<AnnotatedRow> {
        rows.into_iter()
            .map(|row| {
                let recency = self.classify(&row, now);
                AnnotatedRow { row, recency }
            })
            .collect()
    }
}

const MASK: &str = "**:**";
const MASK_SPAN: usize = 5;

fn is_address_char(b: u8) -> bool {
    matches!(b, b'A'..=b'F' | b'0'..=b'9' | b':')
}

/// Mask the leading and trailing five address characters for demo display.
///
/// Each end is masked only when it consists of upper-case hex digits and
/// colons; the two masks never overlap.
pub fn redact_address(address: &str) -> String {
    let bytes = address.as_bytes();
    if bytes.len() < MASK_SPAN {
        return address.to_string();
    }

    let head = bytes[..MASK_SPAN].iter().copied().all(is_address_char);
    let head_end = if head { MASK_SPAN } else { 0 };
    let tail_start = bytes.len() - MASK_SPAN;
    let tail = tail_start >= head_end && bytes[tail_start..].iter().copied().all(is_address_char);

    let mut out = String::with_capacity(address.len());
    if head {
        out.push_str(MASK);
    }
    let middle_end = if tail { tail_start } else { bytes.len() };
    out.push_str(&address[head_end..middle_end]);
    if tail {
        out.push_str(MASK);
    }
    out
}

//! State shared with the discovery collaborator.
//!
//! The discovery side writes rows and queue entries from its own threads while
//! the dashboard reads every tick, deletes expired rows and pushes probe
//! requests. Every structure here is safe for that mix of concurrent access.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError, RwLock};

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::device::DeviceRow;

/// Kind of follow-up probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeKind {
    /// Lightweight reachability probe that refreshes a classic device.
    Probe,
}

/// A request pushed onto the probe queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeRequest {
    pub command: ProbeKind,
    pub address: String,
}

impl ProbeRequest {
    pub fn probe(address: impl Into<String>) -> Self {
        Self {
            command: ProbeKind::Probe,
            address: address.into(),
        }
    }
}

/// Depths of the collaborator's work queues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QueueDepths {
    pub result: usize,
    pub info_scan: usize,
    pub probe: usize,
}

/// Last-activity timestamps reported by the scanners (unix seconds).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScannerStatus {
    /// Last completed discovery pass, if one has run.
    pub discovery: Option<i64>,
    /// Last report from the auxiliary peripheral scanner.
    pub peripheral: Option<i64>,
    /// Whether a peripheral scanner is attached at all.
    pub peripheral_enabled: bool,
}

/// The live row set keyed by address.
#[derive(Debug, Default)]
pub struct LiveDevices {
    rows: DashMap<String, DeviceRow>,
}

impl LiveDevices {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a row.
    pub fn upsert(&self, row: DeviceRow) {
        self.rows.insert(row.address.clone(), row);
    }

    pub fn get(&self, address: &str) -> Option<DeviceRow> {
        self.rows.get(address).map(|r| r.value().clone())
    }

    pub fn remove(&self, address: &str) -> Option<DeviceRow> {
        self.rows.remove(address).map(|(_, row)| row)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Owned copy of every row, in map iteration order.
    pub fn snapshot(&self) -> Vec<DeviceRow> {
        self.rows.iter().map(|r| r.value().clone()).collect()
    }

    /// Remove rows last seen before `cutoff`. Returns how many were removed.
    ///
    /// A row refreshed by the collaborator between the scan and the removal
    /// is kept.
    pub fn remove_expired(&self, cutoff: i64) -> usize {
        let stale: Vec<String> = self
            .rows
            .iter()
            .filter(|r| r.value().last_seen < cutoff)
            .map(|r| r.key().clone())
            .collect();

        stale
            .iter()
            .filter(|address| {
                self.rows
                    .remove_if(address.as_str(), |_, row| row.last_seen < cutoff)
                    .is_some()
            })
            .count()
    }
}

/// Per-address time of the last keep-alive probe. Entries are never removed.
#[derive(Debug, Default)]
pub struct QueryHistory {
    last_probe: DashMap<String, i64>,
}

impl QueryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_probe(&self, address: &str) -> Option<i64> {
        self.last_probe.get(address).map(|t| *t.value())
    }

    pub fn stamp(&self, address: &str, now: i64) {
        self.last_probe.insert(address.to_string(), now);
    }

    /// Stamp `now` if the address was never probed or last probed before
    /// `threshold`. Returns whether the caller may issue a probe.
    pub fn try_claim(&self, address: &str, threshold: i64, now: i64) -> bool {
        match self.last_probe.entry(address.to_string()) {
            Entry::Occupied(mut entry) => {
                if *entry.get() < threshold {
                    entry.insert(now);
                    true
                } else {
                    false
                }
            }
            Entry::Vacant(entry) => {
                entry.insert(now);
                true
            }
        }
    }

    pub fn len(&self) -> usize {
        self.last_probe.len()
    }

    pub fn is_empty(&self) -> bool {
        self.last_probe.is_empty()
    }
}

/// FIFO work queue shared between threads.
#[derive(Debug)]
pub struct WorkQueue<T> {
    items: Mutex<VecDeque<T>>,
}

impl<T> Default for WorkQueue<T> {
    fn default() -> Self {
        Self {
            items: Mutex::new(VecDeque::new()),
        }
    }
}

impl<T> WorkQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, item: T) {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(item);
    }

    pub fn pop(&self) -> Option<T> {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
    }

    pub fn len(&self) -> usize {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// What the dashboard needs from the discovery collaborator.
pub trait DeviceSource {
    /// The live row set. The dashboard may delete expired rows from it.
    fn live(&self) -> &LiveDevices;
    /// Keep-alive bookkeeping, written only by the dashboard.
    fn query_history(&self) -> &QueryHistory;
    fn queue_depths(&self) -> QueueDepths;
    fn scanner_status(&self) -> ScannerStatus;
    /// Enqueue a probe. Fire and forget.
    fn push_probe(&self, request: ProbeRequest);
}

/// In-process collaborator state, shared through an `Arc`.
#[derive(Debug, Default)]
pub struct SharedState {
    pub live: LiveDevices,
    pub query_history: QueryHistory,
    pub result_queue: WorkQueue<DeviceRow>,
    pub info_scan_queue: WorkQueue<String>,
    pub probe_queue: WorkQueue<ProbeRequest>,
    scanner: RwLock<ScannerStatus>,
}

impl SharedState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_scanner_status(&self, status: ScannerStatus) {
        *self.scanner.write().unwrap_or_else(PoisonError::into_inner) = status;
    }

    /// Merge a sighting into the live set, keeping the first-seen time of an
    /// existing row.
    pub fn ingest(&self, mut row: DeviceRow) {
        if let Some(existing) = self.live.get(&row.address) {
            row.created = row.created.min(existing.created);
        }
        self.live.upsert(row);
    }

    /// Apply every queued discovery result to the live set.
    pub fn drain_results(&self) -> usize {
        let mut applied = 0;
        while let Some(row) = self.result_queue.pop() {
            self.ingest(row);
            applied += 1;
        }
        applied
    }
}

impl DeviceSource for SharedState {
    fn live(&self) -> &LiveDevices {
        &self.live
    }

    fn query_history(&self) -> &QueryHistory {
        &self.query_history
    }

    fn queue_depths(&self) -> QueueDepths {
        QueueDepths {
            result: self.result_queue.len(),
            info_scan: self.info_scan_queue.len(),
            probe: self.probe_queue.len(),
        }
    }

    fn scanner_status(&self) -> ScannerStatus {
        *self.scanner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn push_probe(&self, request: ProbeRequest) {
        self.probe_queue.push(request);
    }
}

//! Core logic for the hydrawatch device dashboard.
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)] // "item in documentation missing backticks"
//!
//! Everything here is terminal-agnostic: a tick takes a [`DeviceSource`], an
//! optional input character and the terminal height, and produces a
//! [`Frame`] of text for the caller to flush.
//!
//! # Example
//!
//! ```
//! use hydrawatch_core::{ColorMode, Dashboard, DeviceRow, DisplayFlags, HydraConfig, SharedState};
//!
//! let shared = SharedState::new();
//! shared.ingest(DeviceRow::new("00:11:22:33:44:55", 1_000).with_rssi(-48));
//!
//! let mut dashboard = Dashboard::new(&HydraConfig::default(), DisplayFlags::default(), ColorMode::Mono);
//! let frame = dashboard.tick(&shared, Some('r'), 24, 1_002).unwrap();
//! assert!(frame.text.contains("RSSI v"));
//! assert_eq!(frame.rows_rendered, 1);
//! ```

pub mod color;
pub mod column;
pub mod config;
pub mod dashboard;
pub mod device;
mod error;
pub mod layout;
pub mod policy;
pub mod shared;
pub mod sort;
pub mod state;

pub use color::ColorMode;
pub use column::{Column, ColumnSet, Justify, SortKind};
pub use config::{DisplayFlags, HydraConfig};
pub use dashboard::Dashboard;
pub use device::{DeviceMode, DeviceRow};
pub use error::DashError;
pub use layout::{render_frame, Frame, LayoutParams, StatusInfo};
pub use policy::{redact_address, AnnotatedRow, PolicyConfig, Recency, RowPolicy};
pub use shared::{
    DeviceSource, LiveDevices, ProbeKind, ProbeRequest, QueryHistory, QueueDepths, ScannerStatus,
    SharedState, WorkQueue,
};
pub use sort::sort_rows;
pub use state::{Command, DisplayState, SortOrder};

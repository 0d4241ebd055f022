//! Interface-Defining Tests for the hydrawatch render pipeline
//!
//! **TESTS DEFINE INTERFACE. IMPLEMENTATION FOLLOWS.**
//!
//! These tests drive the public API the way the terminal crate does: a shared
//! live set, one `Dashboard`, and a sequence of ticks with optional input.

use hydrawatch_core::{
    redact_address, ColorMode, Column, ColumnSet, Command, Dashboard, DeviceRow, DeviceSource,
    DisplayFlags, DisplayState, HydraConfig, Recency, RowPolicy, ScannerStatus, SharedState,
    SortOrder,
};
use proptest::prelude::*;

const NOW: i64 = 1_700_000_000;

fn mono_dashboard() -> Dashboard {
    Dashboard::new(&HydraConfig::default(), DisplayFlags::default(), ColorMode::Mono)
}

/// Data lines of a frame (everything after the header).
fn data_lines(text: &str) -> Vec<String> {
    text.split("\r\n")
        .skip(4)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

// =============================================================================
// SECTION 1: Worked examples
// =============================================================================

mod worked_examples {
    use super::*;

    /// Recency classes for one row at three points in its life
    #[test]
    fn recency_classes() {
        let policy = RowPolicy::default();
        let row = DeviceRow::new("AA:BB:CC:DD:EE:FF", NOW - 5).with_rssi(-40);
        assert_eq!(policy.classify(&row, NOW), Recency::New);

        let row = DeviceRow::new("AA:BB:CC:DD:EE:FF", NOW - 25).with_rssi(-40);
        assert_eq!(policy.classify(&row, NOW), Recency::Recent);

        let row = DeviceRow::new("AA:BB:CC:DD:EE:FF", NOW - (300 - 10)).with_rssi(-40);
        assert_eq!(policy.classify(&row, NOW), Recency::Expiring);
    }

    /// Strongest signal first under the default state
    #[test]
    fn rssi_default_order() {
        let shared = SharedState::new();
        for (addr, rssi) in [("A", -70), ("B", -40), ("C", -90)] {
            shared.ingest(DeviceRow::new(addr, NOW - 50).with_rssi(rssi));
        }
        let frame = mono_dashboard().tick(&shared, None, 40, NOW).unwrap();
        let lines = data_lines(&frame.text);
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("-40"));
        assert!(lines[1].contains("-70"));
        assert!(lines[2].contains("-90"));
    }

    /// Height budget leaves room for two rows out of five
    #[test]
    fn height_truncation() {
        let shared = SharedState::new();
        for (i, rssi) in [-50, -30, -90, -10, -70].into_iter().enumerate() {
            shared.ingest(DeviceRow::new(format!("DEV{i}"), NOW - 50).with_rssi(rssi));
        }
        let frame = mono_dashboard().tick(&shared, None, 7, NOW).unwrap();
        assert_eq!(frame.rows_rendered, 2);
        let lines = data_lines(&frame.text);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("DEV3"));
        assert!(lines[1].contains("DEV1"));
        assert!(!frame.text.contains("more"));
    }

    #[test]
    fn redaction_example() {
        assert_eq!(redact_address("AA:BB:CC:DD:EE:FF"), "**:**:CC:DD:**:**");
    }
}

// =============================================================================
// SECTION 2: Interaction state
// =============================================================================

mod interaction {
    use super::*;

    /// Keys map to commands, everything else is ignored
    #[test]
    fn key_bindings() {
        assert_eq!(Command::from_char('s'), Some(Command::NextSortKey));
        assert_eq!(Command::from_char('q'), None);
    }

    /// Sort order survives ticks without input
    #[test]
    fn state_persists_between_ticks() {
        let shared = SharedState::new();
        shared.ingest(DeviceRow::new("A", NOW).with_rssi(-40));
        let mut dash = mono_dashboard();
        dash.tick(&shared, Some('R'), 40, NOW).unwrap();
        dash.tick(&shared, None, 40, NOW + 1).unwrap();
        assert_eq!(dash.state().sort_order, SortOrder::Descending);
    }

    /// Three `c` presses return to the base column set
    #[test]
    fn column_cycle_returns_to_base() {
        let shared = SharedState::new();
        shared.ingest(DeviceRow::new("A", NOW).with_rssi(-40).with_company("Acme"));
        let mut dash = mono_dashboard();
        for _ in 0..3 {
            dash.tick(&shared, Some('c'), 40, NOW).unwrap();
        }
        assert_eq!(dash.state().column_set, ColumnSet::Base);
    }

    /// Extended groups never appear together
    #[test]
    fn extended_groups_exclusive() {
        let shared = SharedState::new();
        shared.ingest(
            DeviceRow::new("A", NOW)
                .with_company("Acme")
                .with_proximity("uuid-1", "7", "9"),
        );
        let mut dash = mono_dashboard();
        let prox = dash.tick(&shared, Some('c'), 40, NOW).unwrap();
        assert!(prox.columns.contains(&Column::LeMajorNum));
        assert!(!prox.columns.contains(&Column::Company));
        let company = dash.tick(&shared, Some('c'), 40, NOW).unwrap();
        assert!(company.columns.contains(&Column::Company));
        assert!(!company.columns.contains(&Column::LeMajorNum));
    }
}

// =============================================================================
// SECTION 3: Shared-state contract
// =============================================================================

mod shared_state {
    use super::*;

    /// Expired rows leave the live set and never render
    #[test]
    fn expired_rows_removed() {
        let shared = SharedState::new();
        shared.ingest(DeviceRow::new("GONE", NOW - 301));
        let mut dash = mono_dashboard();
        let frame = dash.tick(&shared, None, 40, NOW).unwrap();
        assert!(!frame.text.contains("GONE"));
        assert!(shared.live().is_empty());
        // Second pass is a no-op
        dash.tick(&shared, None, 40, NOW).unwrap();
        assert!(shared.live().is_empty());
    }

    /// Probe requests are the only queue writes
    #[test]
    fn keep_alive_probe_shape() {
        let shared = SharedState::new();
        shared.ingest(DeviceRow::new("00:11:22:33:44:55", NOW - 280).with_version("CL/BR"));
        mono_dashboard().tick(&shared, None, 40, NOW).unwrap();
        let depths = shared.queue_depths();
        assert_eq!(depths.probe, 1);
        assert_eq!(depths.result, 0);
        let request = shared.probe_queue.pop().unwrap();
        assert_eq!(request.address, "00:11:22:33:44:55");
        assert_eq!(shared.query_history().last_probe(&request.address), Some(NOW));
    }

    #[test]
    fn scanner_status_rendered() {
        let shared = SharedState::new();
        shared.set_scanner_status(ScannerStatus {
            discovery: Some(NOW - 3),
            peripheral: Some(NOW - 9),
            peripheral_enabled: true,
        });
        let frame = mono_dashboard().tick(&shared, None, 40, NOW).unwrap();
        assert!(frame
            .text
            .contains("Discovery status timers: 3, peripheral status: 9"));
    }
}

// =============================================================================
// SECTION 4: Properties
// =============================================================================

proptest! {
    /// `s` pressed once per sortable key returns to the starting key
    #[test]
    fn prop_sort_key_cycle(start in 0usize..8, len in 1usize..=8) {
        let mut state = DisplayState::new();
        let keys: Vec<Column> = Column::BASE[..len].to_vec();
        state.reconcile(keys.clone());
        state.sort_key = keys[start % len];
        let original = state.sort_key;
        for _ in 0..keys.len() {
            state.apply(Command::NextSortKey);
        }
        prop_assert_eq!(state.sort_key, original);
        for _ in 0..keys.len() {
            state.apply(Command::PrevSortKey);
        }
        prop_assert_eq!(state.sort_key, original);
    }

    /// Displayed age is never negative, even for rows stamped in the future
    #[test]
    fn prop_seen_never_negative(offset in -1_000i64..1_000) {
        let row = DeviceRow::new("A", NOW + offset);
        let seen = Column::Seen.value(&row, NOW).unwrap();
        prop_assert!(!seen.contains('-'));
        prop_assert!(row.seconds_since_seen(NOW) >= 0);
    }

    /// Re-rendering an unchanged set gives identical output
    #[test]
    fn prop_rerender_is_stable(rssis in prop::collection::vec(-100i32..0, 1..20)) {
        let shared = SharedState::new();
        for (i, rssi) in rssis.iter().enumerate() {
            shared.ingest(DeviceRow::new(format!("D{i:02}"), NOW - 60).with_rssi(*rssi));
        }
        let mut dash = mono_dashboard();
        let first = dash.tick(&shared, None, 40, NOW).unwrap();
        let second = dash.tick(&shared, None, 40, NOW).unwrap();
        prop_assert_eq!(first.text, second.text);
    }
}

//! Layout engine: turns sorted rows into one full-screen text frame.
//!
//! The frame is built in a single buffer, prefixed with a cursor-home and
//! clear-screen sequence, so the terminal sees exactly one write per tick.

use std::fmt::Write as _;

use unicode_width::UnicodeWidthStr;

use crate::color::ColorMode;
use crate::column::{Column, Justify};
use crate::config::DisplayFlags;
use crate::error::DashError;
use crate::policy::{redact_address, AnnotatedRow};
use crate::shared::{QueueDepths, ScannerStatus};
use crate::state::SortOrder;

/// Cursor home followed by clear screen.
pub const CLEAR_SCREEN: &str = "\x1b[H\x1b[2J";

/// Raw mode does not translate `\n`, so lines end with an explicit return.
pub const LINE_END: &str = "\r\n";

pub const EMPTY_MESSAGE: &str = "No recent devices...";

const PRODUCT: &str = "HydraWatch";
const SEPARATOR: &str = " | ";

/// Collaborator status shown above the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusInfo {
    pub queues: QueueDepths,
    pub scanner: ScannerStatus,
    pub timeout_secs: i64,
}

/// Everything about the current tick that shapes the frame.
#[derive(Debug, Clone, Copy)]
pub struct LayoutParams<'a> {
    /// Candidate columns in display order.
    pub columns: &'a [Column],
    pub sort_key: Column,
    pub sort_order: SortOrder,
    /// Terminal height in lines.
    pub height: usize,
    pub now: i64,
    pub flags: &'a DisplayFlags,
    pub color: ColorMode,
}

/// A rendered frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Complete screen contents including the clear prefix.
    pub text: String,
    /// Columns that survived selection; empty when there were no rows.
    pub columns: Vec<Column>,
    /// Data rows emitted before the height budget ran out.
    pub rows_rendered: usize,
}

impl Frame {
    pub fn as_bytes(&self) -> &[u8] {
        self.text.as_bytes()
    }
}

fn pad(text: &str, width: usize, justify: Justify) -> String {
    let fill = " ".repeat(width.saturating_sub(text.width()));
    match justify {
        Justify::Left => format!("{text}{fill}"),
        Justify::Right => format!("{fill}{text}"),
    }
}

fn age_or(ts: Option<i64>, now: i64, missing: &str) -> String {
    ts.map_or_else(|| missing.to_string(), |t| (now - t).max(0).to_string())
}

/// Header text for `column`, with the sort marker when it is the active key.
pub fn header_label(column: Column, sort_key: Column, order: SortOrder) -> String {
    let header = column.header();
    if column == sort_key {
        format!("{header} {}", order.marker())
    } else {
        header
    }
}

/// Column widths over every row, in the order of `columns`. Columns with
/// no value in any row get width zero.
pub fn column_widths(
    columns: &[Column],
    rows: &[AnnotatedRow],
    sort_key: Column,
    order: SortOrder,
    now: i64,
) -> Vec<usize> {
    columns
        .iter()
        .map(|&column| {
            let longest = rows
                .iter()
                .filter_map(|r| column.value(&r.row, now))
                .map(|v| v.width())
                .max()
                .unwrap_or(0);
            if longest == 0 {
                0
            } else {
                longest.max(header_label(column, sort_key, order).width())
            }
        })
        .collect()
}

fn write_status(
    out: &mut String,
    status: &StatusInfo,
    params: &LayoutParams<'_>,
) -> Result<usize, DashError> {
    let replay = params.flags.is_replay();
    let mut lines = 0;

    out.push_str(&params.color.title(PRODUCT));
    if !replay {
        write!(out, " : Devices Seen in last {}s", status.timeout_secs)?;
    }
    out.push_str(LINE_END);
    lines += 1;

    let q = status.queues;
    write!(
        out,
        "Queue status: result: {}, info_scan: {}, probe: {}{LINE_END}",
        q.result, q.info_scan, q.probe
    )?;
    lines += 1;

    if !replay {
        let discovery = age_or(status.scanner.discovery, params.now, "not started");
        let peripheral = if status.scanner.peripheral_enabled {
            age_or(status.scanner.peripheral, params.now, "not started")
        } else {
            "not enabled".to_string()
        };
        write!(
            out,
            "Discovery status timers: {discovery}, peripheral status: {peripheral}{LINE_END}"
        )?;
        lines += 1;
    }
    Ok(lines)
}

/// Render one frame from rows already sorted for display.
///
/// Rows that do not fit in `params.height` are dropped silently.
pub fn render_frame(
    rows: &[AnnotatedRow],
    status: &StatusInfo,
    params: &LayoutParams<'_>,
) -> Result<Frame, DashError> {
    let mut out = String::from(CLEAR_SCREEN);
    let mut lines = 1 + write_status(&mut out, status, params)?;

    if rows.is_empty() {
        out.push_str(EMPTY_MESSAGE);
        return Ok(Frame {
            text: out,
            columns: Vec::new(),
            rows_rendered: 0,
        });
    }

    let widths = column_widths(
        params.columns,
        rows,
        params.sort_key,
        params.sort_order,
        params.now,
    );
    let selected: Vec<(Column, usize)> = params
        .columns
        .iter()
        .copied()
        .zip(widths)
        .filter(|&(_, width)| width > 0)
        .collect();

    let header = selected
        .iter()
        .map(|&(column, width)| {
            let label = header_label(column, params.sort_key, params.sort_order);
            pad(&label, width, Justify::Left)
        })
        .collect::<Vec<_>>()
        .join(SEPARATOR);
    out.push_str(&params.color.header(&header));
    out.push_str(LINE_END);
    lines += 1;

    let mut rows_rendered = 0;
    for annotated in rows {
        if lines >= params.height {
            break;
        }
        let cells = selected
            .iter()
            .map(|&(column, width)| match column.value(&annotated.row, params.now) {
                Some(value) if column == Column::Address && params.flags.demo => {
                    pad(&redact_address(&value), width, column.justify())
                }
                Some(value) => pad(&value, width, column.justify()),
                None => " ".repeat(width),
            })
            .collect::<Vec<_>>()
            .join(SEPARATOR);
        out.push_str(&params.color.row(&cells, annotated.recency));
        out.push_str(LINE_END);
        lines += 1;
        rows_rendered += 1;
    }

    Ok(Frame {
        text: out,
        columns: selected.into_iter().map(|(column, _)| column).collect(),
        rows_rendered,
    })
}

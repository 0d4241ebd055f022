//! Sort engine for annotated device rows.

use std::cmp::Ordering;

use crate::column::{Column, SortKind};
use crate::device::DeviceRow;
use crate::policy::AnnotatedRow;
use crate::state::SortOrder;

/// Integer sort value; missing values count as 0.
fn integer_key(column: Column, row: &DeviceRow, now: i64) -> i64 {
    match column {
        Column::Seen => row.seconds_since_seen(now),
        Column::Rssi => row.rssi.map_or(0, i64::from),
        _ => 0,
    }
}

/// Missing or NaN ranges sort after every real distance.
fn compare_range(a: Option<f64>, b: Option<f64>) -> Ordering {
    let a = a.filter(|v| !v.is_nan());
    let b = b.filter(|v| !v.is_nan());
    match (a, b) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Natural ordering of two rows on `column`, before any direction is applied.
pub fn compare_rows(column: Column, a: &DeviceRow, b: &DeviceRow, now: i64) -> Ordering {
    match column.sort_kind() {
        SortKind::Integer => integer_key(column, a, now).cmp(&integer_key(column, b, now)),
        SortKind::Float => compare_range(a.range, b.range),
        SortKind::Lexical => {
            let va = column.value(a, now).unwrap_or_default();
            let vb = column.value(b, now).unwrap_or_default();
            va.cmp(&vb)
        }
    }
}

/// Signal strength is attenuation, so its natural order is inverted.
const fn inverted_by_default(column: Column) -> bool {
    matches!(column, Column::Rssi)
}

/// Sort rows in place for display.
///
/// Rows are first put in address order so that the result does not depend on
/// live-set iteration order, then stably sorted on `key`. Direction is applied
/// in the comparator, so equal rows keep the address order either way.
pub fn sort_rows(rows: &mut [AnnotatedRow], key: Column, order: SortOrder, now: i64) {
    rows.sort_by(|a, b| a.row.address.cmp(&b.row.address));
    rows.sort_by(|a, b| {
        let mut cmp = compare_rows(key, &a.row, &b.row, now);
        if inverted_by_default(key) {
            cmp = cmp.reverse();
        }
        match order {
            SortOrder::Ascending => cmp,
            SortOrder::Descending => cmp.reverse(),
        }
    });
}

//! Display columns and column-set variants.
//!
//! Columns are a closed enumeration; the optional attribute groups are
//! selected by a [`ColumnSet`] instead of by free-form field names.

use crate::device::DeviceRow;

/// A display column of the device table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Uuid,
    Seen,
    Version,
    Address,
    Rssi,
    Name,
    Manufacturer,
    Type,
    Range,
    LeProximityUuid,
    LeMajorNum,
    LeMinorNum,
    Company,
    LeCompanyData,
}

/// Cell justification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Justify {
    Left,
    Right,
}

/// How a column's values compare when it is the sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKind {
    /// Whole numbers; missing values count as 0.
    Integer,
    /// Floating point; missing values sort last in ascending order.
    Float,
    /// Plain string comparison of the rendered value.
    Lexical,
}

impl Column {
    /// Columns always offered, in display order.
    pub const BASE: [Self; 8] = [
        Self::Seen,
        Self::Version,
        Self::Address,
        Self::Rssi,
        Self::Name,
        Self::Manufacturer,
        Self::Type,
        Self::Range,
    ];

    /// Sort key used at startup and whenever the active key disappears.
    pub const DEFAULT_SORT: Self = Self::Rssi;

    /// Sortable keys before the first frame has reported its columns.
    pub const INITIAL_SORTABLE: [Self; 4] = [Self::Seen, Self::Version, Self::Address, Self::Rssi];

    /// Snake-case attribute name.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Uuid => "uuid",
            Self::Seen => "seen",
            Self::Version => "vers",
            Self::Address => "address",
            Self::Rssi => "rssi",
            Self::Name => "name",
            Self::Manufacturer => "manuf",
            Self::Type => "type",
            Self::Range => "range",
            Self::LeProximityUuid => "le_proximity_uuid",
            Self::LeMajorNum => "le_major_num",
            Self::LeMinorNum => "le_minor_num",
            Self::Company => "company",
            Self::LeCompanyData => "le_company_data",
        }
    }

    /// Header text without a sort marker.
    pub fn header(self) -> String {
        match self {
            Self::LeMajorNum => "MAJOR".to_string(),
            Self::LeMinorNum => "MINOR".to_string(),
            other => other.key().to_uppercase().replace('_', " "),
        }
    }

    pub const fn justify(self) -> Justify {
        match self {
            Self::Seen | Self::Rssi | Self::Range => Justify::Right,
            _ => Justify::Left,
        }
    }

    pub const fn sort_kind(self) -> SortKind {
        match self {
            Self::Seen | Self::Rssi => SortKind::Integer,
            Self::Range => SortKind::Float,
            _ => SortKind::Lexical,
        }
    }

    /// Rendered cell text, or `None` when the row has no value.
    pub fn value(self, row: &DeviceRow, now: i64) -> Option<String> {
        match self {
            Self::Uuid => row.uuid.clone(),
            Self::Seen => Some(format!("+{}s", row.seconds_since_seen(now))),
            Self::Version => (!row.version.is_empty()).then(|| row.version.clone()),
            Self::Address => Some(row.address.clone()),
            Self::Rssi => row.rssi.map(|r| r.to_string()),
            Self::Name => row.name.clone(),
            Self::Manufacturer => row.manufacturer.clone(),
            Self::Type => row.device_type.clone(),
            Self::Range => row.range.map(|m| format!("{m:.2}")),
            Self::LeProximityUuid => row.le_proximity_uuid.clone(),
            Self::LeMajorNum => row.le_major_num.clone(),
            Self::LeMinorNum => row.le_minor_num.clone(),
            Self::Company => row.company.clone(),
            Self::LeCompanyData => row.le_company_data.clone(),
        }
    }
}

/// Mutually exclusive group of extra columns layered on [`Column::BASE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColumnSet {
    #[default]
    Base,
    /// iBeacon style proximity uuid with major and minor numbers.
    Proximity,
    /// Company identifier and manufacturer data.
    Company,
}

impl ColumnSet {
    /// Get next variant in cycle
    pub const fn next(self) -> Self {
        match self {
            Self::Base => Self::Proximity,
            Self::Proximity => Self::Company,
            Self::Company => Self::Base,
        }
    }

    pub const fn extra_columns(self) -> &'static [Column] {
        match self {
            Self::Base => &[],
            Self::Proximity => &[Column::LeProximityUuid, Column::LeMajorNum, Column::LeMinorNum],
            Self::Company => &[Column::Company, Column::LeCompanyData],
        }
    }

    /// Columns eligible for display under this variant.
    pub fn printable(self, debug: bool) -> Vec<Column> {
        let mut columns = Vec::with_capacity(12);
        if debug {
            columns.push(Column::Uuid);
        }
        columns.extend_from_slice(&Column::BASE);
        columns.extend_from_slice(self.extra_columns());
        columns
    }
}

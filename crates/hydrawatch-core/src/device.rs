//! Device display records.
//!
//! A [`DeviceRow`] is one device's current record as published by the
//! discovery side. Rows are owned and updated by the collaborator; the
//! dashboard only reads them and deletes expired ones.

use serde::Deserialize;

/// Radio mode derived from the free-text version column.
///
/// The scanner reports strings such as `CL/BR`, `CL4.0`, `BTLE` or `LE4.1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DeviceMode {
    /// Classic (BR/EDR) device. Only these are kept alive by probing.
    Classic,
    /// Bluetooth Low Energy device.
    LowEnergy,
    /// Version string absent or unrecognised.
    #[default]
    Unknown,
}

impl DeviceMode {
    /// Classify a version string. `cl` anywhere (any case) wins over `le`.
    pub fn from_version(version: &str) -> Self {
        let lower = version.to_ascii_lowercase();
        if lower.contains("cl") {
            Self::Classic
        } else if lower.contains("le") {
            Self::LowEnergy
        } else {
            Self::Unknown
        }
    }
}

/// One device's display record.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DeviceRow {
    /// Hardware address, unique within the live set.
    pub address: String,
    /// Unix seconds of the most recent sighting.
    pub last_seen: i64,
    /// Unix seconds of the first sighting.
    pub created: i64,
    /// Signal strength in dBm (negative, closer to zero is stronger).
    #[serde(default)]
    pub rssi: Option<i32>,
    /// Estimated distance in meters.
    #[serde(default)]
    pub range: Option<f64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub manufacturer: Option<String>,
    #[serde(default, rename = "type")]
    pub device_type: Option<String>,
    /// Mode and version text, e.g. `CL4.0`.
    #[serde(default)]
    pub version: String,
    /// Database record id, displayed in debug mode.
    #[serde(default)]
    pub uuid: Option<String>,
    #[serde(default)]
    pub le_proximity_uuid: Option<String>,
    #[serde(default)]
    pub le_major_num: Option<String>,
    #[serde(default)]
    pub le_minor_num: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub le_company_data: Option<String>,
}

impl DeviceRow {
    /// Create a row first and last seen at `now`.
    #[must_use]
    pub fn new(address: impl Into<String>, now: i64) -> Self {
        Self {
            address: address.into(),
            last_seen: now,
            created: now,
            rssi: None,
            range: None,
            name: None,
            manufacturer: None,
            device_type: None,
            version: String::new(),
            uuid: None,
            le_proximity_uuid: None,
            le_major_num: None,
            le_minor_num: None,
            company: None,
            le_company_data: None,
        }
    }

    #[must_use]
    pub fn with_rssi(mut self, rssi: i32) -> Self {
        self.rssi = Some(rssi);
        self
    }

    #[must_use]
    pub fn with_range(mut self, meters: f64) -> Self {
        self.range = Some(meters);
        self
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    #[must_use]
    pub fn with_last_seen(mut self, last_seen: i64) -> Self {
        self.last_seen = last_seen;
        self
    }

    #[must_use]
    pub fn with_created(mut self, created: i64) -> Self {
        self.created = created;
        self
    }

    #[must_use]
    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }

    #[must_use]
    pub fn with_proximity(
        mut self,
        uuid: impl Into<String>,
        major: impl Into<String>,
        minor: impl Into<String>,
    ) -> Self {
        self.le_proximity_uuid = Some(uuid.into());
        self.le_major_num = Some(major.into());
        self.le_minor_num = Some(minor.into());
        self
    }

    /// Radio mode parsed from [`DeviceRow::version`].
    pub fn mode(&self) -> DeviceMode {
        DeviceMode::from_version(&self.version)
    }

    /// Seconds since the last sighting, clamped at zero for clock skew.
    pub fn seconds_since_seen(&self, now: i64) -> i64 {
        (now - self.last_seen).max(0)
    }
}

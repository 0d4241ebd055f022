//! YAML configuration for hydrawatch.
//!
//! Searched in XDG order: `$XDG_CONFIG_HOME/hydrawatch/config.yaml`, then
//! `~/.config/hydrawatch/config.yaml`. Every field is optional; missing fields
//! keep their defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::DashError;
use crate::policy::PolicyConfig;

/// File-backed settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HydraConfig {
    /// Delay between render ticks in milliseconds.
    pub refresh_ms: u64,
    /// Seconds after the last sighting before a device leaves the table.
    pub timeout_secs: i64,
    /// How long before expiry a classic device is probed.
    pub keepalive_lead_secs: i64,
    /// Width of the red "about to expire" window.
    pub expiry_warning_secs: i64,
    /// Devices created within this many seconds are highlighted as new.
    pub new_device_secs: i64,
    /// Devices created within this many seconds are highlighted as recent.
    pub recent_device_secs: i64,
    /// Delay between records when replaying a capture.
    pub replay_interval_ms: u64,
    /// Mask hardware addresses on screen.
    pub demo_mode: bool,
    /// Show record ids and log at debug level.
    pub debug: bool,
}

impl Default for HydraConfig {
    fn default() -> Self {
        Self {
            refresh_ms: 100,
            timeout_secs: 300,
            keepalive_lead_secs: 45,
            expiry_warning_secs: 20,
            new_device_secs: 10,
            recent_device_secs: 30,
            replay_interval_ms: 250,
            demo_mode: false,
            debug: false,
        }
    }
}

impl HydraConfig {
    /// XDG-compliant config paths, most specific first.
    pub fn config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            paths.push(PathBuf::from(xdg_config).join("hydrawatch/config.yaml"));
        }

        if let Ok(home) = std::env::var("HOME") {
            paths.push(PathBuf::from(home).join(".config/hydrawatch/config.yaml"));
        }

        paths
    }

    /// Load the first config file found, falling back to defaults.
    ///
    /// An unreadable or invalid file is reported and skipped.
    pub fn load() -> Self {
        for path in Self::config_paths() {
            if !path.exists() {
                continue;
            }
            match Self::load_from_file(&path) {
                Ok(config) => return config,
                Err(err) => {
                    tracing::warn!(path = %path.display(), "ignoring config: {err}");
                }
            }
        }
        Self::default()
    }

    /// Load a specific file.
    pub fn load_from_file(path: &Path) -> Result<Self, DashError> {
        let contents = fs::read_to_string(path)?;
        Self::parse_yaml(&contents)
    }

    /// Parse YAML text. A document with nothing but comments yields the defaults.
    pub fn parse_yaml(contents: &str) -> Result<Self, DashError> {
        let blank = contents
            .lines()
            .map(str::trim)
            .all(|line| line.is_empty() || line.starts_with('#'));
        if blank {
            return Ok(Self::default());
        }
        Ok(serde_yaml_ng::from_str(contents)?)
    }

    /// Expiry and highlight windows for the row policy.
    pub fn policy(&self) -> PolicyConfig {
        PolicyConfig {
            timeout_secs: self.timeout_secs,
            keepalive_lead_secs: self.keepalive_lead_secs,
            expiry_warning_secs: self.expiry_warning_secs,
            new_device_secs: self.new_device_secs,
            recent_device_secs: self.recent_device_secs,
        }
    }

    /// Documented default configuration.
    pub fn default_yaml() -> String {
        r"# hydrawatch configuration file
# Location: ~/.config/hydrawatch/config.yaml

# Delay between screen refreshes in milliseconds
refresh_ms: 100

# Devices disappear from the table this many seconds after the last sighting
timeout_secs: 300

# Classic devices are probed this many seconds before they would expire
keepalive_lead_secs: 45

# Rows turn red this many seconds before they expire
expiry_warning_secs: 20

# Rows created within these windows are highlighted green / yellow
new_device_secs: 10
recent_device_secs: 30

# Delay between records when replaying a capture file
replay_interval_ms: 250

# Mask hardware addresses on screen
demo_mode: false

# Show record ids and write debug logs
debug: false
"
        .to_string()
    }
}

/// Process-wide display switches, threaded into the pipeline by value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DisplayFlags {
    /// Capture being replayed instead of live scanning.
    pub file_replay: Option<PathBuf>,
    /// Adds the record id column.
    pub debug: bool,
    /// Masks addresses on screen.
    pub demo: bool,
}

impl DisplayFlags {
    pub const fn is_replay(&self) -> bool {
        self.file_replay.is_some()
    }
}

//! Configuration loading for the fishbowl page.
//!
//! Reads `<config dir>/fishbowl/config.toml` when present. Every field
//! has a default; a missing or unparsable file falls back to the
//! defaults silently.

use std::fs;
use std::path::PathBuf;

use directories::ProjectDirs;
use serde::Deserialize;

/// Weather location plus the label rendered after the clock.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    /// Timezone label, e.g. "IST".
    pub zone_label: String,
}

impl Default for Location {
    fn default() -> Self {
        // The page's home reef: the Chennai coast.
        Self {
            latitude: 12.8378,
            longitude: 80.2273,
            zone_label: "IST".to_string(),
        }
    }
}

/// Date window for the progress line, as ISO dates.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProgressWindow {
    pub start: String,
    pub end: String,
}

impl Default for ProgressWindow {
    fn default() -> Self {
        Self {
            start: "2026-01-30".to_string(),
            end: "2026-04-30".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub location: Location,
    pub progress: ProgressWindow,
    /// Ticker messages; empty means the built-in set.
    pub messages: Vec<String>,
}

impl Config {
    /// Load from the platform config directory, falling back to defaults
    /// on any missing or unparsable file.
    pub fn load() -> Self {
        Self::config_path()
            .and_then(|path| fs::read_to_string(path).ok())
            .and_then(|raw| toml::from_str(&raw).ok())
            .unwrap_or_default()
    }

    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "fishbowl").map(|dirs| dirs.config_dir().join("config.toml"))
    }
}

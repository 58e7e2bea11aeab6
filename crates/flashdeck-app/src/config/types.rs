//! Configuration types for flashdeck
//!
//! Defines:
//! - `Settings` - Global application settings
//! - Related sub-types

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application settings (config.toml)
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub drives: DriveSettings,

    #[serde(default)]
    pub analytics: AnalyticsSettings,

    #[serde(default)]
    pub ui: UiSettings,
}

/// Drive selection settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DriveSettings {
    /// Hide the "select target" button; drives can only be auto-selected
    #[serde(default)]
    pub disable_explicit_drive_selection: bool,

    /// Allow choosing the drive the OS runs from
    #[serde(default)]
    pub allow_system_drives: bool,

    /// Select the only available drive automatically when it is eligible
    #[serde(default = "default_true")]
    pub auto_select_single_drive: bool,

    /// How often the drive list is re-read
    #[serde(default = "default_scan_interval_ms")]
    pub scan_interval_ms: u64,
}

impl Default for DriveSettings {
    fn default() -> Self {
        Self {
            disable_explicit_drive_selection: false,
            allow_system_drives: false,
            auto_select_single_drive: true,
            scan_interval_ms: default_scan_interval_ms(),
        }
    }
}

/// Analytics settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AnalyticsSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Append events as JSON lines to this file instead of the log
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for AnalyticsSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            file: None,
        }
    }
}

/// UI settings
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct UiSettings {
    /// Use plain ASCII glyphs instead of unicode box drawing and icons
    #[serde(default)]
    pub ascii: bool,

    /// A featured-project panel covers the step area; the step connecting
    /// lines are hidden while flashing
    #[serde(default)]
    pub webview_showing: bool,
}

fn default_true() -> bool {
    true
}

fn default_scan_interval_ms() -> u64 {
    2000
}

/// Minimum drive list polling interval
pub const MIN_SCAN_INTERVAL_MS: u64 = 250;

impl DriveSettings {
    /// Scan interval clamped to [`MIN_SCAN_INTERVAL_MS`]
    pub fn scan_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.scan_interval_ms.max(MIN_SCAN_INTERVAL_MS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_default() {
        let settings = Settings::default();
        assert!(!settings.drives.disable_explicit_drive_selection);
        assert!(!settings.drives.allow_system_drives);
        assert!(settings.drives.auto_select_single_drive);
        assert_eq!(settings.drives.scan_interval_ms, 2000);
        assert!(settings.analytics.enabled);
        assert!(settings.analytics.file.is_none());
    }

    #[test]
    fn test_settings_deserialize_partial() {
        let toml = r#"
[drives]
disable_explicit_drive_selection = true
"#;
        let settings: Settings = toml::from_str(toml).unwrap();
        assert!(settings.drives.disable_explicit_drive_selection);
        assert!(settings.drives.auto_select_single_drive);
        assert!(settings.analytics.enabled);
    }

    #[test]
    fn test_settings_deserialize_empty() {
        let settings: Settings = toml::from_str("").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_scan_interval_is_clamped() {
        let drives = DriveSettings {
            scan_interval_ms: 10,
            ..Default::default()
        };
        assert_eq!(
            drives.scan_interval(),
            std::time::Duration::from_millis(MIN_SCAN_INTERVAL_MS)
        );
    }
}

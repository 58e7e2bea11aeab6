//! Settings loading and persistence

use std::path::{Path, PathBuf};

use flashdeck_core::prelude::*;

use super::types::Settings;

pub const CONFIG_FILENAME: &str = "config.toml";
const TEMP_FILENAME: &str = ".config.toml.tmp";

/// `<platform config dir>/flashdeck`, or `./.flashdeck` when the platform
/// has no config directory
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join("flashdeck"))
        .unwrap_or_else(|| PathBuf::from(".flashdeck"))
}

// ─────────────────────────────────────────────────────────────────────────────
// Settings Loading
// ─────────────────────────────────────────────────────────────────────────────

/// Load settings from `<config_dir>/config.toml`
///
/// Returns default settings if file doesn't exist or can't be parsed.
pub fn load_settings(config_dir: &Path) -> Settings {
    let config_path = config_dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        debug!("No config file at {:?}, using defaults", config_path);
        return Settings::default();
    }

    match std::fs::read_to_string(&config_path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                debug!("Loaded settings from {:?}", config_path);
                settings
            }
            Err(e) => {
                warn!("Failed to parse {:?}: {}", config_path, e);
                Settings::default()
            }
        },
        Err(e) => {
            warn!("Failed to read {:?}: {}", config_path, e);
            Settings::default()
        }
    }
}

/// Create the config directory and a commented default `config.toml`
///
/// Idempotent: an existing file is left untouched.
pub fn init_config_dir(config_dir: &Path) -> Result<()> {
    if !config_dir.exists() {
        std::fs::create_dir_all(config_dir)
            .map_err(|e| Error::config(format!("Failed to create config dir: {}", e)))?;
        info!("Created config directory {:?}", config_dir);
    }

    let config_path = config_dir.join(CONFIG_FILENAME);
    if !config_path.exists() {
        std::fs::write(&config_path, generate_default_config())
            .map_err(|e| Error::config(format!("Failed to write config.toml: {}", e)))?;
        info!("Created default config.toml");
    }

    Ok(())
}

/// Save settings to `<config_dir>/config.toml`
///
/// Uses atomic write (temp file + rename) for safety.
pub fn save_settings(config_dir: &Path, settings: &Settings) -> Result<()> {
    if !config_dir.exists() {
        std::fs::create_dir_all(config_dir)
            .map_err(|e| Error::config(format!("Failed to create config dir: {}", e)))?;
    }

    let config_path = config_dir.join(CONFIG_FILENAME);
    let temp_path = config_dir.join(TEMP_FILENAME);

    let content = toml::to_string_pretty(settings)
        .map_err(|e| Error::config(format!("Failed to serialize settings: {}", e)))?;
    let full_content = format!("{}{}", generate_config_header(), content);

    std::fs::write(&temp_path, &full_content)
        .map_err(|e| Error::config(format!("Failed to write temp file: {}", e)))?;

    std::fs::rename(&temp_path, &config_path)
        .map_err(|e| Error::config(format!("Failed to rename temp file: {}", e)))?;

    info!("Saved settings to {:?}", config_path);
    Ok(())
}

fn generate_config_header() -> String {
    r#"# flashdeck configuration
# Generated by flashdeck

"#
    .to_string()
}

fn generate_default_config() -> String {
    r#"# flashdeck configuration

[drives]
disable_explicit_drive_selection = false  # Hide the "select target" button
allow_system_drives = false               # Never offer the OS drive as a target
auto_select_single_drive = true           # Pick the only eligible drive automatically
scan_interval_ms = 2000                   # How often the drive list is re-read

[analytics]
enabled = true
# file = "/tmp/flashdeck-events.jsonl"    # Append events as JSON lines

[ui]
ascii = false                             # Plain ASCII glyphs
webview_showing = false                   # Featured-project panel is shown
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_settings_defaults() {
        let temp = tempdir().unwrap();
        let settings = load_settings(temp.path());

        assert!(!settings.drives.disable_explicit_drive_selection);
        assert!(settings.drives.auto_select_single_drive);
        assert!(settings.analytics.enabled);
    }

    #[test]
    fn test_load_settings_custom() {
        let temp = tempdir().unwrap();
        let config = r#"
[drives]
disable_explicit_drive_selection = true
scan_interval_ms = 500

[analytics]
enabled = false
"#;
        std::fs::write(temp.path().join(CONFIG_FILENAME), config).unwrap();

        let settings = load_settings(temp.path());

        assert!(settings.drives.disable_explicit_drive_selection);
        assert_eq!(settings.drives.scan_interval_ms, 500);
        assert!(!settings.analytics.enabled);
    }

    #[test]
    fn test_load_settings_invalid_toml() {
        let temp = tempdir().unwrap();
        std::fs::write(temp.path().join(CONFIG_FILENAME), "not valid toml {{{{").unwrap();

        // Should return defaults
        let settings = load_settings(temp.path());
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_init_config_dir() {
        let temp = tempdir().unwrap();
        let dir = temp.path().join("flashdeck");

        init_config_dir(&dir).unwrap();

        assert!(dir.join(CONFIG_FILENAME).exists());
        // The generated file parses back to the defaults
        assert_eq!(load_settings(&dir), Settings::default());
    }

    #[test]
    fn test_init_config_dir_idempotent() {
        let temp = tempdir().unwrap();
        std::fs::write(
            temp.path().join(CONFIG_FILENAME),
            "[drives]\nallow_system_drives = true\n",
        )
        .unwrap();

        init_config_dir(temp.path()).unwrap();

        assert!(load_settings(temp.path()).drives.allow_system_drives);
    }

    #[test]
    fn test_save_settings_roundtrip() {
        let temp = tempdir().unwrap();

        let mut settings = Settings::default();
        settings.drives.disable_explicit_drive_selection = true;
        settings.analytics.file = Some(PathBuf::from("/tmp/events.jsonl"));

        save_settings(temp.path(), &settings).unwrap();
        let loaded = load_settings(temp.path());

        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_save_settings_atomic_write() {
        let temp = tempdir().unwrap();

        save_settings(temp.path(), &Settings::default()).unwrap();

        assert!(!temp.path().join(TEMP_FILENAME).exists());
        let content = std::fs::read_to_string(temp.path().join(CONFIG_FILENAME)).unwrap();
        assert!(content.starts_with('#'));
    }
}

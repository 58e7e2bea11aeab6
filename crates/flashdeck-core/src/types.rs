//! Domain types shared by every flashdeck crate

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// A mounted filesystem on a drive
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mountpoint {
    pub path: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Mountpoint {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            label: None,
        }
    }
}

/// A storage device that can be chosen as a flash target.
///
/// The JSON shape uses camelCase keys (`displayName`, `isSystem`, ...) so
/// drive lists produced by other scanners can be fed in unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Drive {
    /// Stable device identifier (e.g. `/dev/sdb`, `\\.\PHYSICALDRIVE1`)
    pub device: String,

    /// Human readable label (usually vendor + model)
    pub description: String,

    /// Device path or OS name shown next to the description
    pub display_name: String,

    /// Capacity in bytes, if known
    #[serde(default)]
    pub size: Option<u64>,

    #[serde(default)]
    pub mountpoints: Vec<Mountpoint>,

    #[serde(default)]
    pub is_system: bool,

    #[serde(default)]
    pub is_read_only: bool,

    #[serde(default = "default_true")]
    pub is_removable: bool,

    #[serde(default)]
    pub is_virtual: bool,
}

fn default_true() -> bool {
    true
}

impl Drive {
    /// Create a removable, writable drive with no mountpoints
    pub fn new(
        device: impl Into<String>,
        description: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            device: device.into(),
            description: description.into(),
            display_name: display_name.into(),
            size: None,
            mountpoints: Vec::new(),
            is_system: false,
            is_read_only: false,
            is_removable: true,
            is_virtual: false,
        }
    }

    pub fn with_size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_mountpoint(mut self, path: impl Into<PathBuf>) -> Self {
        self.mountpoints.push(Mountpoint::new(path));
        self
    }

    pub fn system(mut self) -> Self {
        self.is_system = true;
        self.is_removable = false;
        self
    }

    pub fn read_only(mut self) -> Self {
        self.is_read_only = true;
        self
    }

    /// Label used in tooltips and lists: `"{description} ({display_name})"`
    pub fn label(&self) -> String {
        format!("{} ({})", self.description, self.display_name)
    }

    /// Whether `path` lives on one of this drive's mounted filesystems
    pub fn contains_path(&self, path: &Path) -> bool {
        self.mountpoints.iter().any(|m| path.starts_with(&m.path))
    }
}

/// The image the user picked for flashing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceImage {
    pub path: PathBuf,

    /// Image size in bytes (after decompression, when known)
    pub size: u64,

    /// Minimum drive size the image author recommends
    #[serde(default)]
    pub recommended_drive_size: Option<u64>,
}

impl SourceImage {
    pub fn new(path: impl Into<PathBuf>, size: u64) -> Self {
        Self {
            path: path.into(),
            size,
            recommended_drive_size: None,
        }
    }

    /// Build from a file on disk, taking the size from its metadata
    pub fn from_file(path: &Path) -> crate::Result<Self> {
        let metadata = std::fs::metadata(path).map_err(|_| crate::Error::ImageNotFound {
            path: path.to_path_buf(),
        })?;
        Ok(Self::new(path, metadata.len()))
    }

    /// File name for display, falling back to the full path
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Format a byte count the way drive sizes are usually advertised (SI units)
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "kB", "MB", "GB", "TB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1000.0 && unit < UNITS.len() - 1 {
        value /= 1000.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}

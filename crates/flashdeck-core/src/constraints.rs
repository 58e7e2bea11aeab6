//! Drive eligibility rules
//!
//! [`DriveConstraints`] is the seam the selection UI consumes: it is handed
//! around as an opaque `Rc<dyn DriveConstraints>` and only the drive
//! selector modal actually asks it questions. [`StandardConstraints`] is the
//! rule set used by the binary.

use std::fmt;

use crate::types::{format_size, Drive, SourceImage};

/// Drives larger than this are flagged so users double-check the target.
pub const LARGE_DRIVE_SIZE: u64 = 64_000_000_000;

/// How serious a status is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

/// A reason a drive is (or might not be) a good flash target
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriveStatus {
    /// Write protected
    Locked,
    /// Smaller than the selected image
    TooSmall { missing: u64 },
    /// Hosts the running operating system
    SystemDrive,
    /// Holds the selected image file
    SourceDrive,
    /// Suspiciously large for a removable target
    LargeDrive,
    /// Below the image author's recommended size
    NotRecommended,
}

impl DriveStatus {
    pub fn severity(&self) -> Severity {
        match self {
            DriveStatus::Locked | DriveStatus::TooSmall { .. } | DriveStatus::SourceDrive => {
                Severity::Error
            }
            DriveStatus::SystemDrive | DriveStatus::LargeDrive | DriveStatus::NotRecommended => {
                Severity::Warning
            }
        }
    }

    /// Short badge text
    pub fn message(&self) -> String {
        match self {
            DriveStatus::Locked => "Locked".to_string(),
            DriveStatus::TooSmall { missing } => {
                format!("Too small, {} more required", format_size(*missing))
            }
            DriveStatus::SystemDrive => "System drive".to_string(),
            DriveStatus::SourceDrive => "Source drive".to_string(),
            DriveStatus::LargeDrive => "Large drive".to_string(),
            DriveStatus::NotRecommended => "Not recommended".to_string(),
        }
    }
}

impl fmt::Display for DriveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

/// Eligibility predicates for candidate drives.
pub trait DriveConstraints: fmt::Debug {
    /// Every status that applies to `drive` given the selected image
    fn statuses(&self, drive: &Drive, image: Option<&SourceImage>) -> Vec<DriveStatus>;

    /// Whether a status prevents selecting the drive
    fn blocks(&self, status: &DriveStatus) -> bool {
        status.severity() == Severity::Error
    }

    /// Whether the user may toggle `drive`.
    ///
    /// Drives already in `selected` are always toggleable so they can be
    /// deselected after the image changes.
    fn is_selectable(&self, drive: &Drive, image: Option<&SourceImage>, selected: &[Drive]) -> bool {
        if selected.iter().any(|d| d.device == drive.device) {
            return true;
        }
        !self
            .statuses(drive, image)
            .iter()
            .any(|status| self.blocks(status))
    }

    /// First blocking status, used as the rejection reason
    fn blocking_reason(&self, drive: &Drive, image: Option<&SourceImage>) -> Option<DriveStatus> {
        self.statuses(drive, image)
            .into_iter()
            .find(|status| self.blocks(status))
    }
}

/// The default rule set
#[derive(Debug, Clone, Default)]
pub struct StandardConstraints {
    /// Allow flashing the drive the OS runs from
    pub allow_system_drives: bool,
}

impl StandardConstraints {
    pub fn new(allow_system_drives: bool) -> Self {
        Self {
            allow_system_drives,
        }
    }
}

/// Whether the drive can hold the image. Unknown sizes are not rejected.
pub fn is_drive_large_enough(drive: &Drive, image: Option<&SourceImage>) -> bool {
    match (drive.size, image) {
        (Some(size), Some(image)) => size >= image.size,
        _ => true,
    }
}

pub fn is_source_drive(drive: &Drive, image: Option<&SourceImage>) -> bool {
    image.is_some_and(|image| drive.contains_path(&image.path))
}

pub fn is_drive_size_recommended(drive: &Drive, image: Option<&SourceImage>) -> bool {
    match (drive.size, image.and_then(|i| i.recommended_drive_size)) {
        (Some(size), Some(recommended)) => size >= recommended,
        _ => true,
    }
}

pub fn is_drive_size_large(drive: &Drive) -> bool {
    drive.size.is_some_and(|size| size > LARGE_DRIVE_SIZE)
}

impl DriveConstraints for StandardConstraints {
    fn statuses(&self, drive: &Drive, image: Option<&SourceImage>) -> Vec<DriveStatus> {
        let mut statuses = Vec::new();

        if drive.is_read_only {
            statuses.push(DriveStatus::Locked);
        }
        if !is_drive_large_enough(drive, image) {
            let missing = match (image, drive.size) {
                (Some(image), Some(size)) => image.size.saturating_sub(size),
                _ => 0,
            };
            statuses.push(DriveStatus::TooSmall { missing });
        }
        if drive.is_system {
            statuses.push(DriveStatus::SystemDrive);
        }
        if is_source_drive(drive, image) {
            statuses.push(DriveStatus::SourceDrive);
        }
        if is_drive_size_large(drive) {
            statuses.push(DriveStatus::LargeDrive);
        }
        if !is_drive_size_recommended(drive, image) {
            statuses.push(DriveStatus::NotRecommended);
        }

        statuses
    }

    fn blocks(&self, status: &DriveStatus) -> bool {
        match status {
            DriveStatus::SystemDrive => !self.allow_system_drives,
            other => other.severity() == Severity::Error,
        }
    }
}

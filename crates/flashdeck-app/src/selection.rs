//! Drive selection slice projection
//!
//! [`project`] derives everything the drive step shows from a store
//! snapshot and the settings. It is pure and cheap (linear in the number of
//! selected drives), so it runs on mount and again on every store
//! notification rather than being patched incrementally.

use flashdeck_core::Drive;

use crate::config::Settings;
use crate::store::StoreState;

/// Derived view of the drive selection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DriveSelectionSlice {
    /// Whether the "select target" button is offered at all
    pub show_drives_button: bool,
    /// One `"{description} ({display_name})"` line per target
    pub drive_list_label: String,
    /// Selected drives, in selection order
    pub targets: Vec<Drive>,
}

impl DriveSelectionSlice {
    pub fn has_targets(&self) -> bool {
        !self.targets.is_empty()
    }
}

/// Project the drive selection slice from a store snapshot
pub fn project(state: &StoreState, settings: &Settings) -> DriveSelectionSlice {
    let targets = state.selected_drives();
    DriveSelectionSlice {
        show_drives_button: should_show_drives_button(settings),
        drive_list_label: drive_list_label(&targets),
        targets,
    }
}

/// Newline-joined labels of `drives`; empty for no drives
pub fn drive_list_label(drives: &[Drive]) -> String {
    drives
        .iter()
        .map(Drive::label)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn should_show_drives_button(settings: &Settings) -> bool {
    !settings.drives.disable_explicit_drive_selection
}

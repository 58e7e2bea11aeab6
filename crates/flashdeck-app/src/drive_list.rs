//! Drive list modal state
//!
//! The modal lists every available drive with its eligibility. Only the
//! cursor lives here; rows are rebuilt from the store snapshot each frame.

use flashdeck_core::{Drive, DriveConstraints, DriveStatus};

use crate::store::StoreState;

/// One line of the drive list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriveRow {
    pub drive: Drive,
    pub selected: bool,
    pub selectable: bool,
    pub statuses: Vec<DriveStatus>,
}

/// Build the rows for every available drive, in store order
pub fn rows(state: &StoreState, constraints: &dyn DriveConstraints) -> Vec<DriveRow> {
    let selected = state.selected_drives();
    let image = state.image.as_ref();
    state
        .available_drives
        .iter()
        .map(|drive| DriveRow {
            drive: drive.clone(),
            selected: state.is_drive_selected(&drive.device),
            selectable: constraints.is_selectable(drive, image, &selected),
            statuses: constraints.statuses(drive, image),
        })
        .collect()
}

/// Cursor over the drive list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DriveListState {
    pub highlighted: usize,
}

impl DriveListState {
    pub fn move_up(&mut self, len: usize) {
        if len == 0 {
            self.highlighted = 0;
        } else if self.highlighted == 0 {
            self.highlighted = len - 1;
        } else {
            self.highlighted = self.highlighted.min(len) - 1;
        }
    }

    pub fn move_down(&mut self, len: usize) {
        if len == 0 {
            self.highlighted = 0;
        } else {
            self.highlighted = (self.highlighted + 1) % len;
        }
    }

    /// Keep the cursor inside a list that may have shrunk
    pub fn clamp(&mut self, len: usize) {
        if self.highlighted >= len {
            self.highlighted = len.saturating_sub(1);
        }
    }

    /// Device under the cursor, if any
    pub fn highlighted_device(&self, state: &StoreState) -> Option<String> {
        state
            .available_drives
            .get(self.highlighted)
            .map(|d| d.device.clone())
    }

    pub fn reset(&mut self) {
        self.highlighted = 0;
    }
}

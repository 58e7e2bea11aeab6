//! Message types for the application (TEA pattern)

use flashdeck_core::Drive;

use crate::input_key::InputKey;

/// Everything that can happen to the application
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// Keyboard event from terminal
    Key(InputKey),

    /// Periodic wake-up while no input arrives
    Tick,

    /// Leave the application
    Quit,

    // ─────────────────────────────────────────────────────────
    // Drive Step
    // ─────────────────────────────────────────────────────────
    /// "Select target" was activated
    OpenDriveSelector,
    /// "Change" was activated on the selected targets
    ReselectDrive,
    CloseDriveSelector,
    /// Drop every selected target
    ClearSelection,

    // ─────────────────────────────────────────────────────────
    // Drive List Modal
    // ─────────────────────────────────────────────────────────
    ModalUp,
    ModalDown,
    /// Select or deselect the drive under the cursor
    ToggleHighlightedDrive,

    // ─────────────────────────────────────────────────────────
    // Drive Feed
    // ─────────────────────────────────────────────────────────
    /// The drive source produced a new list
    DrivesScanned { drives: Vec<Drive> },
    /// Reading the drive source failed
    DriveScanFailed { error: String },
    /// Re-read the drive source now
    RescanDrives,
}

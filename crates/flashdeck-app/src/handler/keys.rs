//! Key event handlers for the drive step

use crate::input_key::InputKey;
use crate::message::Message;
use crate::state::AppState;

/// Convert key events to messages based on what is on screen
pub fn handle_key(state: &AppState, key: InputKey) -> Option<Message> {
    // Ctrl+C quits from anywhere
    if key == InputKey::CharCtrl('c') {
        return Some(Message::Quit);
    }

    if state.modal().is_open() {
        handle_key_drive_list(key)
    } else {
        handle_key_drive_step(state, key)
    }
}

/// Handle key events on the drive step
fn handle_key_drive_step(state: &AppState, key: InputKey) -> Option<Message> {
    match key {
        InputKey::Char('q') | InputKey::Esc => Some(Message::Quit),

        // Enter activates whichever button is shown: "Select target" when
        // nothing is selected, "Change" otherwise
        InputKey::Enter => {
            if state.step_props().has_drive {
                Some(Message::ReselectDrive)
            } else {
                Some(Message::OpenDriveSelector)
            }
        }
        InputKey::Char('s') => Some(Message::OpenDriveSelector),
        InputKey::Char('r') => Some(Message::ReselectDrive),
        InputKey::Char('c') => Some(Message::ClearSelection),
        InputKey::CharCtrl('r') => Some(Message::RescanDrives),

        _ => None,
    }
}

/// Handle key events while the drive list modal is open
fn handle_key_drive_list(key: InputKey) -> Option<Message> {
    match key {
        k if k.is_up() => Some(Message::ModalUp),
        k if k.is_down() => Some(Message::ModalDown),
        InputKey::Char(' ') => Some(Message::ToggleHighlightedDrive),
        InputKey::Enter | InputKey::Esc | InputKey::Char('q') => {
            Some(Message::CloseDriveSelector)
        }
        InputKey::CharCtrl('r') => Some(Message::RescanDrives),
        _ => None,
    }
}

//! Main update function - handles state transitions (TEA pattern)

use flashdeck_core::prelude::*;
use flashdeck_core::Drive;

use crate::message::Message;
use crate::state::{AppPhase, AppState};
use crate::store::Action;

use super::{keys::handle_key, UpdateAction, UpdateResult};

/// Process a message and update state
/// Returns optional follow-up message and/or action
pub fn update(state: &mut AppState, message: Message) -> UpdateResult {
    match message {
        Message::Quit => {
            state.phase = AppPhase::Quitting;
            UpdateResult::none()
        }

        Message::Key(key) => {
            if let Some(msg) = handle_key(state, key) {
                UpdateResult::message(msg)
            } else {
                UpdateResult::none()
            }
        }

        Message::Tick => UpdateResult::none(),

        // ─────────────────────────────────────────────────────────
        // Drive Step
        // ─────────────────────────────────────────────────────────
        Message::OpenDriveSelector => {
            let props = state.step_props();
            let selector = state.drive_selector.target_selector_props(&props);
            if !selector.show || selector.disabled || selector.flashing {
                debug!("Ignoring open selector: {:?}", props);
                return UpdateResult::none();
            }
            state.drive_list.reset();
            state.drive_selector.open_selector();
            UpdateResult::none()
        }

        Message::ReselectDrive => {
            let props = state.step_props();
            if !props.has_drive || props.disabled || props.flashing {
                debug!("Ignoring reselect: {:?}", props);
                return UpdateResult::none();
            }
            state.drive_list.reset();
            state.drive_selector.reselect_drive();
            UpdateResult::none()
        }

        Message::CloseDriveSelector => {
            state.drive_selector.close_modal();
            UpdateResult::none()
        }

        Message::ClearSelection => {
            if state.step_props().flashing {
                return UpdateResult::none();
            }
            dispatch(state, Action::DeselectAllDrives);
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Drive List Modal
        // ─────────────────────────────────────────────────────────
        Message::ModalUp => {
            let len = state.store.get_state().available_drives.len();
            state.drive_list.move_up(len);
            UpdateResult::none()
        }

        Message::ModalDown => {
            let len = state.store.get_state().available_drives.len();
            state.drive_list.move_down(len);
            UpdateResult::none()
        }

        Message::ToggleHighlightedDrive => {
            if !state.modal().is_open() {
                return UpdateResult::none();
            }
            if let Some(device) = state.drive_list.highlighted_device(&state.store.get_state()) {
                dispatch(state, Action::ToggleDrive(device));
            }
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Drive Feed
        // ─────────────────────────────────────────────────────────
        Message::DrivesScanned { drives } => handle_drives_scanned(state, drives),

        Message::DriveScanFailed { error } => {
            state.last_error = Some(error);
            UpdateResult::none()
        }

        Message::RescanDrives => {
            if state.drive_source.is_some() {
                UpdateResult::action(UpdateAction::ScanDrives)
            } else {
                UpdateResult::none()
            }
        }
    }
}

fn handle_drives_scanned(state: &mut AppState, drives: Vec<Drive>) -> UpdateResult {
    debug!("Drive scan found {} drive(s)", drives.len());
    let len = drives.len();
    if dispatch(state, Action::SetAvailableDrives(drives)) {
        state.last_error = None;
    }
    state.drive_list.clamp(len);
    UpdateResult::none()
}

/// Dispatch to the store, keeping recoverable failures for the status line.
/// Returns whether the action was applied.
fn dispatch(state: &mut AppState, action: Action) -> bool {
    match state.store.dispatch(action) {
        Ok(()) => true,
        Err(e) => {
            if e.is_recoverable() {
                warn!("{}", e);
            } else {
                error!("{}", e);
            }
            state.last_error = Some(e.to_string());
            false
        }
    }
}

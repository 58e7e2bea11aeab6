//! Side effects requested by the update function

use tokio::sync::mpsc;

use flashdeck_core::prelude::*;

use crate::drive_source::{spawn_rescan, DriveSource};
use crate::handler::UpdateAction;
use crate::message::Message;

/// Execute an action returned by the update function
pub fn handle_action(
    action: UpdateAction,
    msg_tx: mpsc::Sender<Message>,
    drive_source: Option<&DriveSource>,
) {
    match action {
        UpdateAction::ScanDrives => match drive_source {
            Some(source) => {
                debug!("Rescanning {}", source);
                spawn_rescan(source.clone(), msg_tx);
            }
            None => debug!("No drive source to rescan"),
        },
    }
}

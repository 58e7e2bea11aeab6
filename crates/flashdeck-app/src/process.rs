//! Message processing
//!
//! Runs a message through the TEA update function, follows up on any
//! returned message, and hands returned actions to [`handle_action`].

use tokio::sync::mpsc;

use crate::actions::handle_action;
use crate::handler;
use crate::message::Message;
use crate::state::AppState;

/// Process a message through the TEA update function
pub fn process_message(state: &mut AppState, message: Message, msg_tx: &mpsc::Sender<Message>) {
    let mut msg = Some(message);
    while let Some(m) = msg {
        let result = handler::update(state, m);

        if let Some(action) = result.action {
            handle_action(action, msg_tx.clone(), state.drive_source.as_ref());
        }

        // Continue with follow-up message
        msg = result.message;
    }
}

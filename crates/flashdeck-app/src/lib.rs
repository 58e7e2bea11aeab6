//! flashdeck-app - Application state and drive selection logic for flashdeck
//!
//! This crate holds the observable [`Store`], the drive selection projector,
//! the drive step component state, and the TEA (The Elm Architecture) loop
//! that drives them: [`Message`] in, [`handler::update`] applies it to
//! [`AppState`], optional [`UpdateAction`]s come back out for the event loop.
//!
//! Nothing here depends on a terminal library; the tui crate renders the
//! state and converts terminal events into [`InputKey`]s.

pub mod actions;
pub mod analytics;
pub mod config;
pub mod drive_list;
pub mod drive_selector;
pub mod drive_source;
pub mod handler;
pub mod input_key;
pub mod message;
pub mod process;
pub mod selection;
pub mod signals;
pub mod state;
pub mod store;

// Re-export primary types
pub use analytics::Analytics;
pub use drive_selector::{
    ComponentViewState, DriveSelector, DriveStepProps, ModalState, TargetSelectorProps,
};
pub use handler::{UpdateAction, UpdateResult};
pub use input_key::InputKey;
pub use message::Message;
pub use selection::DriveSelectionSlice;
pub use state::{AppPhase, AppState};
pub use store::{Action, SessionIds, Store, StoreState, Subscription, WeakStore};

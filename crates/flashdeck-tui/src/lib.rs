//! flashdeck-tui - Terminal UI for flashdeck
//!
//! Renders the drive step of the flashing wizard with ratatui, polls
//! crossterm for keys and drives the update loop from flashdeck-app.

pub mod event;
pub mod layout;
pub mod render;
pub mod runner;
pub mod terminal;
pub mod theme;
pub mod widgets;

#[cfg(test)]
pub mod test_utils;

pub use runner::{run, RunOptions};

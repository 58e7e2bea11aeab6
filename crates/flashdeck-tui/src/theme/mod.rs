//! Centralized theme for the flashdeck TUI.
//!
//! - `palette`: raw colour constants
//! - `styles`: semantic style builders
//! - `icons`: glyphs with ASCII fallbacks

pub mod icons;
pub mod palette;
pub mod styles;

//! Configuration file parsing for flashdeck
//!
//! Supports:
//! - `<config dir>/flashdeck/config.toml` - Global settings

pub mod settings;
pub mod types;

pub use settings::{
    default_config_dir, init_config_dir, load_settings, save_settings, CONFIG_FILENAME,
};
pub use types::*;

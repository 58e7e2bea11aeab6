//! Custom widget components

mod drive_list_modal;
mod drive_step;
mod header;
pub mod modal_overlay;
mod status_bar;
mod target_selector;

pub use drive_list_modal::DriveListModal;
pub use drive_step::DriveStep;
pub use header::MainHeader;
pub use status_bar::StatusBar;
pub use target_selector::TargetSelector;

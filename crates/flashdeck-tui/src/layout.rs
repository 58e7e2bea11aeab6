//! Screen layout for the TUI

use ratatui::layout::{Constraint, Layout, Rect};

use crate::widgets::modal_overlay::centered_rect;

/// Preferred size of the drive step card
pub const STEP_WIDTH: u16 = 44;
pub const STEP_HEIGHT: u16 = 12;

/// Screen areas for the main layout
#[derive(Debug, Clone, Copy)]
pub struct ScreenAreas {
    /// Title and image name
    pub header: Rect,
    /// The drive step card, centered in the body
    pub step: Rect,
    /// Key hints or the last error
    pub status: Rect,
}

pub fn create(area: Rect) -> ScreenAreas {
    let chunks = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(5),
        Constraint::Length(1),
    ])
    .split(area);

    ScreenAreas {
        header: chunks[0],
        step: centered_rect(STEP_WIDTH, STEP_HEIGHT, chunks[1]),
        status: chunks[2],
    }
}

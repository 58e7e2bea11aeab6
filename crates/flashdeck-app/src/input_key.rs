//! Terminal-independent key events.
//!
//! The tui crate converts crossterm key events into [`InputKey`] at the
//! boundary, so the handlers in this crate never see terminal types.

/// A key press the application reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKey {
    /// Printable character
    Char(char),
    /// Character with Ctrl held
    CharCtrl(char),

    // Navigation
    Up,
    Down,
    Left,
    Right,
    Home,
    End,

    // Actions
    Enter,
    Esc,
    Tab,
    BackTab,
    Backspace,
}

impl InputKey {
    /// Keys that move the cursor up in a list
    pub fn is_up(self) -> bool {
        matches!(self, InputKey::Up | InputKey::Char('k'))
    }

    /// Keys that move the cursor down in a list
    pub fn is_down(self) -> bool {
        matches!(self, InputKey::Down | InputKey::Char('j'))
    }
}

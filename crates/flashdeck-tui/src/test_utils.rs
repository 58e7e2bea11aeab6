//! Test utilities for TUI rendering verification
//!
//! Widgets and full frames are rendered into ratatui's `TestBackend`, so
//! assertions run against the cell buffer without a real terminal.

use std::rc::Rc;

use ratatui::backend::TestBackend;
use ratatui::buffer::{Buffer, Cell};
use ratatui::layout::Rect;
use ratatui::widgets::Widget;
use ratatui::Frame;
use ratatui::Terminal;

use flashdeck_app::analytics::NoopAnalytics;
use flashdeck_app::config::Settings;
use flashdeck_app::{AppState, Message};
use flashdeck_core::{Drive, SourceImage};

/// Standard test terminal size
pub const TEST_WIDTH: u16 = 80;
pub const TEST_HEIGHT: u16 = 24;

/// Compact terminal for testing small layouts
pub const COMPACT_WIDTH: u16 = 40;
pub const COMPACT_HEIGHT: u16 = 12;

/// Thin wrapper around a `TestBackend` terminal.
///
/// ```ignore
/// let mut term = TestTerminal::new();
/// term.render_widget(my_widget, term.area());
/// assert!(term.buffer_contains("expected text"));
/// ```
pub struct TestTerminal {
    pub terminal: Terminal<TestBackend>,
}

impl TestTerminal {
    /// 80x24
    pub fn new() -> Self {
        Self::with_size(TEST_WIDTH, TEST_HEIGHT)
    }

    /// 40x12
    pub fn compact() -> Self {
        Self::with_size(COMPACT_WIDTH, COMPACT_HEIGHT)
    }

    pub fn with_size(width: u16, height: u16) -> Self {
        let backend = TestBackend::new(width, height);
        let terminal = Terminal::new(backend).expect("Failed to create test terminal");
        Self { terminal }
    }

    pub fn area(&self) -> Rect {
        let size = self.terminal.size().expect("Failed to get terminal size");
        Rect::new(0, 0, size.width, size.height)
    }

    pub fn render_widget<W: Widget>(&mut self, widget: W, area: Rect) {
        self.terminal
            .draw(|frame| frame.render_widget(widget, area))
            .expect("Failed to render widget");
    }

    /// Draw a full frame, e.g. with [`crate::render::view`]
    pub fn draw_with<F>(&mut self, f: F)
    where
        F: FnOnce(&mut Frame),
    {
        self.terminal.draw(f).expect("Failed to draw frame");
    }

    pub fn buffer(&self) -> &Buffer {
        self.terminal.backend().buffer()
    }

    /// Check if the buffer contains a string anywhere on a single line
    pub fn buffer_contains(&self, text: &str) -> bool {
        buffer_to_string(self.buffer()).contains(text)
    }

    pub fn line_contains(&self, line: u16, text: &str) -> bool {
        get_line_content(self.buffer(), line).contains(text)
    }

    pub fn cell_at(&self, x: u16, y: u16) -> Option<&Cell> {
        let buffer = self.buffer();
        if x < buffer.area.width && y < buffer.area.height {
            Some(&buffer[(x, y)])
        } else {
            None
        }
    }

    /// All rows joined with newlines (handy in failing assertions)
    pub fn content(&self) -> String {
        buffer_to_string(self.buffer())
    }
}

impl Default for TestTerminal {
    fn default() -> Self {
        Self::new()
    }
}

fn buffer_to_string(buffer: &Buffer) -> String {
    let mut result = String::new();
    for y in 0..buffer.area.height {
        result.push_str(&get_line_content(buffer, y));
        result.push('\n');
    }
    result
}

fn get_line_content(buffer: &Buffer, line: u16) -> String {
    let mut result = String::new();
    if line < buffer.area.height {
        for x in 0..buffer.area.width {
            result.push_str(buffer[(x, line)].symbol());
        }
    }
    result
}

/// App state with an image selected and no drives
pub fn test_app_state() -> AppState {
    test_app_state_with(Settings::default())
}

pub fn test_app_state_with(settings: Settings) -> AppState {
    let mut state =
        AppState::new(Rc::new(settings), Rc::new(NoopAnalytics)).expect("Failed to build state");
    state
        .select_image(SourceImage::new("/home/me/raspios.img", 4_000_000_000))
        .expect("Failed to select image");
    state
}

/// Feed a drive scan through the update function
pub fn scan(state: &mut AppState, drives: Vec<Drive>) {
    let result = flashdeck_app::handler::update(state, Message::DrivesScanned { drives });
    assert!(result.message.is_none());
}

pub fn sandisk() -> Drive {
    Drive::new("/dev/sdb", "SanDisk Ultra", "/dev/sdb").with_size(16_000_000_000)
}

pub fn kingston() -> Drive {
    Drive::new("/dev/sdc", "Kingston DataTraveler", "/dev/sdc").with_size(32_000_000_000)
}

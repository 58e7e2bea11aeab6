//! Bottom status line: the last error, or the key hints for the current view

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Widget,
};

use crate::theme::{palette, styles};

use super::target_selector::truncate;

pub struct StatusBar<'a> {
    error: Option<&'a str>,
    modal_open: bool,
}

impl<'a> StatusBar<'a> {
    pub fn new(error: Option<&'a str>, modal_open: bool) -> Self {
        Self { error, modal_open }
    }

    fn hints(&self) -> &'static [(&'static str, &'static str)] {
        if self.modal_open {
            &[
                ("↑↓", "move"),
                ("Space", "toggle"),
                ("Enter", "done"),
                ("^R", "rescan"),
            ]
        } else {
            &[
                ("Enter", "select"),
                ("r", "reselect"),
                ("c", "clear"),
                ("^R", "rescan"),
                ("q", "quit"),
            ]
        }
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }
        buf.set_style(area, Style::default().bg(palette::DEEPEST_BG));

        let line = match self.error {
            Some(error) => Line::from(vec![
                Span::styled(" ✗ ", styles::status_red()),
                Span::styled(
                    truncate(error, (area.width as usize).saturating_sub(3)),
                    styles::status_red(),
                ),
            ]),
            None => {
                let mut spans = vec![Span::raw(" ")];
                for (key, label) in self.hints() {
                    spans.push(Span::styled(*key, styles::keybinding()));
                    spans.push(Span::styled(format!(" {label}  "), styles::text_muted()));
                }
                Line::from(spans)
            }
        };

        buf.set_line(area.x, area.y, &line, area.width);
    }
}

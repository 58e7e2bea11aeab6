//! Header bar widget
//!
//! Shows the app title and the image chosen for flashing.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use flashdeck_core::{format_size, SourceImage};

use crate::theme::{palette, styles};

use super::target_selector::truncate;

pub struct MainHeader<'a> {
    image: Option<&'a SourceImage>,
    flashing: bool,
}

impl<'a> MainHeader<'a> {
    pub fn new(image: Option<&'a SourceImage>) -> Self {
        Self {
            image,
            flashing: false,
        }
    }

    pub fn flashing(mut self, flashing: bool) -> Self {
        self.flashing = flashing;
        self
    }
}

impl Widget for MainHeader<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(false).style(Style::default().bg(palette::CARD_BG));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let mut spans = vec![
            Span::styled(
                " flashdeck",
                Style::default()
                    .fg(palette::ACCENT)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  │  ", styles::text_muted()),
        ];

        match self.image {
            Some(image) => {
                // Title and separator take 15 columns, the size suffix about 12
                let room = (inner.width as usize).saturating_sub(28);
                spans.push(Span::styled(
                    truncate(&image.name(), room.max(8)),
                    styles::text_primary(),
                ));
                spans.push(Span::styled(
                    format!(" ({})", format_size(image.size)),
                    styles::text_secondary(),
                ));
            }
            None => spans.push(Span::styled("No image selected", styles::text_muted())),
        }

        if self.flashing {
            spans.push(Span::styled("  Flashing…", styles::accent_bold()));
        }

        buf.set_line(inner.x, inner.y, &Line::from(spans), inner.width);
    }
}

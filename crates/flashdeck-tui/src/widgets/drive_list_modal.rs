//! Drive list modal: every available drive with its selection state and
//! eligibility badges

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Widget,
};

use unicode_width::UnicodeWidthStr;

use flashdeck_app::drive_list::DriveRow;
use flashdeck_core::format_size;

use crate::theme::{icons::IconSet, styles};

use super::modal_overlay;
use super::target_selector::truncate;

const MODAL_WIDTH: u16 = 72;
/// Border, blank line and footer
const CHROME_HEIGHT: u16 = 4;
const MAX_VISIBLE_ROWS: u16 = 12;

pub struct DriveListModal<'a> {
    rows: &'a [DriveRow],
    highlighted: usize,
    icons: IconSet,
}

impl<'a> DriveListModal<'a> {
    pub fn new(rows: &'a [DriveRow], highlighted: usize, icons: IconSet) -> Self {
        Self {
            rows,
            highlighted,
            icons,
        }
    }

    fn row_line(&self, row: &DriveRow, highlighted: bool, width: usize) -> Line<'static> {
        let mark = if row.selected {
            self.icons.checked()
        } else if !row.selectable {
            self.icons.blocked()
        } else {
            self.icons.unchecked()
        };

        let base = if highlighted {
            styles::focused_selected()
        } else if row.selectable || row.selected {
            styles::text_primary()
        } else {
            styles::text_muted()
        };

        let size = row.drive.size.map(format_size).unwrap_or_default();
        let badges: Vec<Span<'static>> = row
            .statuses
            .iter()
            .map(|status| {
                let style = if highlighted {
                    base
                } else {
                    styles::severity(status.severity())
                };
                Span::styled(format!("  {} {}", self.icons.alert(), status), style)
            })
            .collect();
        let badge_width: usize = badges.iter().map(|b| b.width()).sum();

        // Mark, padding and the size column
        let room = width.saturating_sub(badge_width + mark.width() + 13);
        let mut spans = vec![
            Span::styled(format!(" {mark} "), base),
            Span::styled(format!("{:<room$}", truncate(&row.drive.label(), room)), base),
            Span::styled(format!("{size:>10} "), base),
        ];
        spans.extend(badges);
        Line::from(spans).style(if highlighted { base } else { Style::default() })
    }
}

impl Widget for DriveListModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let visible = (self.rows.len() as u16).clamp(1, MAX_VISIBLE_ROWS);
        let modal = modal_overlay::open_modal(buf, area, MODAL_WIDTH, visible + CHROME_HEIGHT);

        let block = styles::modal_block(" Select target ");
        let inner = block.inner(modal);
        block.render(modal, buf);

        if inner.height < 2 || inner.width == 0 {
            return;
        }

        let list_height = inner.height.saturating_sub(2) as usize;
        if self.rows.is_empty() {
            buf.set_line(
                inner.x + 1,
                inner.y,
                &Line::from(Span::styled("No drives connected", styles::text_muted())),
                inner.width.saturating_sub(1),
            );
        } else {
            // Keep the highlighted row in view
            let offset = self.highlighted.saturating_sub(list_height.saturating_sub(1));
            for (i, row) in self.rows.iter().enumerate().skip(offset).take(list_height) {
                let line = self.row_line(row, i == self.highlighted, inner.width as usize);
                let y = inner.y + (i - offset) as u16;
                if i == self.highlighted {
                    buf.set_style(Rect::new(inner.x, y, inner.width, 1), line.style);
                }
                buf.set_line(inner.x, y, &line, inner.width);
            }
        }

        let footer = Line::from(vec![
            Span::styled(" ↑↓", styles::keybinding()),
            Span::styled(" move  ", styles::text_muted()),
            Span::styled("Space", styles::keybinding()),
            Span::styled(" toggle  ", styles::text_muted()),
            Span::styled("Enter", styles::keybinding()),
            Span::styled(" done", styles::text_muted()),
        ]);
        buf.set_line(inner.x, inner.bottom() - 1, &footer, inner.width);
    }
}

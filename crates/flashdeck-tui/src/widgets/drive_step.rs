//! The "drive" step of the flashing wizard
//!
//! A drive pictogram flanked by the lines that join it to the previous
//! (image) and next (flash) steps, with the target selector underneath.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::Widget,
};

use flashdeck_app::{DriveStepProps, TargetSelectorProps};

use crate::theme::{icons::IconSet, palette, styles};

use super::target_selector::TargetSelector;

const ICON_WIDTH: u16 = 7;
const ICON_HEIGHT: u16 = 3;

pub struct DriveStep<'a> {
    props: DriveStepProps,
    selector: &'a TargetSelectorProps,
    icons: IconSet,
}

impl<'a> DriveStep<'a> {
    pub fn new(props: DriveStepProps, selector: &'a TargetSelectorProps, icons: IconSet) -> Self {
        Self {
            props,
            selector,
            icons,
        }
    }

    fn render_connecting_lines(&self, icon: Rect, row: u16, area: Rect, buf: &mut Buffer) {
        let glyph = self.icons.step_line();

        // Into the step from the image step
        let left = styles::step_line(self.props.disabled);
        for x in area.x..icon.x.saturating_sub(1) {
            buf[(x, row)].set_symbol(glyph).set_style(left);
        }

        // Out of the step towards flashing
        let right = styles::step_line(self.props.next_step_disabled);
        for x in (icon.right() + 1)..area.right() {
            buf[(x, row)].set_symbol(glyph).set_style(right);
        }
    }
}

impl Widget for DriveStep<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(!self.props.disabled)
            .title(" Target ")
            .style(Style::default().bg(palette::CARD_BG));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width < ICON_WIDTH || inner.height < ICON_HEIGHT + 2 {
            return;
        }

        let icon = Rect::new(
            inner.x + (inner.width - ICON_WIDTH) / 2,
            inner.y + 1,
            ICON_WIDTH,
            ICON_HEIGHT,
        );
        let icon_style = if self.props.disabled {
            styles::text_muted()
        } else {
            styles::text_primary()
        };
        for (i, line) in self.icons.drive().iter().enumerate() {
            buf.set_stringn(
                icon.x,
                icon.y + i as u16,
                line,
                ICON_WIDTH as usize,
                icon_style,
            );
        }

        if self.props.show_step_connecting_lines() {
            self.render_connecting_lines(icon, icon.y + 1, inner, buf);
        }

        let selector_area = Rect::new(
            inner.x + 1,
            icon.bottom() + 1,
            inner.width.saturating_sub(2),
            inner.bottom().saturating_sub(icon.bottom() + 1),
        );
        TargetSelector::new(self.selector).render(selector_area, buf);
    }
}

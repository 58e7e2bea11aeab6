//! Target selector: the "Select target" button, or the selected targets
//! with a "Change" action

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use flashdeck_app::TargetSelectorProps;
use flashdeck_core::{format_size, Drive};

use crate::theme::styles;

pub struct TargetSelector<'a> {
    props: &'a TargetSelectorProps,
}

impl<'a> TargetSelector<'a> {
    pub fn new(props: &'a TargetSelectorProps) -> Self {
        Self { props }
    }

    fn button_lines(&self) -> Vec<Line<'static>> {
        let inactive = self.props.disabled || self.props.flashing;
        let mut lines = vec![Line::from(Span::styled(
            "  Select target  ",
            styles::button(inactive),
        ))];
        if !inactive {
            lines.push(Line::from(vec![
                Span::styled("Enter", styles::keybinding()),
                Span::styled(" to choose", styles::text_muted()),
            ]));
        }
        lines
    }

    fn target_lines(&self, width: usize, height: usize) -> Vec<Line<'static>> {
        let targets = &self.props.targets;
        let mut lines = Vec::new();

        if let [drive] = targets.as_slice() {
            lines.push(Line::from(Span::styled(
                truncate(&drive.description, width),
                styles::text_primary().add_modifier(Modifier::BOLD),
            )));
            let detail = match drive.size {
                Some(size) => format!("{} · {}", drive.display_name, format_size(size)),
                None => drive.display_name.clone(),
            };
            lines.push(Line::from(Span::styled(
                truncate(&detail, width),
                styles::text_muted(),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                format!("{} targets", targets.len()),
                styles::text_primary().add_modifier(Modifier::BOLD),
            )));
            // Leave room for the header and the "Change" line
            let room = height.saturating_sub(2);
            // One row per target, even when a description spans lines
            let labels: Vec<String> = targets
                .iter()
                .map(|drive| Drive::label(drive).replace('\n', " "))
                .collect();
            let shown = if labels.len() > room {
                room.saturating_sub(1)
            } else {
                labels.len()
            };
            for label in &labels[..shown] {
                lines.push(Line::from(Span::styled(
                    truncate(label, width),
                    styles::text_secondary(),
                )));
            }
            if shown < labels.len() {
                lines.push(Line::from(Span::styled(
                    format!("+{} more", labels.len() - shown),
                    styles::text_muted(),
                )));
            }
        }

        if !self.props.flashing {
            lines.push(Line::from(vec![
                Span::styled("Change", styles::accent_bold()),
                Span::styled(" (r)", styles::text_muted()),
            ]));
        }
        lines
    }
}

impl Widget for TargetSelector<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let lines = if self.props.show {
            self.button_lines()
        } else if self.props.targets.is_empty() {
            vec![Line::from(Span::styled(
                "No target selected",
                styles::text_muted(),
            ))]
        } else {
            self.target_lines(area.width as usize, area.height as usize)
        };

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(area, buf);
    }
}

/// Shorten `text` to at most `width` columns, ending with an ellipsis
pub(crate) fn truncate(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

//! Icon set for the TUI.
//!
//! [`IconSet`] resolves glyphs at runtime: unicode by default, plain ASCII
//! when `ui.ascii` is set for terminals without good font coverage.

/// Runtime icon resolver
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IconSet {
    ascii: bool,
}

impl IconSet {
    pub fn new(ascii: bool) -> Self {
        Self { ascii }
    }

    /// Three-line drive pictogram
    pub fn drive(&self) -> [&'static str; 3] {
        if self.ascii {
            ["+-----+", "| o o |", "+-----+"]
        } else {
            ["╭─────╮", "│ ▪ ▪ │", "╰─────╯"]
        }
    }

    /// Horizontal segment of a step connecting line
    pub fn step_line(&self) -> &'static str {
        if self.ascii {
            "-"
        } else {
            "━"
        }
    }

    pub fn checked(&self) -> &'static str {
        if self.ascii {
            "[x]"
        } else {
            "☑"
        }
    }

    pub fn unchecked(&self) -> &'static str {
        if self.ascii {
            "[ ]"
        } else {
            "☐"
        }
    }

    pub fn blocked(&self) -> &'static str {
        if self.ascii {
            "[-]"
        } else {
            "⊘"
        }
    }

    pub fn alert(&self) -> &'static str {
        if self.ascii {
            "!"
        } else {
            "\u{26a0}" // ⚠
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_icons_are_ascii() {
        let icons = IconSet::new(true);
        for glyph in icons
            .drive()
            .iter()
            .chain([icons.step_line(), icons.checked(), icons.unchecked()].iter())
        {
            assert!(glyph.is_ascii(), "{glyph:?} is not ascii");
        }
    }

    #[test]
    fn test_drive_rows_have_equal_width() {
        use unicode_width::UnicodeWidthStr;

        for icons in [IconSet::new(false), IconSet::new(true)] {
            let widths: Vec<usize> = icons.drive().iter().map(|row| row.width()).collect();
            assert!(widths.windows(2).all(|w| w[0] == w[1]), "{widths:?}");
        }
    }
}

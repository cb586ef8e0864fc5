//! # Logo Component
//!
//! An indexed-colour pixel grid painted with block glyphs, centred on the
//! top rows of the screen.
//!
//! Pixel values: `0` transparent (the cell is skipped, not cleared), `1..=3`
//! map to the theme's logo roles. The top row is drawn with `▄` and the
//! bottom row with `▀` so the mark sits between two half rows.

use ratatui::backend::Backend;
use ratatui::layout::Rect;

use crate::tui::component::Component;
use crate::tui::surface::Surface;
use crate::tui::theme::{Role, Theme};

const PIXELS: [&str; 6] = [
    "0000002222000000002222000000",
    "0000223333220000223333220000",
    "0022311111132222311111132200",
    "0231100000011331100000011320",
    "2310000000000110000000000132",
    "1100000000000000000000000011",
];

pub const LOGO_WIDTH: u16 = PIXELS[0].len() as u16;
pub const LOGO_HEIGHT: u16 = PIXELS.len() as u16;

pub struct Logo {
    theme: Theme,
}

impl Logo {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    fn glyph(row: u16) -> char {
        if row == LOGO_HEIGHT - 1 {
            '▀'
        } else if row == 0 {
            '▄'
        } else {
            '█'
        }
    }
}

impl Component for Logo {
    fn paint<B: Backend>(&mut self, surface: &mut Surface<B>, area: Rect) {
        let left = area.x + (area.width / 2).saturating_sub(LOGO_WIDTH / 2);
        surface.set_bg(self.theme.color(Role::LogoBackground));

        for (row, pixels) in (0..area.height.min(LOGO_HEIGHT)).zip(PIXELS) {
            surface.move_to(left, area.y + row);
            for pixel in pixels.bytes() {
                let role = match pixel {
                    b'1' => Role::LogoShade,
                    b'2' => Role::LogoBody,
                    b'3' => Role::LogoAccent,
                    _ => {
                        surface.skip(1);
                        continue;
                    }
                };
                surface.set_fg(self.theme.color(role));
                surface.print_char(Self::glyph(row));
            }
        }
    }
}

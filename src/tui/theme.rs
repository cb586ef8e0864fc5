//! # Theme
//!
//! Semantic colour roles, resolved once at startup.
//!
//! The named palette uses the terminal's own ANSI colours. The truecolor
//! palette swaps the accent colours for softer RGB values; on terminals that
//! do not advertise 24-bit colour `Palette::Auto` quietly stays named.

use ratatui::style::Color;

use crate::core::config::Palette;
use crate::core::log_store::EntryKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Behind the logo.
    LogoBackground,
    /// Logo pixel value 1.
    LogoShade,
    /// Logo pixel value 2.
    LogoBody,
    /// Logo pixel value 3.
    LogoAccent,
    /// Prompt, separator, axis labels.
    Chrome,
    Message,
    Warning,
    Error,
    Success,
    Debug,
    GraphLow,
    GraphMidLow,
    GraphMidHigh,
    GraphHigh,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    truecolor: bool,
}

impl Theme {
    pub fn new(palette: Palette) -> Self {
        let truecolor = match palette {
            Palette::Named => false,
            Palette::Truecolor => true,
            Palette::Auto => supports_truecolor(std::env::var("COLORTERM").ok().as_deref()),
        };
        Self { truecolor }
    }

    pub fn named() -> Self {
        Self { truecolor: false }
    }

    pub fn is_truecolor(&self) -> bool {
        self.truecolor
    }

    pub fn color(&self, role: Role) -> Color {
        match role {
            Role::LogoBackground => Color::Black,
            Role::LogoShade | Role::GraphMidHigh => self.pick(Color::Cyan, (52, 133, 157)),
            Role::LogoBody | Role::GraphHigh | Role::Debug => {
                self.pick(Color::LightCyan, (126, 196, 193))
            }
            Role::LogoAccent | Role::Warning => self.pick(Color::LightYellow, (245, 237, 186)),
            Role::Chrome => Color::DarkGray,
            Role::Message => Color::Gray,
            Role::Error => self.pick(Color::LightRed, (210, 100, 103)),
            Role::Success => self.pick(Color::LightGreen, (192, 199, 65)),
            Role::GraphLow => self.pick(Color::Blue, (88, 69, 99)),
            Role::GraphMidLow => self.pick(Color::LightBlue, (140, 143, 174)),
        }
    }

    pub fn for_kind(&self, kind: EntryKind) -> Color {
        self.color(match kind {
            EntryKind::Message => Role::Message,
            EntryKind::Warning => Role::Warning,
            EntryKind::Error => Role::Error,
            EntryKind::Success => Role::Success,
            EntryKind::Debug => Role::Debug,
        })
    }

    fn pick(&self, named: Color, (r, g, b): (u8, u8, u8)) -> Color {
        if self.truecolor {
            Color::Rgb(r, g, b)
        } else {
            named
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::named()
    }
}

fn supports_truecolor(colorterm: Option<&str>) -> bool {
    matches!(colorterm, Some(value) if value.eq_ignore_ascii_case("truecolor") || value.eq_ignore_ascii_case("24bit"))
}

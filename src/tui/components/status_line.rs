//! # StatusLine Component
//!
//! The single line above the bottom of the screen. Shows, in priority order:
//!
//! 1. **Booting**: `"Booting chanterm..."` with `animation_tick % 4` dots
//! 2. **Graph view**: a hint that Escape closes the graph
//! 3. **Prompt**: `>` + the input buffer + a `_` cursor that blinks with the
//!    animation tick
//!
//! The rest of the line is always padded so a shorter text erases a longer
//! one from the previous pass.

use ratatui::backend::Backend;
use ratatui::layout::Rect;

use crate::core::state::{SessionState, View};
use crate::tui::component::Component;
use crate::tui::surface::Surface;
use crate::tui::theme::{Role, Theme};

pub const GRAPH_HINT: &str = "Press ESC to close graph...";

pub struct StatusLine<'a> {
    pub state: &'a SessionState,
    pub boot_message: &'a str,
    pub theme: Theme,
}

impl StatusLine<'_> {
    /// The text to show, without padding.
    pub fn text(&self) -> String {
        let state = self.state;
        if state.initializing {
            let dots = (state.animation_tick % 4) as usize;
            format!("{}{}", self.boot_message, ".".repeat(dots))
        } else if state.current_view == View::Graph {
            GRAPH_HINT.to_string()
        } else {
            let cursor = if state.animation_tick % 2 == 0 { "_" } else { "" };
            format!(">{}{}", state.prompt.as_str(), cursor)
        }
    }
}

impl Component for StatusLine<'_> {
    fn paint<B: Backend>(&mut self, surface: &mut Surface<B>, area: Rect) {
        if area.is_empty() {
            return;
        }
        surface.move_to(area.x, area.y);
        surface.set_fg(self.theme.color(Role::Chrome));
        surface.print(&self.text());
        surface.fill_line(' ');
    }
}

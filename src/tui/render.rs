//! # Render Engine
//!
//! One pass paints only the regions marked dirty.
//!
//! ```text
//! row 0          ┌──────── logo ────────┐
//!  ..            │                      │
//! LOGO_HEIGHT    ........................   separator (with content)
//!  +1            │ content (log/graph)  │
//!  ..            │                      │
//! height - 3     └──────────────────────┘
//! height - 2     >prompt_                    status line
//! height - 1                                 (unused)
//! ```
//!
//! A region's dirty bit is cleared right before it is painted. Whatever
//! marks a region while the pass is running (a producer thread, or the
//! content renderer itself) therefore gets picked up by the next pass.

use ratatui::backend::Backend;
use ratatui::layout::{Rect, Size};
use ratatui::style::Color;

use crate::core::console::Console;
use crate::core::log_store::LogSnapshot;
use crate::core::region::Regions;
use crate::core::state::{SessionState, View};
use crate::tui::component::Component;
use crate::tui::components::logo::LOGO_HEIGHT;
use crate::tui::components::{GraphView, LogView, Logo, StatusLine};
use crate::tui::surface::Surface;
use crate::tui::theme::{Role, Theme};

/// Where each region sits for a given terminal size. Regions that do not fit
/// come out zero-sized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub logo: Rect,
    pub separator: Rect,
    pub content: Rect,
    pub prompt: Rect,
}

impl ScreenLayout {
    pub fn new(size: Size) -> Self {
        let Size { width, height } = size;
        let row = |y: u16, rows: u16| {
            if y < height {
                Rect::new(0, y, width, rows.min(height - y))
            } else {
                Rect::new(0, height, width, 0)
            }
        };

        Self {
            logo: row(0, LOGO_HEIGHT),
            separator: row(LOGO_HEIGHT, 1),
            content: row(LOGO_HEIGHT + 1, height.saturating_sub(LOGO_HEIGHT + 3)),
            prompt: if height >= 2 {
                row(height - 2, 1)
            } else {
                row(height, 0)
            },
        }
    }

    /// Rows available to the content renderer.
    pub fn page_height(&self) -> usize {
        self.content.height as usize
    }
}

pub struct Renderer {
    theme: Theme,
    boot_message: String,
}

impl Renderer {
    pub fn new(theme: Theme, boot_message: impl Into<String>) -> Self {
        Self {
            theme,
            boot_message: boot_message.into(),
        }
    }

    /// Paint every dirty region. The caller holds the log store lock through
    /// `logs` for the whole pass.
    pub fn redraw<B: Backend>(
        &self,
        surface: &mut Surface<B>,
        state: &mut SessionState,
        console: &Console,
        logs: &LogSnapshot<'_>,
    ) {
        let size = surface.begin_frame();
        console.logs().set_wrap_width(size.width.saturating_sub(1));
        let layout = ScreenLayout::new(size);
        let dirty = console.dirty();

        if dirty.take(Regions::LOGO) {
            Logo::new(self.theme).paint(surface, layout.logo);
        }

        surface.set_bg(Color::Reset);
        surface.set_fg(self.theme.color(Role::Chrome));

        if dirty.take(Regions::PROMPT) {
            StatusLine {
                state,
                boot_message: &self.boot_message,
                theme: self.theme,
            }
            .paint(surface, layout.prompt);
        }

        if dirty.take(Regions::CONTENT) {
            if !layout.separator.is_empty() {
                surface.set_fg(self.theme.color(Role::Chrome));
                surface.move_to(layout.separator.x, layout.separator.y);
                surface.fill_line('.');
            }

            match state.current_view {
                View::Log => LogView {
                    logs,
                    state,
                    dirty,
                    theme: self.theme,
                }
                .paint(surface, layout.content),
                View::Graph => {
                    let graph = console.graphs().get(&state.current_channel);
                    GraphView {
                        graph: graph.as_deref(),
                        channel: &state.current_channel,
                        dirty,
                        theme: self.theme,
                    }
                    .paint(surface, layout.content)
                }
            }
        }

        surface.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::log_store::EntryKind;

    #[test]
    fn test_layout_for_regular_terminal() {
        let layout = ScreenLayout::new(Size::new(80, 24));
        assert_eq!(layout.logo, Rect::new(0, 0, 80, LOGO_HEIGHT));
        assert_eq!(layout.separator, Rect::new(0, LOGO_HEIGHT, 80, 1));
        assert_eq!(layout.content.y, LOGO_HEIGHT + 1);
        assert_eq!(layout.page_height(), (24 - LOGO_HEIGHT - 3) as usize);
        assert_eq!(layout.prompt, Rect::new(0, 22, 80, 1));
        // Content stops right above the prompt row
        assert_eq!(layout.content.bottom(), layout.prompt.y);
    }

    #[test]
    fn test_layout_clamps_on_tiny_terminal() {
        let layout = ScreenLayout::new(Size::new(3, 1));
        assert_eq!(layout.logo.height, 1);
        assert!(layout.separator.is_empty());
        assert!(layout.content.is_empty());
        assert!(layout.prompt.is_empty());

        let layout = ScreenLayout::new(Size::new(0, 0));
        assert!(layout.logo.is_empty());
        assert_eq!(layout.page_height(), 0);
    }

    #[test]
    fn test_redraw_clears_only_painted_regions() {
        let console = Console::new();
        console.write(EntryKind::Message, "hello");
        let mut surface = Surface::headless(40, LOGO_HEIGHT + 6);
        let mut state = SessionState::default();
        let renderer = Renderer::new(Theme::named(), "Booting");

        {
            let logs = console.logs().snapshot();
            renderer.redraw(&mut surface, &mut state, &console, &logs);
        }

        assert!(console.dirty().is_empty());
        let prompt_row = LOGO_HEIGHT + 4;
        assert!(surface.row_text(prompt_row).starts_with("Booting"));
        assert!(surface.row_text(LOGO_HEIGHT).starts_with("....."));
        assert!(surface.row_text(LOGO_HEIGHT + 1).starts_with("hello"));
    }

    #[test]
    fn test_redraw_updates_wrap_width() {
        let console = Console::new();
        let mut surface = Surface::headless(50, 20);
        let mut state = SessionState::default();

        let logs = console.logs().snapshot();
        Renderer::new(Theme::named(), "").redraw(&mut surface, &mut state, &console, &logs);
        drop(logs);

        assert_eq!(console.logs().wrap_width(), 49);
    }

    #[test]
    fn test_graph_view_keeps_content_dirty() {
        let console = Console::new();
        console.set_channel_graph("main", crate::core::graph::Graph::default());
        let mut surface = Surface::headless(40, 20);
        let mut state = SessionState::default();
        state.current_view = View::Graph;

        let logs = console.logs().snapshot();
        Renderer::new(Theme::named(), "").redraw(&mut surface, &mut state, &console, &logs);

        assert_eq!(console.dirty().pending(), Regions::CONTENT);
    }
}

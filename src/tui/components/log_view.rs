//! # LogView Component
//!
//! Pages through the current channel's log entries, one entry per row,
//! coloured by kind.
//!
//! ## Live tail
//!
//! While entries remain below the viewport the view advances one row per
//! pass and marks itself dirty again, so a burst of output scrolls into view
//! line by line instead of jumping.
//!
//! The first time the tail catches up after `mark_ready`, the boot phase is
//! over: `ready` and `initializing` are cleared and every region is marked
//! for one full repaint.

use ratatui::backend::Backend;
use ratatui::layout::Rect;

use crate::core::log_store::LogSnapshot;
use crate::core::region::{DirtyRegions, Regions};
use crate::core::state::SessionState;
use crate::tui::component::Component;
use crate::tui::surface::Surface;
use crate::tui::theme::Theme;

pub struct LogView<'a> {
    pub logs: &'a LogSnapshot<'a>,
    pub state: &'a mut SessionState,
    pub dirty: &'a DirtyRegions,
    pub theme: Theme,
}

impl Component for LogView<'_> {
    fn paint<B: Backend>(&mut self, surface: &mut Surface<B>, area: Rect) {
        let page = area.height as usize;
        let available = self.logs.count_for(&self.state.current_channel);
        let max_index = available.saturating_sub(page);
        self.state.scroll_offset = self.state.scroll_offset.min(max_index);

        let rows = self
            .logs
            .window_for(&self.state.current_channel, self.state.scroll_offset, page);
        for (row, entry) in (area.y..).zip(rows) {
            surface.move_to(area.x, row);
            surface.set_fg(self.theme.for_kind(entry.kind));
            surface.print(&entry.text);
            surface.fill_line(' ');
        }

        if self.state.scroll_offset < max_index {
            self.state.scroll_offset += 1;
            self.dirty.mark(Regions::CONTENT);

            if self.state.scroll_offset == max_index && self.state.ready {
                self.state.initializing = false;
                self.state.ready = false;
                self.dirty.mark(Regions::all());
            }
        }
    }
}

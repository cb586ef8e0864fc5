//! # GraphView Component
//!
//! Bar chart of the current channel's graph, newest sample on the right.
//!
//! ```text
//! 30 |            ▓  █
//! 20 |      ▒  ▓▓ ▓▓ ██
//! 10 |░ ░░ ▒▒ ▓▓▓▓▓▓▓███
//!    ^ pad_left   ^ plot width = terminal width - pad_left - 1
//! ```
//!
//! Each row stands for `divisions` units, derived from the graph's running
//! maximum so the tallest sample ever seen fits the plot. Bars are coloured
//! by height and shaded by horizontal position.
//!
//! The graph is treated as live: every paint marks the content region dirty
//! again.

use ratatui::backend::Backend;
use ratatui::layout::Rect;
use unicode_width::UnicodeWidthStr;

use crate::core::graph::Graph;
use crate::core::region::{DirtyRegions, Regions};
use crate::tui::component::Component;
use crate::tui::surface::Surface;
use crate::tui::theme::{Role, Theme};

pub struct GraphView<'a> {
    pub graph: Option<&'a Graph>,
    pub channel: &'a str,
    pub dirty: &'a DirtyRegions,
    pub theme: Theme,
}

/// Value covered by one row of a plot `rows` high. A whole number, never
/// below 1.
///
/// Kept in `f64` so samples beyond the integer range still scale.
pub fn divisions(max_point: f64, rows: usize) -> f64 {
    (max_point / (rows as f64 + 1.0)).floor().max(1.0)
}

/// Filled rows for `sample`, clamped to `[0, rows]`.
pub fn column_height(sample: f64, divisions: f64, rows: usize) -> usize {
    // `as` saturates, and NaN becomes 0
    (sample.trunc() / divisions).floor().clamp(0.0, rows as f64) as usize
}

impl GraphView<'_> {
    fn paint_placeholder<B: Backend>(&self, surface: &mut Surface<B>, area: Rect) {
        surface.set_fg(self.theme.color(Role::Chrome));
        for row in 0..area.height {
            surface.move_to(area.x, area.y + row);
            if row == 0 {
                surface.print(&format!(
                    "No graph data available for '{}'.",
                    self.channel
                ));
            }
            surface.fill_line(' ');
        }
    }

    fn bar_color(&self, height: usize, rows: usize) -> Role {
        if height < rows / 3 {
            Role::GraphLow
        } else if height < rows / 2 {
            Role::GraphMidLow
        } else if height < (rows / 3) * 2 {
            Role::GraphMidHigh
        } else {
            Role::GraphHigh
        }
    }

    fn shade(column: usize, width: usize) -> char {
        if column > width / 2 {
            '█'
        } else if column > width / 3 {
            '▓'
        } else if column > width / 4 {
            '▒'
        } else {
            '░'
        }
    }
}

impl Component for GraphView<'_> {
    fn paint<B: Backend>(&mut self, surface: &mut Surface<B>, area: Rect) {
        if area.is_empty() {
            return;
        }
        let Some(graph) = self.graph else {
            self.paint_placeholder(surface, area);
            return;
        };

        let rows = area.height as usize;
        let pad_left = graph.format_axis(graph.max_point()).width() + 1;
        let plot_width = (area.width as usize).saturating_sub(pad_left + 1);
        let divisions = divisions(graph.max_point(), rows);

        surface.set_fg(self.theme.color(Role::Chrome));
        for row in 0..rows {
            let value = (rows - row) as f64 * divisions;
            surface.move_to(area.x, area.y + row as u16);
            surface.print(&format!(
                "{:<width$}|",
                graph.format_axis(value),
                width = pad_left - 1
            ));
        }

        // Right-align the newest samples; missing history is blank
        let data = graph.data_points();
        let first = data.len().saturating_sub(plot_width);
        let gap = plot_width.saturating_sub(data.len());

        for column in 0..plot_width {
            let sample = if column >= gap {
                data[first + column - gap]
            } else {
                0.0
            };
            let height = column_height(sample, divisions, rows);
            let glyph = Self::shade(column, plot_width);
            surface.set_fg(self.theme.color(self.bar_color(height, rows)));

            let x = area.x.saturating_add((pad_left + column) as u16);
            for level in 0..rows {
                surface.move_to(x, area.y + (rows - 1 - level) as u16);
                surface.print_char(if level < height { glyph } else { ' ' });
            }
        }

        self.dirty.mark(Regions::CONTENT);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Color;
    use std::sync::Arc;

    fn paint(surface: &mut Surface<ratatui::backend::TestBackend>, graph: Option<&Graph>) -> DirtyRegions {
        let dirty = DirtyRegions::default();
        let size = surface.begin_frame();
        GraphView {
            graph,
            channel: "cpu",
            dirty: &dirty,
            theme: Theme::named(),
        }
        .paint(surface, Rect::new(0, 0, size.width, size.height));
        surface.flush();
        dirty
    }

    #[test]
    fn test_divisions_never_below_one() {
        assert_eq!(divisions(0.0, 10), 1.0);
        assert_eq!(divisions(5.0, 10), 1.0);
        assert_eq!(divisions(110.0, 10), 10.0);
        assert_eq!(divisions(119.0, 10), 10.0);
        assert_eq!(divisions(f64::NAN, 10), 1.0);
    }

    #[test]
    fn test_column_height_clamps_to_rows() {
        let divisions = divisions(110.0, 10);
        assert_eq!(column_height(20.0 * divisions, divisions, 10), 10);
        assert_eq!(column_height(35.0, divisions, 10), 3);
        assert_eq!(column_height(-4.0, divisions, 10), 0);
    }

    #[test]
    fn test_placeholder_when_no_graph() {
        let mut surface = Surface::headless(40, 3);
        surface.begin_frame();
        surface.move_to(0, 2);
        surface.print("stale");
        surface.flush();

        let dirty = paint(&mut surface, None);

        assert!(surface.row_text(0).starts_with("No graph data available for 'cpu'."));
        assert!(!surface.row_text(2).contains("stale"));
        assert!(dirty.is_empty());
    }

    #[test]
    fn test_axis_labels_and_right_aligned_bars() {
        // max 12 over 3 rows: divisions = 3, labels 9 / 6 / 3
        let graph = Graph::with_points(Arc::new(|v: f64| format!("{v:.0}")), [12.0, 3.0]);
        let mut surface = Surface::headless(10, 3);
        let dirty = paint(&mut surface, Some(&graph));

        // pad_left = len("12") + 1 = 3, plot width = 10 - 4 = 6
        assert_eq!(surface.row_text(0), "9 |    █  ");
        assert_eq!(surface.row_text(1), "6 |    █  ");
        assert_eq!(surface.row_text(2), "3 |    ██ ");
        assert_eq!(dirty.pending(), Regions::CONTENT);
    }

    #[test]
    fn test_bars_coloured_by_height() {
        let graph = Graph::with_points(Arc::new(|v: f64| format!("{v:.0}")), [0.0, 1.0, 9.0]);
        let mut surface = Surface::headless(12, 6);
        paint(&mut surface, Some(&graph));

        // divisions = 1, pad_left = 2, plot width = 9, samples in columns 6..9
        let bottom = 5;
        assert_eq!(surface.fg_at(2 + 7, bottom), Color::Blue);
        assert_eq!(surface.fg_at(2 + 8, bottom), Color::LightCyan);
    }

    #[test]
    fn test_huge_samples_scale_without_overflow() {
        let graph = Graph::with_points(Arc::new(|v: f64| format!("{v:.0e}")), [1e20, 5e19]);
        let mut surface = Surface::headless(40, 6);
        let dirty = paint(&mut surface, Some(&graph));

        // divisions = floor(1e20 / 7), so the tallest bar fills all six rows
        // and the half-size one stops at three
        let pad_left = graph.format_axis(1e20).len() + 1;
        let plot_width = 40 - pad_left - 1;
        let last = (pad_left + plot_width - 1) as u16;
        assert_eq!(dirty.pending(), Regions::CONTENT);
        assert_eq!(surface.row_text(0).chars().nth(last as usize - 1), Some('█'));
        assert_eq!(surface.row_text(0).chars().nth(last as usize), Some(' '));
        assert_eq!(surface.row_text(3).chars().nth(last as usize), Some('█'));
        assert!(surface.row_text(0).starts_with("9e19|"));
    }

    #[test]
    fn test_column_height_handles_out_of_range_samples() {
        assert_eq!(column_height(f64::MAX, 1.0, 5), 5);
        assert_eq!(column_height(f64::INFINITY, 2.0, 5), 5);
        assert_eq!(column_height(f64::NEG_INFINITY, 2.0, 5), 0);
        assert_eq!(column_height(f64::NAN, 2.0, 5), 0);
    }

    #[test]
    fn test_only_newest_samples_fit() {
        let graph = Graph::with_points(
            Arc::new(|v: f64| format!("{v:.0}")),
            (0..100).map(|n| if n < 95 { 0.0 } else { 4.0 }),
        );
        let mut surface = Surface::headless(10, 2);
        paint(&mut surface, Some(&graph));

        // Plot width 7 shows samples 93..100; the last five are non-zero
        let row = surface.row_text(1);
        assert_eq!(row.chars().skip(2).take(7).filter(|c| *c != ' ').count(), 5);
    }
}

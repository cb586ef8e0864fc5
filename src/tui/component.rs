use ratatui::backend::Backend;
use ratatui::layout::Rect;

use super::surface::Surface;

/// A piece of the screen that knows how to paint itself.
///
/// Components follow the props pattern:
/// - They receive data via struct fields (often borrowed for one pass).
/// - They paint onto the [`Surface`] within the given `Rect`.
///
/// # Painting in place
///
/// Nothing clears the screen between passes, so a component must overwrite
/// every cell of its area it does not want to keep, usually by padding rows
/// with [`Surface::fill_line`].
///
/// `paint` takes `&mut self` so components can update state they hold a
/// mutable borrow of (e.g. the log view's scroll offset).
pub trait Component {
    fn paint<B: Backend>(&mut self, surface: &mut Surface<B>, area: Rect);
}

/// A component that handles terminal events.
pub trait EventHandler {
    /// The type of high-level event this component emits.
    type Event;

    /// Handle a low-level `InputEvent` and optionally return a high-level event.
    fn handle_event(&mut self, event: &super::event::InputEvent) -> Option<Self::Event>;
}

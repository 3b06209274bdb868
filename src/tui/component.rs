use ratatui::Frame;
use ratatui::layout::Rect;

use super::event::TuiEvent;

/// A piece of the screen that draws itself into a given area.
///
/// Props are struct fields set by the parent before each frame. `render`
/// takes `&mut self` so stateful components can cache layout (the list view
/// remembers its page height for PageUp/PageDown).
pub trait Component {
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// A component that consumes terminal events.
pub trait EventHandler {
    /// The high-level event this component emits to the event loop.
    type Event;

    /// Handle a `TuiEvent`, optionally returning a high-level event.
    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event>;
}

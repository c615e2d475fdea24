use std::time::Instant;

use crate::canvas::Surface;

/// Input and queries a host delivers to a sample view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Asks for the view's display name.
    Title,
    /// A typed character.
    Char(char),
}

/// A view's answer to an [`Event`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reply {
    Title(&'static str),
    Handled,
    /// Not consumed; the host may route it elsewhere.
    Unhandled,
}

/// A view that can be registered in a sample gallery.
///
/// Hosts deliver events and draw requests serially on one thread. After each
/// call they check [`take_invalidation`](SampleView::take_invalidation) to
/// decide whether another frame is needed.
pub trait SampleView {
    fn on_event(&mut self, event: Event) -> Reply {
        self.default_event(event)
    }

    /// Fallback for events a view does not recognise.
    fn default_event(&mut self, _event: Event) -> Reply {
        Reply::Unhandled
    }

    /// Draws one frame. `now` is the time the frame is drawn for.
    fn draw_content(&mut self, surface: &mut dyn Surface, now: Instant);

    /// Returns whether the view asked to be redrawn since the last call, and
    /// clears the request.
    fn take_invalidation(&mut self) -> bool;

    fn title(&mut self) -> Option<&'static str> {
        match self.on_event(Event::Title) {
            Reply::Title(title) => Some(title),
            _ => None,
        }
    }
}

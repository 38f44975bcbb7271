use crate::key::{self, Binding};
use crossterm::event::KeyCode;

/// Key bindings understood by the carousel.
///
/// Mouse wheel input is handled separately and is not configurable.
#[derive(Debug, Clone)]
pub struct CarouselKeyMap {
    /// Step forward one item.
    pub next: Binding,
    /// Step back one item.
    pub prev: Binding,
    /// Cancel the transition in flight.
    pub interrupt: Binding,
}

impl Default for CarouselKeyMap {
    fn default() -> Self {
        Self {
            next: Binding::new(vec![KeyCode::Down, KeyCode::Char('j')]).with_help("↓/j", "next"),
            prev: Binding::new(vec![KeyCode::Up, KeyCode::Char('k')]).with_help("↑/k", "prev"),
            interrupt: Binding::new(vec![KeyCode::Esc]).with_help("esc", "stop"),
        }
    }
}

impl key::KeyMap for CarouselKeyMap {
    fn short_help(&self) -> Vec<&Binding> {
        vec![&self.next, &self.prev]
    }

    fn full_help(&self) -> Vec<Vec<&Binding>> {
        vec![vec![&self.next, &self.prev], vec![&self.interrupt]]
    }
}

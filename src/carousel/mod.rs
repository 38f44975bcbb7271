//! Infinite circular carousel for bubbletea-rs.
//!
//! The carousel shows one item per viewport height and scrolls between items
//! with an eased animation. To make the list appear endless it renders a
//! padded display sequence: the last item is prepended and the first item is
//! appended. Stepping past either end animates onto that duplicate and then
//! jumps, without animation, to the real item on the opposite side.
//!
//! # Basic Usage
//!
//! ```rust
//! use complex_journal::carousel::{Item, Model, Options};
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct Card(u32);
//!
//! impl Item for Card {
//!     fn key(&self) -> String {
//!         self.0.to_string()
//!     }
//! }
//!
//! let carousel = Model::new(Options::default())
//!     .with_viewport(10)
//!     .with_items(vec![Card(1), Card(2), Card(3)]);
//!
//! assert_eq!(carousel.display_items().len(), 5);
//! assert_eq!(carousel.index(), 0);
//! assert_eq!(carousel.offset(), 10.0);
//! ```
//!
//! # bubbletea-rs Integration
//!
//! Forward messages to [`Model::update`]; it consumes its own [`FrameMsg`]s,
//! arrow/vim keys and mouse-wheel events. Completed transitions announce
//! themselves with a [`SettledMsg`], cancelled ones with an [`InterruptedMsg`].
//!
//! ```rust
//! use bubbletea_rs::{Cmd, Model as BubbleTeaModel, Msg};
//! use complex_journal::carousel::{Item, Model, Options};
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct Line(String);
//!
//! impl Item for Line {
//!     fn key(&self) -> String {
//!         self.0.clone()
//!     }
//! }
//!
//! struct App {
//!     carousel: Model<Line>,
//! }
//!
//! impl BubbleTeaModel for App {
//!     fn init() -> (Self, Option<Cmd>) {
//!         let carousel = Model::new(Options::default())
//!             .with_viewport(20)
//!             .with_items(vec![Line("one".into()), Line("two".into())]);
//!         (Self { carousel }, None)
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         self.carousel.update(msg)
//!     }
//!
//!     fn view(&self) -> String {
//!         self.carousel.view_with(
//!             &|line: &Line, _w: usize, _h: usize, _current: bool| vec![line.0.clone()],
//!             40,
//!         )
//!     }
//! }
//! ```

mod keys;
mod model;
mod sequence;
mod tween;


pub use keys::CarouselKeyMap;
pub use model::{
    measure, Delegate, FrameMsg, InterruptedMsg, Model, Options, SettledMsg, Viewport,
};
pub use sequence::{display_sequence, real_index, Direction, FIRST_REAL_SLOT};
pub use tween::Ease;

/// A record the carousel can display.
///
/// The carousel never looks inside an item; it only needs a stable key for
/// rendering and equality to notice when the caller's sequence has changed.
pub trait Item: Clone + PartialEq {
    /// Stable unique key of the record.
    fn key(&self) -> String;
}

/// Creates a carousel with the given options.
pub fn new<I: Item>(options: Options) -> Model<I> {
    Model::new(options)
}

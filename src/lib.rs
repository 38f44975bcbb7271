#![warn(missing_docs)]

//! # complex-journal
//!
//! A terminal client for a personal journal of *complexes*: recurring
//! insecurities, each with the goals derived from it. Records are browsed in
//! an infinite vertical carousel built on [bubbletea-rs](https://github.com/joshka/bubbletea-rs).
//!
//! ## Overview
//!
//! The crate is split into a reusable widget layer and the journal itself:
//!
//! - **Widgets**: [`carousel`] (circular scroll controller), [`field`]
//!   (single-line text input), [`help`] and [`key`] (bindings and their help line)
//! - **Data**: [`complex`] (records), [`api`] (REST client), [`query`]
//!   (client-side cache)
//! - **App**: [`pages`] (list, detail and create screens), [`app`] (root
//!   model and routing), [`i18n`] and [`config`]
//!
//! Every component follows the Elm Architecture: state is changed only in
//! `update()`, side effects are returned as commands, and `view()` renders a
//! string.
//!
//! ## Carousel
//!
//! ```rust
//! use complex_journal::carousel::{Direction, Item, Model, Options};
//! use std::time::Duration;
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct Card(&'static str);
//!
//! impl Item for Card {
//!     fn key(&self) -> String {
//!         self.0.to_string()
//!     }
//! }
//!
//! let options = Options {
//!     duration: Duration::ZERO,
//!     ..Options::default()
//! };
//! let mut carousel = Model::new(options)
//!     .with_viewport(10)
//!     .with_items(vec![Card("a"), Card("b"), Card("c")]);
//!
//! let _ = carousel.step(Direction::Backward);
//! assert_eq!(carousel.index(), 2);
//! assert_eq!(carousel.slot(), 3);
//! ```
//!
//! ## Key Bindings
//!
//! ```rust
//! use complex_journal::key::{Binding, KeyMap};
//! use crossterm::event::{KeyCode, KeyModifiers};
//!
//! struct Keys {
//!     open: Binding,
//!     save: Binding,
//! }
//!
//! impl KeyMap for Keys {
//!     fn short_help(&self) -> Vec<&Binding> {
//!         vec![&self.open, &self.save]
//!     }
//! }
//!
//! let keys = Keys {
//!     open: Binding::new(vec![KeyCode::Enter]).with_help("enter", "open"),
//!     save: Binding::new(vec![(KeyCode::Char('s'), KeyModifiers::CONTROL)])
//!         .with_help("ctrl+s", "save"),
//! };
//! assert_eq!(keys.short_help().len(), 2);
//! ```

pub mod api;
pub mod app;
pub mod carousel;
pub mod complex;
pub mod config;
pub mod error;
pub mod field;
pub mod help;
pub mod i18n;
pub mod key;
pub mod pages;
pub mod query;

use bubbletea_rs::Cmd;

/// Components that can take keyboard focus.
///
/// A focused component consumes editing keys; a blurred one ignores them and
/// renders without a cursor.
///
/// ```rust
/// use complex_journal::prelude::*;
///
/// let mut content = TextField::new();
/// assert!(!content.focused());
///
/// let _ = content.focus();
/// assert!(content.focused());
///
/// content.blur();
/// assert!(!content.focused());
/// ```
pub trait Component {
    /// Gives the component focus. May return a command to run.
    fn focus(&mut self) -> Option<Cmd>;

    /// Removes focus.
    fn blur(&mut self);

    /// Whether the component has focus.
    fn focused(&self) -> bool;
}

pub use api::Client;
pub use app::{App, Context};
pub use carousel::Model as Carousel;
pub use complex::{ActionInput, Complex, ComplexInput, Goal};
pub use config::{Cli, Config};
pub use error::{Error, Result};
pub use field::Model as TextField;
pub use help::Model as HelpModel;
pub use i18n::{Locale, Translator};
pub use key::{Binding, Help as KeyHelp, KeyMap, KeyPress};
pub use pages::{ComplexDetailPage, ComplexFormPage, ComplexesPage, NavigateMsg, Route};
pub use query::{Query, Status as QueryStatus};

/// Prelude module for convenient imports.
///
/// ```rust
/// use complex_journal::prelude::*;
///
/// let t = Translator::new(Locale::En);
/// assert_eq!(t.t("loading"), "Loading...");
/// ```
pub mod prelude {
    pub use crate::carousel::{
        CarouselKeyMap, Delegate as CarouselDelegate, Direction, Item, Options as CarouselOptions,
        SettledMsg,
    };
    pub use crate::{
        Binding, Carousel, Complex, ComplexInput, Component, Error, HelpModel, KeyMap, Locale,
        Result, TextField, Translator,
    };
}

//! Type-safe key bindings shared by the carousel and the pages.
//!
//! A [`Binding`] groups one or more key presses under a single action and
//! carries the text shown in the help line. Components expose their bindings
//! through the [`KeyMap`] trait so [`crate::help`] can render them.
//!
//! ```rust
//! use complex_journal::key::Binding;
//! use crossterm::event::{KeyCode, KeyModifiers};
//!
//! let next = Binding::new(vec![KeyCode::Down, KeyCode::Char('j')]).with_help("↓/j", "next");
//! let quit = Binding::new(vec![(KeyCode::Char('c'), KeyModifiers::CONTROL)]).with_help("ctrl+c", "quit");
//! assert_eq!(next.help().key, "↓/j");
//! assert!(quit.enabled());
//! ```

use bubbletea_rs::KeyMsg;
use crossterm::event::{KeyCode, KeyModifiers};

/// A single key press: code plus the modifiers that must be held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    /// Key code.
    pub code: KeyCode,
    /// Required modifiers. `NONE` also accepts a held shift for characters.
    pub modifiers: KeyModifiers,
}

impl From<KeyCode> for KeyPress {
    fn from(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }
}

impl From<(KeyCode, KeyModifiers)> for KeyPress {
    fn from((code, modifiers): (KeyCode, KeyModifiers)) -> Self {
        Self { code, modifiers }
    }
}

/// Help text attached to a binding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Help {
    /// Short key label, e.g. `"↓/j"`.
    pub key: String,
    /// What the binding does.
    pub desc: String,
}

/// One action bound to one or more key presses.
#[derive(Debug, Clone)]
pub struct Binding {
    keys: Vec<KeyPress>,
    help: Help,
    disabled: bool,
}

impl Binding {
    /// Creates a binding from anything convertible to key presses.
    pub fn new<K: Into<KeyPress>>(keys: Vec<K>) -> Self {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
            help: Help::default(),
            disabled: false,
        }
    }

    /// Sets the help text shown for this binding.
    pub fn with_help(mut self, key: impl Into<String>, desc: impl Into<String>) -> Self {
        self.help = Help {
            key: key.into(),
            desc: desc.into(),
        };
        self
    }

    /// Replaces only the description, keeping the key label.
    pub fn set_desc(&mut self, desc: impl Into<String>) {
        self.help.desc = desc.into();
    }

    /// Key presses that trigger this binding.
    pub fn keys(&self) -> &[KeyPress] {
        &self.keys
    }

    /// Help text for this binding.
    pub fn help(&self) -> &Help {
        &self.help
    }

    /// Enables or disables the binding. Disabled bindings never match and
    /// are hidden from help.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.disabled = !enabled;
    }

    /// Whether the binding is active.
    pub fn enabled(&self) -> bool {
        !self.disabled && !self.keys.is_empty()
    }

    /// Reports whether `msg` triggers this binding.
    pub fn matches(&self, msg: &KeyMsg) -> bool {
        if !self.enabled() {
            return false;
        }
        self.keys.iter().any(|press| {
            if press.code != msg.key {
                return false;
            }
            // Terminals report shift alongside upper-case characters.
            let held = msg.modifiers - KeyModifiers::SHIFT;
            let wanted = press.modifiers - KeyModifiers::SHIFT;
            held == wanted
                && (press.modifiers.contains(KeyModifiers::SHIFT)
                    == msg.modifiers.contains(KeyModifiers::SHIFT)
                    || matches!(press.code, KeyCode::Char(_)))
        })
    }
}

/// Components that publish their bindings for the help line.
pub trait KeyMap {
    /// Bindings for the compact, single-line help.
    fn short_help(&self) -> Vec<&Binding>;

    /// All bindings, grouped into columns.
    fn full_help(&self) -> Vec<Vec<&Binding>> {
        vec![self.short_help()]
    }
}

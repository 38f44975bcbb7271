//! Single-line help generated from a component's key bindings.
//!
//! Every page ends with a help line such as `↓/j next • ↑/k prev • q quit`.
//! The line is built from [`KeyMap::short_help`] and truncated with an
//! ellipsis when the terminal is too narrow.

use crate::key::{Binding, KeyMap};
use lipgloss_extras::prelude::*;
use unicode_width::UnicodeWidthStr;

/// Styles applied to the pieces of the help line.
#[derive(Debug, Clone)]
pub struct Styles {
    /// Style of the truncation marker.
    pub ellipsis: Style,
    /// Style of the key label.
    pub key: Style,
    /// Style of the description.
    pub desc: Style,
    /// Style of the separator between bindings.
    pub separator: Style,
}

impl Default for Styles {
    fn default() -> Self {
        use lipgloss::AdaptiveColor;

        let key_style = Style::new().foreground(AdaptiveColor {
            Light: "#909090",
            Dark: "#626262",
        });
        let desc_style = Style::new().foreground(AdaptiveColor {
            Light: "#B2B2B2",
            Dark: "#4A4A4A",
        });
        let sep_style = Style::new().foreground(AdaptiveColor {
            Light: "#DDDADA",
            Dark: "#3C3C3C",
        });

        Self {
            ellipsis: sep_style.clone(),
            key: key_style,
            desc: desc_style,
            separator: sep_style,
        }
    }
}

/// Help line renderer.
#[derive(Debug, Clone)]
pub struct Model {
    /// Maximum width in columns; 0 means unlimited.
    pub width: usize,
    /// Text placed between bindings.
    pub separator: String,
    /// Marker appended when bindings were dropped for width.
    pub ellipsis: String,
    /// Styling.
    pub styles: Styles,
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

impl Model {
    /// Creates a help renderer with the default separator and styles.
    pub fn new() -> Self {
        Self {
            width: 0,
            separator: " • ".to_string(),
            ellipsis: "…".to_string(),
            styles: Styles::default(),
        }
    }

    /// Builder-style width setter.
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Renders the compact help for `keymap`.
    pub fn view<K: KeyMap>(&self, keymap: &K) -> String {
        self.short_help_view(keymap.short_help())
    }

    /// Renders the given bindings on one line, skipping disabled ones.
    pub fn short_help_view(&self, bindings: Vec<&Binding>) -> String {
        let mut out = String::new();
        let mut total_width = 0;

        for kb in bindings.into_iter().filter(|b| b.enabled()) {
            let help = kb.help();
            let sep = if total_width > 0 { self.separator.as_str() } else { "" };
            let plain_width = sep.width() + help.key.width() + 1 + help.desc.width();

            if self.width > 0 && total_width + plain_width > self.width {
                let tail = format!(" {}", self.ellipsis);
                if total_width + tail.width() <= self.width {
                    out.push_str(&self.styles.ellipsis.clone().inline(true).render(&tail));
                }
                break;
            }

            if !sep.is_empty() {
                out.push_str(&self.styles.separator.clone().inline(true).render(sep));
            }
            out.push_str(&self.styles.key.clone().inline(true).render(&help.key));
            out.push(' ');
            out.push_str(&self.styles.desc.clone().inline(true).render(&help.desc));
            total_width += plain_width;
        }

        out
    }
}

//! Single-line text field used by the create form.
//!
//! The value is stored as a vector of chars with a cursor position, so
//! editing never splits a multi-byte character. The view scrolls horizontally
//! to keep the cursor visible within `width` columns.

use crate::Component;
use bubbletea_rs::{Cmd, KeyMsg, Msg};
use crossterm::event::{KeyCode, KeyModifiers};
use lipgloss_extras::prelude::*;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthChar;

/// Editable text field.
#[derive(Debug, Clone)]
pub struct Model {
    value: Vec<char>,
    pos: usize,
    focus: bool,
    /// Label rendered before the value.
    pub prompt: String,
    /// Text shown while the value is empty.
    pub placeholder: String,
    /// Maximum number of characters; 0 means unlimited.
    pub char_limit: usize,
    /// Visible columns for the value; 0 means unlimited.
    pub width: usize,
    /// Style of the prompt.
    pub prompt_style: Style,
    /// Style of the placeholder.
    pub placeholder_style: Style,
    /// Style of the character under the cursor.
    pub cursor_style: Style,
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

impl Model {
    /// Creates an empty, blurred field.
    pub fn new() -> Self {
        Self {
            value: Vec::new(),
            pos: 0,
            focus: false,
            prompt: "> ".to_string(),
            placeholder: String::new(),
            char_limit: 0,
            width: 0,
            prompt_style: Style::new(),
            placeholder_style: Style::new().foreground(Color::from("240")),
            cursor_style: Style::new().reverse(true),
        }
    }

    /// Builder-style prompt setter.
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Builder-style placeholder setter.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Builder-style character limit.
    pub fn with_char_limit(mut self, limit: usize) -> Self {
        self.char_limit = limit;
        self
    }

    /// Current value.
    pub fn value(&self) -> String {
        self.value.iter().collect()
    }

    /// Replaces the value and moves the cursor to its end.
    pub fn set_value(&mut self, value: &str) {
        self.value = value.chars().collect();
        if self.char_limit > 0 {
            self.value.truncate(self.char_limit);
        }
        self.pos = self.value.len();
    }

    /// Clears the value.
    pub fn reset(&mut self) {
        self.value.clear();
        self.pos = 0;
    }

    /// Cursor position in chars.
    pub fn position(&self) -> usize {
        self.pos
    }

    fn insert(&mut self, ch: char) {
        if self.char_limit > 0 && self.value.len() >= self.char_limit {
            return;
        }
        self.value.insert(self.pos, ch);
        self.pos += 1;
    }

    fn delete_before_cursor(&mut self) {
        self.value.drain(..self.pos);
        self.pos = 0;
    }

    fn delete_after_cursor(&mut self) {
        self.value.truncate(self.pos);
    }

    fn backspace(&mut self) {
        if self.pos > 0 {
            self.pos -= 1;
            self.value.remove(self.pos);
        }
    }

    fn delete(&mut self) {
        if self.pos < self.value.len() {
            self.value.remove(self.pos);
        }
    }

    /// Handles editing keys while focused.
    pub fn update(&mut self, msg: &Msg) -> Option<Cmd> {
        if !self.focus {
            return None;
        }
        let key_msg = msg.downcast_ref::<KeyMsg>()?;
        let ctrl = key_msg.modifiers.contains(KeyModifiers::CONTROL);

        match key_msg.key {
            KeyCode::Char('u') if ctrl => self.delete_before_cursor(),
            KeyCode::Char('k') if ctrl => self.delete_after_cursor(),
            KeyCode::Char('a') if ctrl => self.pos = 0,
            KeyCode::Char('e') if ctrl => self.pos = self.value.len(),
            KeyCode::Char(ch) if !ctrl => self.insert(ch),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => self.pos = self.pos.saturating_sub(1),
            KeyCode::Right => self.pos = (self.pos + 1).min(self.value.len()),
            KeyCode::Home => self.pos = 0,
            KeyCode::End => self.pos = self.value.len(),
            _ => {}
        }
        None
    }

    /// Renders prompt, value and cursor.
    pub fn view(&self) -> String {
        let prompt = self.prompt_style.render(&self.prompt);

        if self.value.is_empty() && !self.placeholder.is_empty() {
            let placeholder = truncate(&self.placeholder, self.width);
            return format!("{}{}", prompt, self.placeholder_style.render(&placeholder));
        }

        let (start, end) = self.visible_range();
        let mut out = String::new();
        for (i, ch) in self.value[start..end].iter().enumerate() {
            if self.focus && start + i == self.pos {
                out.push_str(&self.cursor_style.render(&ch.to_string()));
            } else {
                out.push(*ch);
            }
        }
        if self.focus && self.pos == end {
            out.push_str(&self.cursor_style.render(" "));
        }
        format!("{}{}", prompt, out)
    }

    // Char range that fits in `width` columns while containing the cursor.
    fn visible_range(&self) -> (usize, usize) {
        if self.width == 0 {
            return (0, self.value.len());
        }
        let col = |c: &char| c.width().unwrap_or(0);

        // The cursor cell is the char under it, or a blank past the end.
        let mut used = self.value.get(self.pos).map_or(1, |c| col(c).max(1));
        let mut start = self.pos;
        while start > 0 && used + col(&self.value[start - 1]) <= self.width {
            start -= 1;
            used += col(&self.value[start]);
        }
        let mut end = (self.pos + 1).min(self.value.len());
        while end < self.value.len() && used + col(&self.value[end]) <= self.width {
            used += col(&self.value[end]);
            end += 1;
        }
        (start, end)
    }
}

impl Component for Model {
    fn focus(&mut self) -> Option<Cmd> {
        self.focus = true;
        None
    }

    fn blur(&mut self) {
        self.focus = false;
    }

    fn focused(&self) -> bool {
        self.focus
    }
}

/// Cuts `s` to `width` columns on grapheme boundaries; 0 means no limit.
pub fn truncate(s: &str, width: usize) -> String {
    if width == 0 {
        return s.to_string();
    }
    let mut used = 0;
    let mut out = String::new();
    for grapheme in s.graphemes(true) {
        let w: usize = grapheme.chars().map(|c| c.width().unwrap_or(0)).sum();
        if used + w > width {
            break;
        }
        used += w;
        out.push_str(grapheme);
    }
    out
}

use super::{
    error_style, muted_style, navigate, navigate_refreshed, title_style, ComplexCreatedMsg, Route,
};
use crate::api::Client;
use crate::complex::ComplexInput;
use crate::field;
use crate::help;
use crate::i18n::Translator;
use crate::key::{Binding, KeyMap, KeyPress};
use crate::Component;
use bubbletea_rs::{Cmd, KeyMsg, Msg};
use crossterm::event::{KeyCode, KeyModifiers};
use std::sync::Arc;

const CONTENT_LIMIT: usize = 500;
const CATEGORY_LIMIT: usize = 50;

/// Key bindings of the create form.
#[derive(Debug, Clone)]
pub struct FormKeyMap {
    /// Focus the next field.
    pub next_field: Binding,
    /// Focus the previous field.
    pub prev_field: Binding,
    /// Validate and create.
    pub submit: Binding,
    /// Leave without saving.
    pub cancel: Binding,
}

impl FormKeyMap {
    /// Bindings with descriptions in the translator's language.
    pub fn new(t: &Translator) -> Self {
        Self {
            next_field: Binding::new(vec![KeyCode::Tab]).with_help("tab", t.t("nextField")),
            prev_field: Binding::new(vec![
                KeyPress::from(KeyCode::BackTab),
                KeyPress::from((KeyCode::BackTab, KeyModifiers::SHIFT)),
            ])
            .with_help("shift+tab", t.t("back")),
            submit: Binding::new(vec![KeyCode::Enter]).with_help("enter", t.t("submit")),
            cancel: Binding::new(vec![KeyCode::Esc]).with_help("esc", t.t("cancel")),
        }
    }
}

impl KeyMap for FormKeyMap {
    fn short_help(&self) -> Vec<&Binding> {
        vec![&self.next_field, &self.submit, &self.cancel]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Content,
    Category,
}

/// Form creating a complex.
#[derive(Debug)]
pub struct ComplexFormPage {
    content: field::Model,
    category: field::Model,
    focus: Focus,
    saving: bool,
    error: Option<String>,
    client: Arc<Client>,
    t: Translator,
    /// Page bindings.
    pub keymap: FormKeyMap,
    help: help::Model,
}

impl ComplexFormPage {
    /// Creates an empty form with the content field focused.
    pub fn new(client: Arc<Client>, t: Translator) -> Self {
        let mut content = field::Model::new()
            .with_prompt(format!("{}: ", t.t("content")))
            .with_char_limit(CONTENT_LIMIT);
        let category = field::Model::new()
            .with_prompt(format!("{}: ", t.t("category")))
            .with_char_limit(CATEGORY_LIMIT);
        let _ = content.focus();

        Self {
            content,
            category,
            focus: Focus::Content,
            saving: false,
            error: None,
            client,
            t,
            keymap: FormKeyMap::new(&t),
            help: help::Model::new(),
        }
    }

    /// Content field.
    pub fn content(&self) -> &field::Model {
        &self.content
    }

    /// Category field.
    pub fn category(&self) -> &field::Model {
        &self.category
    }

    /// Inline error of the last submit, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether a create request is in flight.
    pub fn is_saving(&self) -> bool {
        self.saving
    }

    /// Sizes the fields to the terminal.
    pub fn set_size(&mut self, width: usize, _height: usize) {
        self.help.width = width;
        self.content.width = width.saturating_sub(self.content.prompt.chars().count() + 1);
        self.category.width = width.saturating_sub(self.category.prompt.chars().count() + 1);
    }

    /// Handles the create result, form keys and field editing.
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        let msg = match msg.downcast::<ComplexCreatedMsg>() {
            Ok(created) => return self.on_created(*created),
            Err(other) => other,
        };

        let key_msg = msg.downcast_ref::<KeyMsg>()?;
        if self.saving {
            return None;
        }
        if self.keymap.cancel.matches(key_msg) {
            return Some(navigate(Route::List));
        }
        if self.keymap.submit.matches(key_msg) {
            return self.submit();
        }
        if self.keymap.next_field.matches(key_msg) || self.keymap.prev_field.matches(key_msg) {
            self.toggle_focus();
            return None;
        }

        match self.focus {
            Focus::Content => self.content.update(&msg),
            Focus::Category => self.category.update(&msg),
        }
    }

    // Two fields, so forward and backward focus moves coincide.
    fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Content => {
                self.content.blur();
                let _ = self.category.focus();
                Focus::Category
            }
            Focus::Category => {
                self.category.blur();
                let _ = self.content.focus();
                Focus::Content
            }
        };
    }

    fn submit(&mut self) -> Option<Cmd> {
        let content = self.content.value();
        let category = self.category.value();

        if content.trim().is_empty() {
            self.error = Some(self.t.t("contentRequired").to_string());
            return None;
        }
        if category.trim().is_empty() {
            self.error = Some(self.t.t("categoryRequired").to_string());
            return None;
        }
        let input = match ComplexInput::new(&content, &category) {
            Ok(input) => input,
            Err(err) => {
                self.error = Some(err.to_string());
                return None;
            }
        };

        self.error = None;
        self.saving = true;
        let client = Arc::clone(&self.client);
        tracing::info!(category = %input.category, "creating complex");
        Some(Box::pin(async move {
            let result = client.create_complex(&input).await;
            Some(Box::new(ComplexCreatedMsg(result)) as Msg)
        }))
    }

    fn on_created(&mut self, created: ComplexCreatedMsg) -> Option<Cmd> {
        self.saving = false;
        match created.0 {
            Ok(complex) => {
                tracing::debug!(id = complex.id, "complex created");
                Some(navigate_refreshed(Route::List))
            }
            Err(err) => {
                self.error = Some(format!("{}{}", self.t.t("errorPrefix"), err));
                None
            }
        }
    }

    /// Renders both fields, the inline error and help.
    pub fn view(&self) -> String {
        let mut out = vec![
            title_style().render(self.t.t("newComplexTitle")),
            String::new(),
            self.content.view(),
            self.category.view(),
            String::new(),
        ];
        if self.saving {
            out.push(muted_style().render(self.t.t("saving")));
        } else if let Some(message) = &self.error {
            out.push(error_style().render(message));
        }
        out.push(self.help.view(&self.keymap));
        out.join("\n")
    }
}

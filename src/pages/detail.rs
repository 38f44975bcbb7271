use super::{
    error_style, muted_style, navigate, navigate_refreshed, title_style, wrap, ComplexDeletedMsg,
    ComplexLoadedMsg, Route,
};
use crate::api::Client;
use crate::complex::Complex;
use crate::error::Error;
use crate::help;
use crate::i18n::Translator;
use crate::key::{Binding, KeyMap};
use bubbletea_rs::{Cmd, KeyMsg, Msg};
use chrono::{DateTime, Utc};
use crossterm::event::KeyCode;
use std::sync::Arc;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Key bindings of the detail page.
#[derive(Debug, Clone)]
pub struct DetailKeyMap {
    /// Return to the list.
    pub back: Binding,
    /// Ask to delete the complex.
    pub delete: Binding,
    /// Confirm the pending delete.
    pub confirm: Binding,
    /// Dismiss the pending delete.
    pub cancel: Binding,
}

impl DetailKeyMap {
    /// Bindings with descriptions in the translator's language.
    pub fn new(t: &Translator) -> Self {
        Self {
            back: Binding::new(vec![KeyCode::Esc, KeyCode::Char('b')]).with_help("esc", t.t("back")),
            delete: Binding::new(vec![KeyCode::Char('d')]).with_help("d", t.t("delete")),
            confirm: Binding::new(vec![KeyCode::Char('y')]).with_help("y", t.t("delete")),
            cancel: Binding::new(vec![KeyCode::Char('n'), KeyCode::Esc]).with_help("n", t.t("cancel")),
        }
    }
}

impl KeyMap for DetailKeyMap {
    fn short_help(&self) -> Vec<&Binding> {
        vec![&self.delete, &self.back]
    }
}

#[derive(Debug)]
enum State {
    Loading,
    Loaded(Complex),
    Failed(String),
}

/// One complex with its goals, and its deletion.
#[derive(Debug)]
pub struct ComplexDetailPage {
    id: i64,
    state: State,
    confirming: bool,
    deleting: bool,
    delete_error: Option<String>,
    client: Arc<Client>,
    t: Translator,
    /// Page bindings.
    pub keymap: DetailKeyMap,
    help: help::Model,
    width: usize,
}

impl ComplexDetailPage {
    /// Creates the page for complex `id`; [`init`](Self::init) fetches it.
    pub fn new(id: i64, client: Arc<Client>, t: Translator) -> Self {
        Self {
            id,
            state: State::Loading,
            confirming: false,
            deleting: false,
            delete_error: None,
            client,
            t,
            keymap: DetailKeyMap::new(&t),
            help: help::Model::new(),
            width: 0,
        }
    }

    /// Fetches the complex.
    pub fn init(&mut self) -> Option<Cmd> {
        let id = self.id;
        let client = Arc::clone(&self.client);
        Some(Box::pin(async move {
            let result = client.fetch_complex(id).await;
            Some(Box::new(ComplexLoadedMsg { id, result }) as Msg)
        }))
    }

    /// Id shown by this page.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// The loaded complex, if any.
    pub fn complex(&self) -> Option<&Complex> {
        match &self.state {
            State::Loaded(complex) => Some(complex),
            _ => None,
        }
    }

    /// Whether the delete prompt is showing.
    pub fn is_confirming(&self) -> bool {
        self.confirming
    }

    /// Whether a delete request is in flight.
    pub fn is_deleting(&self) -> bool {
        self.deleting
    }

    /// Records the terminal width.
    pub fn set_size(&mut self, width: usize, _height: usize) {
        self.width = width;
        self.help.width = width;
    }

    /// Handles fetch and delete results and page keys.
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        let msg = match msg.downcast::<ComplexLoadedMsg>() {
            Ok(loaded) => {
                self.on_loaded(*loaded);
                return None;
            }
            Err(other) => other,
        };
        let msg = match msg.downcast::<ComplexDeletedMsg>() {
            Ok(deleted) => return self.on_deleted(*deleted),
            Err(other) => other,
        };

        let key_msg = msg.downcast_ref::<KeyMsg>()?;
        if self.confirming {
            if self.keymap.confirm.matches(key_msg) {
                self.confirming = false;
                return Some(self.delete());
            }
            if self.keymap.cancel.matches(key_msg) {
                self.confirming = false;
            }
            return None;
        }
        if self.deleting {
            return None;
        }
        if self.keymap.back.matches(key_msg) {
            return Some(navigate(Route::List));
        }
        if self.keymap.delete.matches(key_msg) && self.complex().is_some() {
            self.confirming = true;
            self.delete_error = None;
        }
        None
    }

    fn delete(&mut self) -> Cmd {
        self.deleting = true;
        let id = self.id;
        let client = Arc::clone(&self.client);
        tracing::info!(id, "deleting complex");
        Box::pin(async move {
            let result = client.delete_complex(id).await;
            Some(Box::new(ComplexDeletedMsg { id, result }) as Msg)
        })
    }

    fn on_loaded(&mut self, loaded: ComplexLoadedMsg) {
        if loaded.id != self.id {
            return;
        }
        self.state = match loaded.result {
            Ok(complex) => State::Loaded(complex),
            Err(Error::Status { status: 404, .. }) => {
                let id = self.id.to_string();
                State::Failed(self.t.t_with("notFound", &[("id", id.as_str())]))
            }
            Err(err) => State::Failed(format!("{}{}", self.t.t("errorPrefix"), err)),
        };
    }

    fn on_deleted(&mut self, deleted: ComplexDeletedMsg) -> Option<Cmd> {
        if deleted.id != self.id {
            return None;
        }
        self.deleting = false;
        match deleted.result {
            Ok(()) => Some(navigate_refreshed(Route::List)),
            Err(err) => {
                tracing::warn!(id = self.id, error = %err, "delete failed");
                self.delete_error = Some(format!("{}{}", self.t.t("errorPrefix"), err));
                None
            }
        }
    }

    /// Renders the record, its goals and any prompt.
    pub fn view(&self) -> String {
        let mut out = Vec::new();
        match &self.state {
            State::Loading => out.push(title_style().render(self.t.t("loading"))),
            State::Failed(message) => out.push(error_style().render(message)),
            State::Loaded(complex) => self.render_complex(complex, &mut out),
        }
        out.push(String::new());

        if self.confirming {
            let id = self.id.to_string();
            let prompt = self.t.t_with("deleteConfirmation", &[("id", id.as_str())]);
            out.push(error_style().render(&prompt));
        } else if self.deleting {
            out.push(muted_style().render(self.t.t("deleting")));
        } else if let Some(message) = &self.delete_error {
            out.push(error_style().render(message));
        }

        out.push(self.help.view(&self.keymap));
        out.join("\n")
    }

    fn render_complex(&self, complex: &Complex, out: &mut Vec<String>) {
        let t = &self.t;
        for line in wrap(&complex.content, self.width) {
            out.push(title_style().render(&line));
        }
        out.push(String::new());
        out.push(field(t.t("category"), &complex.category));
        out.push(field(t.t("createdAt"), &timestamp(&complex.created_at)));
        out.push(field(t.t("updatedAt"), &timestamp(&complex.updated_at)));
        out.push(String::new());

        out.push(title_style().render(t.t("goals")));
        if complex.goals.is_empty() {
            out.push(muted_style().render(t.t("noGoals")));
        }
        for goal in &complex.goals {
            out.push(format!("• {}", field(t.t("surfaceGoal"), &goal.surface_goal)));
            out.push(format!("  {}", field(t.t("underlyingGoal"), &goal.underlying_goal)));
        }
    }
}

fn field(label: &str, value: &str) -> String {
    format!("{} {}", muted_style().render(&format!("{label}:")), value)
}

fn timestamp(at: &DateTime<Utc>) -> String {
    at.format(TIME_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::super::testing::{client, complex, key, plain, run};
    use super::super::NavigateMsg;
    use super::*;
    use crate::complex::Goal;
    use crate::i18n::Locale;

    fn page() -> ComplexDetailPage {
        let mut page = ComplexDetailPage::new(4, client(), Translator::new(Locale::En));
        page.set_size(60, 20);
        page
    }

    fn loaded() -> ComplexDetailPage {
        let mut page = page();
        let _ = page.update(Box::new(ComplexLoadedMsg {
            id: 4,
            result: Ok(complex(4, "afraid of phone calls")),
        }));
        page
    }

    #[test]
    fn test_renders_record() {
        let view = plain(&loaded().view());
        assert!(view.contains("afraid of phone calls"));
        assert!(view.contains("Category: work"));
        assert!(view.contains("Created: 2024-05-01 09:30"));
        assert!(view.contains("No goals yet."));
    }

    #[test]
    fn test_renders_goals() {
        let mut record = complex(4, "afraid of phone calls");
        record.goals.push(Goal {
            id: 1,
            complex_id: 4,
            surface_goal: "call the dentist".to_string(),
            underlying_goal: "feel capable".to_string(),
            created_at: record.created_at,
            updated_at: record.updated_at,
        });
        let mut page = page();
        let _ = page.update(Box::new(ComplexLoadedMsg {
            id: 4,
            result: Ok(record),
        }));
        let view = plain(&page.view());
        assert!(view.contains("• Surface goal: call the dentist"));
        assert!(view.contains("Underlying goal: feel capable"));
    }

    #[test]
    fn test_other_id_ignored() {
        let mut page = page();
        let _ = page.update(Box::new(ComplexLoadedMsg {
            id: 5,
            result: Ok(complex(5, "other")),
        }));
        assert!(page.complex().is_none());
        assert!(plain(&page.view()).starts_with("Loading..."));
    }

    #[test]
    fn test_not_found() {
        let mut page = page();
        let _ = page.update(Box::new(ComplexLoadedMsg {
            id: 4,
            result: Err(Error::Status {
                status: 404,
                body: String::new(),
            }),
        }));
        assert!(plain(&page.view()).starts_with("Complex 4 not found."));
    }

    #[test]
    fn test_delete_prompt_cancel() {
        let mut page = loaded();
        assert!(page.update(key(KeyCode::Char('d'))).is_none());
        assert!(page.is_confirming());
        assert!(plain(&page.view()).contains("Delete complex 4? (y/n)"));

        assert!(page.update(key(KeyCode::Char('n'))).is_none());
        assert!(!page.is_confirming());
        assert!(!page.is_deleting());
    }

    #[test]
    fn test_escape_cancels_prompt_without_leaving() {
        let mut page = loaded();
        let _ = page.update(key(KeyCode::Char('d')));
        assert!(page.update(key(KeyCode::Esc)).is_none());
        assert!(!page.is_confirming());
    }

    #[test]
    fn test_delete_requires_loaded_record() {
        let mut page = page();
        let _ = page.update(key(KeyCode::Char('d')));
        assert!(!page.is_confirming());
    }

    #[test]
    fn test_confirm_starts_delete() {
        let mut page = loaded();
        let _ = page.update(key(KeyCode::Char('d')));
        assert!(page.update(key(KeyCode::Char('y'))).is_some());
        assert!(page.is_deleting());
        assert!(plain(&page.view()).contains("Deleting..."));
    }

    #[tokio::test]
    async fn test_deleted_navigates_back_with_refresh() {
        let mut page = loaded();
        let cmd = page
            .update(Box::new(ComplexDeletedMsg { id: 4, result: Ok(()) }))
            .unwrap();
        let msg = run(cmd).await;
        assert_eq!(
            msg.downcast_ref::<NavigateMsg>(),
            Some(&NavigateMsg {
                route: Route::List,
                refresh: true
            })
        );
    }

    #[test]
    fn test_delete_failure_shown_inline() {
        let mut page = loaded();
        let cmd = page.update(Box::new(ComplexDeletedMsg {
            id: 4,
            result: Err(Error::Status {
                status: 500,
                body: "boom".to_string(),
            }),
        }));
        assert!(cmd.is_none());
        assert!(plain(&page.view()).contains("Error: request failed with status 500: boom"));
    }

    #[tokio::test]
    async fn test_escape_goes_back() {
        let mut page = loaded();
        let msg = run(page.update(key(KeyCode::Esc)).unwrap()).await;
        assert_eq!(
            msg.downcast_ref::<NavigateMsg>().map(|m| m.route),
            Some(Route::List)
        );
    }
}

use super::{muted_style, navigate, title_style, wrap, ComplexesLoadedMsg, Route};
use crate::api::Client;
use crate::carousel::{self, Options};
use crate::complex::Complex;
use crate::help;
use crate::i18n::Translator;
use crate::key::{Binding, KeyMap};
use crate::query::{Query, Status};
use bubbletea_rs::{Cmd, KeyMsg, Msg};
use crossterm::event::KeyCode;
use lipgloss_extras::prelude::*;
use std::sync::Arc;
use std::time::{Duration, Instant};

// Title, blank line, footer and help line.
const CHROME_ROWS: usize = 4;

/// Key bindings of the complexes carousel page.
#[derive(Debug, Clone)]
pub struct ListKeyMap {
    /// Open the detail of the current complex.
    pub open: Binding,
    /// Open the create form.
    pub new: Binding,
    /// Refetch the list.
    pub refresh: Binding,
    /// Leave the app.
    pub quit: Binding,
}

impl ListKeyMap {
    /// Bindings with descriptions in the translator's language.
    pub fn new(t: &Translator) -> Self {
        Self {
            open: Binding::new(vec![KeyCode::Enter]).with_help("enter", t.t("open")),
            new: Binding::new(vec![KeyCode::Char('n')]).with_help("n", t.t("addNewComplex")),
            refresh: Binding::new(vec![KeyCode::Char('r')]).with_help("r", t.t("refresh")),
            quit: Binding::new(vec![KeyCode::Char('q')]).with_help("q", t.t("quit")),
        }
    }
}

impl KeyMap for ListKeyMap {
    fn short_help(&self) -> Vec<&Binding> {
        vec![&self.open, &self.new, &self.refresh, &self.quit]
    }
}

/// Carousel over every complex of the user.
#[derive(Debug)]
pub struct ComplexesPage {
    carousel: carousel::Model<Complex>,
    query: Query<Vec<Complex>>,
    client: Arc<Client>,
    t: Translator,
    /// Page bindings; carousel bindings live on the carousel.
    pub keymap: ListKeyMap,
    help: help::Model,
    width: usize,
}

impl ComplexesPage {
    /// Creates the page. Nothing is fetched until [`init`](Self::init).
    pub fn new(client: Arc<Client>, t: Translator, options: Options, stale_time: Duration) -> Self {
        let mut carousel = carousel::new(options);
        carousel.keymap.next.set_desc(t.t("next"));
        carousel.keymap.prev.set_desc(t.t("prev"));
        Self {
            carousel,
            query: Query::new("complexes", stale_time),
            client,
            t,
            keymap: ListKeyMap::new(&t),
            help: help::Model::new(),
            width: 0,
        }
    }

    /// Starts the first fetch.
    pub fn init(&mut self) -> Option<Cmd> {
        self.fetch_if_needed(Instant::now())
    }

    /// The carousel showing the complexes.
    pub fn carousel(&self) -> &carousel::Model<Complex> {
        &self.carousel
    }

    /// Cached list state.
    pub fn query(&self) -> &Query<Vec<Complex>> {
        &self.query
    }

    /// Fetches when the cache is empty, stale or invalidated.
    pub fn fetch_if_needed(&mut self, now: Instant) -> Option<Cmd> {
        if self.query.needs_fetch(now) {
            Some(self.refetch())
        } else {
            None
        }
    }

    /// Marks the cached list stale.
    pub fn invalidate(&mut self) {
        self.query.invalidate();
    }

    /// Starts a fetch unconditionally.
    pub fn refetch(&mut self) -> Cmd {
        let generation = self.query.begin();
        let client = Arc::clone(&self.client);
        Box::pin(async move {
            let result = client.fetch_complexes().await;
            Some(Box::new(ComplexesLoadedMsg { generation, result }) as Msg)
        })
    }

    /// Adapts the carousel to a new terminal size.
    pub fn set_size(&mut self, width: usize, height: usize) -> Option<Cmd> {
        self.width = width;
        self.help.width = width;
        self.carousel.set_viewport(height.saturating_sub(CHROME_ROWS))
    }

    /// Handles fetch results, page keys and carousel input.
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        let msg = match msg.downcast::<ComplexesLoadedMsg>() {
            Ok(loaded) => return self.on_loaded(*loaded),
            Err(other) => other,
        };

        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            if let Some(cmd) = self.on_key(key_msg) {
                return Some(cmd);
            }
        }
        self.carousel.update(msg)
    }

    fn on_key(&mut self, key_msg: &KeyMsg) -> Option<Cmd> {
        if self.keymap.quit.matches(key_msg) {
            return Some(bubbletea_rs::quit());
        }
        if self.keymap.new.matches(key_msg) {
            return Some(navigate(Route::New));
        }
        if self.keymap.refresh.matches(key_msg) {
            if self.query.status() == &Status::Loading {
                return None;
            }
            return Some(self.refetch());
        }
        if self.keymap.open.matches(key_msg) {
            let id = self.carousel.current()?.id;
            return Some(navigate(Route::Detail(id)));
        }
        None
    }

    fn on_loaded(&mut self, loaded: ComplexesLoadedMsg) -> Option<Cmd> {
        if !self
            .query
            .resolve(loaded.generation, loaded.result, Instant::now())
        {
            return None;
        }
        let items = self.query.data().cloned().unwrap_or_default();
        tracing::debug!(count = items.len(), "complexes loaded");
        let reset = self.carousel.set_items(items);

        // Invalidated while this fetch was in flight.
        match (reset, self.fetch_if_needed(Instant::now())) {
            (Some(reset), Some(fetch)) => Some(bubbletea_rs::batch(vec![reset, fetch])),
            (reset, fetch) => reset.or(fetch),
        }
    }

    fn title(&self) -> String {
        if self.query.is_loading() {
            return self.t.t("loading").to_string();
        }
        if let Some(message) = self.query.error() {
            return format!("{}{}", self.t.t("errorPrefix"), message);
        }
        self.t.t("appTitle").to_string()
    }

    /// One-based position, e.g. `2 / 5`. Empty when there are no items.
    pub fn footer(&self) -> String {
        if self.carousel.is_empty() {
            return String::new();
        }
        format!("{} / {}", self.carousel.index() + 1, self.carousel.len())
    }

    /// Renders header, carousel, footer and help.
    pub fn view(&self) -> String {
        let header = format!(
            "{}  {}",
            title_style().render(&self.title()),
            muted_style().render(&format!("n {}", self.t.t("addNewComplex")))
        );

        let body = if self.carousel.is_empty() && !self.query.is_loading() && self.query.data().is_some() {
            muted_style().render(self.t.t("noComplexesFound"))
        } else {
            let t = self.t;
            let render = move |complex: &Complex, width: usize, height: usize, current: bool| {
                render_card(&t, complex, width, height, current)
            };
            self.carousel.view_with(&render, self.width)
        };

        let mut bindings = vec![&self.carousel.keymap.next, &self.carousel.keymap.prev];
        bindings.extend(self.keymap.short_help());

        format!(
            "{}\n\n{}\n{}\n{}",
            header,
            body,
            muted_style().render(&self.footer()),
            self.help.short_help_view(bindings)
        )
    }
}

fn render_card(t: &Translator, complex: &Complex, width: usize, height: usize, current: bool) -> Vec<String> {
    let mut lines = vec![muted_style().render(&format!("{}: {}", t.t("category"), complex.category))];
    lines.push(String::new());

    let content_style = if current { title_style() } else { Style::new() };
    let room = height.saturating_sub(lines.len());
    lines.extend(
        wrap(&complex.content, width)
            .into_iter()
            .take(room)
            .map(|line| content_style.render(&line)),
    );
    lines.truncate(height);
    lines
}

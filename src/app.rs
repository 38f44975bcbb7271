//! Root bubbletea model: owns the pages and routes between them.
//!
//! `bubbletea_rs::Model::init` takes no arguments, so the binary installs a
//! [`Context`] before starting the program and [`App::init`] picks it up.

use crate::api::Client;
use crate::carousel::FrameMsg;
use crate::config::Config;
use crate::error::Result;
use crate::i18n::{Locale, Translator};
use crate::key::Binding;
use crate::pages::{
    ComplexDetailPage, ComplexFormPage, ComplexesLoadedMsg, ComplexesPage, NavigateMsg,
    Route,
};
use bubbletea_rs::{Cmd, KeyMsg, Model, Msg, WindowSizeMsg};
use crossterm::event::{KeyCode, KeyModifiers};
use once_cell::sync::OnceCell;
use std::sync::Arc;
use std::time::Instant;

static CONTEXT: OnceCell<Context> = OnceCell::new();

/// Dependencies handed to the pages.
#[derive(Debug, Clone)]
pub struct Context {
    /// Effective configuration.
    pub config: Config,
    /// Shared API client.
    pub client: Arc<Client>,
    /// UI strings.
    pub translator: Translator,
}

impl Context {
    /// Builds the client and translator described by `config`.
    pub fn new(config: Config) -> Result<Self> {
        let client = Client::new(&config.api_url, &config.user_id)?;
        let translator = Translator::new(Locale::detect(config.locale.as_deref()));
        Ok(Self {
            config,
            client: Arc::new(client),
            translator,
        })
    }
}

impl Default for Context {
    fn default() -> Self {
        Self {
            config: Config::default(),
            client: Arc::new(Client::local()),
            translator: Translator::new(Locale::detect(None)),
        }
    }
}

/// Makes `context` available to [`App::init`]. Returns false when a context
/// was already installed.
pub fn install(context: Context) -> bool {
    CONTEXT.set(context).is_ok()
}

enum Active {
    List,
    Detail(ComplexDetailPage),
    New(ComplexFormPage),
}

/// The journal application.
pub struct App {
    context: Context,
    list: ComplexesPage,
    active: Active,
    quit: Binding,
    width: usize,
    height: usize,
}

impl App {
    /// Creates the app on the list page and starts the first fetch.
    pub fn new(context: Context) -> (Self, Option<Cmd>) {
        let mut list = ComplexesPage::new(
            Arc::clone(&context.client),
            context.translator,
            context.config.carousel_options(),
            context.config.stale_time(),
        );
        let cmd = list.init();
        let app = Self {
            context,
            list,
            active: Active::List,
            quit: Binding::new(vec![(KeyCode::Char('c'), KeyModifiers::CONTROL)])
                .with_help("ctrl+c", "quit"),
            width: 0,
            height: 0,
        };
        (app, cmd)
    }

    /// Screen currently shown.
    pub fn route(&self) -> Route {
        match &self.active {
            Active::List => Route::List,
            Active::Detail(page) => Route::Detail(page.id()),
            Active::New(_) => Route::New,
        }
    }

    /// The list page, which stays alive across routes.
    pub fn list(&self) -> &ComplexesPage {
        &self.list
    }

    fn navigate(&mut self, nav: NavigateMsg) -> Option<Cmd> {
        tracing::debug!(route = ?nav.route, refresh = nav.refresh, "navigate");
        if nav.refresh {
            self.list.invalidate();
        }

        let client = Arc::clone(&self.context.client);
        let t = self.context.translator;
        match nav.route {
            Route::List => {
                self.active = Active::List;
                self.list.fetch_if_needed(Instant::now())
            }
            Route::Detail(id) => {
                let mut page = ComplexDetailPage::new(id, client, t);
                page.set_size(self.width, self.height);
                let cmd = page.init();
                self.active = Active::Detail(page);
                cmd
            }
            Route::New => {
                let mut page = ComplexFormPage::new(client, t);
                page.set_size(self.width, self.height);
                self.active = Active::New(page);
                None
            }
        }
    }

    fn resize(&mut self, width: usize, height: usize) -> Option<Cmd> {
        self.width = width;
        self.height = height;
        match &mut self.active {
            Active::List => {}
            Active::Detail(page) => page.set_size(width, height),
            Active::New(page) => page.set_size(width, height),
        }
        self.list.set_size(width, height)
    }
}

impl Model for App {
    fn init() -> (Self, Option<Cmd>) {
        let context = match CONTEXT.get() {
            Some(context) => context.clone(),
            None => {
                tracing::warn!("no context installed, using defaults");
                Context::default()
            }
        };
        Self::new(context)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            if self.quit.matches(key_msg) {
                return Some(bubbletea_rs::quit());
            }
        }
        if let Some(size) = msg.downcast_ref::<WindowSizeMsg>() {
            return self.resize(size.width as usize, size.height as usize);
        }
        if let Some(nav) = msg.downcast_ref::<NavigateMsg>() {
            return self.navigate(*nav);
        }

        // The list keeps its cache and animation current off-screen too.
        if msg.is::<ComplexesLoadedMsg>() || msg.is::<FrameMsg>() {
            return self.list.update(msg);
        }

        match &mut self.active {
            Active::List => self.list.update(msg),
            Active::Detail(page) => page.update(msg),
            Active::New(page) => page.update(msg),
        }
    }

    fn view(&self) -> String {
        match &self.active {
            Active::List => self.list.view(),
            Active::Detail(page) => page.view(),
            Active::New(page) => page.view(),
        }
    }
}

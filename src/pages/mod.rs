//! Screens of the journal and the messages they exchange.
//!
//! Pages never switch screens themselves: they emit a [`NavigateMsg`] and the
//! [`App`](crate::app::App) swaps the active page. Remote calls run inside
//! commands and report back through the `*Msg` types below.

mod detail;
mod form;
mod list;

pub use detail::{ComplexDetailPage, DetailKeyMap};
pub use form::{ComplexFormPage, FormKeyMap};
pub use list::{ComplexesPage, ListKeyMap};

use crate::complex::Complex;
use crate::error::Error;
use bubbletea_rs::{Cmd, Msg};
use lipgloss_extras::prelude::*;
use lipgloss::AdaptiveColor;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Screen the app is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Carousel of all complexes.
    List,
    /// One complex with its goals.
    Detail(i64),
    /// Form creating a complex.
    New,
}

/// Requests a screen change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigateMsg {
    /// Screen to show.
    pub route: Route,
    /// The complexes list changed remotely and must be refetched.
    pub refresh: bool,
}

/// Result of fetching the complexes list.
#[derive(Debug)]
pub struct ComplexesLoadedMsg {
    /// Fetch generation this result belongs to.
    pub generation: u64,
    /// Fetched records or the failure.
    pub result: Result<Vec<Complex>, Error>,
}

/// Result of fetching a single complex.
#[derive(Debug)]
pub struct ComplexLoadedMsg {
    /// Requested id.
    pub id: i64,
    /// Fetched record or the failure.
    pub result: Result<Complex, Error>,
}

/// Result of creating a complex.
#[derive(Debug)]
pub struct ComplexCreatedMsg(pub Result<Complex, Error>);

/// Result of deleting a complex.
#[derive(Debug)]
pub struct ComplexDeletedMsg {
    /// Deleted id.
    pub id: i64,
    /// Empty on success.
    pub result: Result<(), Error>,
}

/// Wraps a ready message in a command.
pub(crate) fn send<M: Send + 'static>(msg: M) -> Cmd {
    Box::pin(async move { Some(Box::new(msg) as Msg) })
}

/// Command that asks the app to show `route`.
pub(crate) fn navigate(route: Route) -> Cmd {
    send(NavigateMsg {
        route,
        refresh: false,
    })
}

/// Like [`navigate`], also invalidating the cached complexes list.
pub(crate) fn navigate_refreshed(route: Route) -> Cmd {
    send(NavigateMsg {
        route,
        refresh: true,
    })
}

/// Breaks `text` into lines of at most `width` columns, preferring spaces
/// and falling back to grapheme boundaries for unspaced scripts.
pub(crate) fn wrap(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![text.to_string()];
    }
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut line = String::new();
        let mut used = 0;
        for word in paragraph.split_word_bounds() {
            let w = UnicodeWidthStr::width(word);
            if used + w <= width {
                line.push_str(word);
                used += w;
                continue;
            }
            if !line.trim_end().is_empty() {
                lines.push(line.trim_end().to_string());
            }
            line = String::new();
            used = 0;
            if word.trim().is_empty() {
                continue;
            }
            for grapheme in word.graphemes(true) {
                let gw = UnicodeWidthStr::width(grapheme);
                if used + gw > width && used > 0 {
                    lines.push(std::mem::take(&mut line));
                    used = 0;
                }
                line.push_str(grapheme);
                used += gw;
            }
        }
        lines.push(line.trim_end().to_string());
    }
    lines
}

pub(crate) fn title_style() -> Style {
    Style::new().inline(true).bold(true).foreground(AdaptiveColor {
        Light: "#5A56E0",
        Dark: "#7571F9",
    })
}

pub(crate) fn muted_style() -> Style {
    Style::new().inline(true).foreground(AdaptiveColor {
        Light: "#9B9B9B",
        Dark: "#5C5C5C",
    })
}

pub(crate) fn error_style() -> Style {
    Style::new().inline(true).foreground(AdaptiveColor {
        Light: "#D7263D",
        Dark: "#FF5F5F",
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_on_spaces() {
        assert_eq!(wrap("fear of public speaking", 10), vec!["fear of", "public", "speaking"]);
    }

    #[test]
    fn test_wrap_unspaced_text() {
        assert_eq!(wrap("人前で話すのが怖い", 6), vec!["人前で", "話すの", "が怖い"]);
    }

    #[test]
    fn test_wrap_keeps_paragraphs() {
        assert_eq!(wrap("a\nb", 10), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_navigate_command() {
        let msg = navigate(Route::New).await.unwrap();
        assert_eq!(
            msg.downcast_ref::<NavigateMsg>(),
            Some(&NavigateMsg {
                route: Route::New,
                refresh: false
            })
        );
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::api::Client;
    use bubbletea_rs::KeyMsg;
    use chrono::{TimeZone, Utc};
    use crossterm::event::{KeyCode, KeyModifiers};
    use std::sync::Arc;

    pub fn client() -> Arc<Client> {
        Arc::new(Client::new("http://127.0.0.1:9", "test-user").unwrap())
    }

    pub fn key(code: KeyCode) -> Msg {
        key_with(code, KeyModifiers::NONE)
    }

    pub fn key_with(code: KeyCode, modifiers: KeyModifiers) -> Msg {
        Box::new(KeyMsg {
            key: code,
            modifiers,
        })
    }

    pub fn complex(id: i64, content: &str) -> Complex {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap();
        Complex {
            id,
            user_id: "test-user".to_string(),
            content: content.to_string(),
            category: "work".to_string(),
            created_at: at,
            updated_at: at,
            goals: Vec::new(),
        }
    }

    pub fn plain(s: &str) -> String {
        String::from_utf8(strip_ansi_escapes::strip(s)).unwrap()
    }

    /// Runs `cmd` and returns its message.
    pub async fn run(cmd: Cmd) -> Msg {
        cmd.await.expect("command produced no message")
    }
}

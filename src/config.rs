//! Runtime configuration: defaults, an optional TOML file, then CLI flags
//! and environment variables, later layers winning.

use crate::carousel::Options;
use crate::error::Result;
use clap::Parser;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// API used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8080";

/// User id used until real authentication exists.
pub const DEFAULT_USER_ID: &str = "test-user-uuid-12345";

/// Command-line interface of the `complex-journal` binary.
#[derive(Debug, Clone, Parser)]
#[command(name = "complex-journal", version, about = "Browse and record complexes from the terminal")]
pub struct Cli {
    /// TOML configuration file.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Base URL of the complexes API.
    #[arg(long, env = "COMPLEX_API_URL")]
    pub api_url: Option<String>,

    /// User id sent with every request.
    #[arg(long, env = "COMPLEX_USER_ID")]
    pub user_id: Option<String>,

    /// UI language (en or ja).
    #[arg(long, env = "COMPLEX_LOCALE")]
    pub locale: Option<String>,

    /// Carousel transition length in milliseconds.
    #[arg(long)]
    pub duration_ms: Option<u64>,

    /// Stop at the first and last item instead of wrapping around.
    #[arg(long)]
    pub no_loop: bool,

    /// Log file; the terminal is owned by the UI.
    #[arg(long, default_value = "complex-journal.log")]
    pub log_file: PathBuf,
}

/// Settings shared by the app and its pages.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the complexes API.
    pub api_url: String,
    /// User id sent in the `X-User-ID` header.
    pub user_id: String,
    /// UI language; detected from the environment when unset.
    pub locale: Option<String>,
    /// Whether the carousel wraps around.
    pub loop_around: bool,
    /// Carousel transition length in milliseconds.
    pub duration_ms: u64,
    /// Seconds before the complexes list is refetched.
    pub stale_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            user_id: DEFAULT_USER_ID.to_string(),
            locale: None,
            loop_around: true,
            duration_ms: 700,
            stale_secs: 300,
        }
    }
}

impl Config {
    /// Parses a TOML document; missing keys keep their defaults.
    pub fn from_toml(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Reads and parses a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml(&source)
    }

    /// Builds the effective configuration for `cli`.
    pub fn load(cli: &Cli) -> Result<Self> {
        let base = match &cli.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        Ok(base.merge_cli(cli))
    }

    /// Applies flags and environment values on top of `self`.
    pub fn merge_cli(mut self, cli: &Cli) -> Self {
        if let Some(url) = &cli.api_url {
            self.api_url = url.clone();
        }
        if let Some(user) = &cli.user_id {
            self.user_id = user.clone();
        }
        if cli.locale.is_some() {
            self.locale = cli.locale.clone();
        }
        if let Some(ms) = cli.duration_ms {
            self.duration_ms = ms;
        }
        if cli.no_loop {
            self.loop_around = false;
        }
        self
    }

    /// Carousel options derived from this configuration.
    pub fn carousel_options(&self) -> Options {
        Options {
            loop_around: self.loop_around,
            duration: Duration::from_millis(self.duration_ms),
            ..Options::default()
        }
    }

    /// How long fetched data stays fresh.
    pub fn stale_time(&self) -> Duration {
        Duration::from_secs(self.stale_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["complex-journal"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml("api_url = \"http://api.test\"\nduration_ms = 250\n").unwrap();
        assert_eq!(config.api_url, "http://api.test");
        assert_eq!(config.duration_ms, 250);
        assert_eq!(config.user_id, Config::default().user_id);
        assert!(config.loop_around);
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = Config::from_toml("duration_ms = \"soon\"").unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));
    }

    #[test]
    fn test_cli_overrides_file_values() {
        let file = Config::from_toml("user_id = \"from-file\"\nloop_around = true").unwrap();
        let merged = file.merge_cli(&cli(&["--user-id", "from-cli", "--no-loop", "--duration-ms", "0"]));
        assert_eq!(merged.user_id, "from-cli");
        assert!(!merged.loop_around);
        assert_eq!(merged.duration_ms, 0);
    }

    #[test]
    fn test_carousel_options() {
        let config = Config {
            loop_around: false,
            duration_ms: 120,
            ..Config::default()
        };
        let options = config.carousel_options();
        assert!(!options.loop_around);
        assert_eq!(options.duration, Duration::from_millis(120));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Config::from_file(Path::new("/nonexistent/complex-journal.toml")).unwrap_err();
        assert!(matches!(err, crate::Error::Io(_)));
    }
}

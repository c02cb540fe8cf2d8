//! taskdeck: a terminal dashboard for the Task Manager REST API.
//!
//! Three views (dashboard, tasks, users) over the API's tasks and users,
//! with status/priority filters, client-side search, task and user forms,
//! status toggling, deletion and timed notifications.

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Terminal host (main.rs)                            │  ← crossterm + ratatui
//! └─────────────────────────────────────────────────────┘
//!                        │ Event
//! ┌─────────────────────────────────────────────────────┐
//! │  Application layer (app/)                           │  ← state machine
//! │  - handle_event → Actions                           │
//! │  - request sequencing, forms, search, notifications │
//! │  - view model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                                   │
//! ┌───────────────┐                   ┌───────────────────┐
//! │ UI (ui/)      │                   │ Worker (worker/)  │
//! │ - components  │                   │ - tokio runtime   │
//! │ - themes      │                   │ - overlapping     │
//! └───────────────┘                   │   requests        │
//!                                     └───────────────────┘
//!                                             │
//!                                     ┌───────────────────┐
//!                                     │ API client (api/) │ ← reqwest
//!                                     └───────────────────┘
//! ```
//!
//! The UI thread never blocks on the network. Every request is a
//! [`worker::WorkerMessage`] tagged with a request id; responses come back
//! as [`worker::WorkerResponse`]s and are applied only if they answer the
//! latest request of their kind.
//!
//! # Configuration
//!
//! Settings are layered, later sources winning: built-in defaults, the TOML
//! file, `TASKDECK_*` environment variables, command line flags.
//!
//! ```toml
//! # ~/.config/taskdeck/config.toml
//! api_url = "http://localhost:8080/api"
//! api_key = "my-secure-api-key-12345"
//! request_timeout_secs = 10
//! theme = "catppuccin-latte"
//! # theme_file = "~/themes/mine.toml"
//! trace_level = "info"
//! ```

pub mod api;
pub mod app;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod ui;
pub mod worker;

pub use app::{handle_event, Action, AppState, Event, InputMode, SearchFocus, View};
pub use domain::{Result, TaskdeckError};
pub use ui::Theme;

use cli::Cli;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";
/// Development key accepted by a stock backend.
pub const DEFAULT_API_KEY: &str = "my-secure-api-key-12345";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_TRACE_LEVEL: &str = "info";

/// Runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Base URL, without a trailing slash, that `/users` and `/tasks` are
    /// appended to.
    pub api_url: String,

    /// Sent as `X-API-Key` on every request.
    pub api_key: String,

    pub request_timeout_secs: u64,

    /// Built-in theme name. Ignored if `theme_file` is set.
    #[serde(rename = "theme")]
    pub theme_name: Option<String>,

    /// TOML theme file; `~` is expanded. See [`ui::theme`] for the format.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive for the trace export.
    pub trace_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: DEFAULT_API_KEY.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            theme_name: None,
            theme_file: None,
            trace_level: DEFAULT_TRACE_LEVEL.to_string(),
        }
    }
}

impl Config {
    /// Parses a TOML document. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`TaskdeckError::Config`] for malformed TOML, wrong value
    /// types and unknown keys.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| TaskdeckError::Config(e.to_string()))
    }

    /// Loads the configuration file.
    ///
    /// With `path`, the file must exist. Without it, the default location is
    /// tried and a missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`TaskdeckError::Config`] if the file cannot be read or
    /// parsed.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, required) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => (infrastructure::default_config_file(), false),
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => Self::from_toml_str(&contents).map_err(|e| {
                TaskdeckError::Config(format!("{}: {e}", path.display()))
            }),
            Err(e) if !required && e.kind() == std::io::ErrorKind::NotFound => {
                Ok(Self::default())
            }
            Err(e) => Err(TaskdeckError::Config(format!(
                "failed to read {}: {e}",
                path.display()
            ))),
        }
    }

    /// Applies `TASKDECK_API_URL`, `TASKDECK_API_KEY` and
    /// `TASKDECK_TRACE_LEVEL`.
    pub fn apply_env(&mut self) {
        self.apply_env_from(|key| std::env::var(key).ok());
    }

    fn apply_env_from(&mut self, var: impl Fn(&str) -> Option<String>) {
        let non_empty = |key: &str| var(key).filter(|value| !value.is_empty());

        if let Some(url) = non_empty("TASKDECK_API_URL") {
            self.api_url = url;
        }
        if let Some(key) = non_empty("TASKDECK_API_KEY") {
            self.api_key = key;
        }
        if let Some(level) = non_empty("TASKDECK_TRACE_LEVEL") {
            self.trace_level = level;
        }
    }

    /// Applies command line overrides.
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(url) = &cli.api_url {
            self.api_url.clone_from(url);
        }
        if let Some(key) = &cli.api_key {
            self.api_key.clone_from(key);
        }
        if let Some(theme) = &cli.theme {
            self.theme_name = Some(theme.clone());
        }
        if let Some(file) = &cli.theme_file {
            self.theme_file = Some(file.clone());
        }
        if let Some(level) = &cli.trace_level {
            self.trace_level.clone_from(level);
        }
    }

    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Resolves the theme: file first, then name, then the default. A theme
    /// that fails to load falls back to the default.
    #[must_use]
    pub fn theme(&self) -> Theme {
        if let Some(file) = &self.theme_file {
            return Theme::from_file(infrastructure::expand_tilde(file)).unwrap_or_else(|e| {
                tracing::warn!(theme_file = %file, error = %e, "failed to load theme file, using default");
                Theme::default()
            });
        }

        self.theme_name.as_ref().map_or_else(Theme::default, |name| {
            Theme::from_name(name).unwrap_or_else(|| {
                tracing::warn!(theme_name = %name, "unknown theme, using default");
                Theme::default()
            })
        })
    }
}

/// Creates the initial, empty application state.
///
/// Users and tasks arrive with the first refresh, which the host triggers by
/// sending [`Event::Init`].
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(api_url = %config.api_url, "initializing taskdeck");
    AppState::new(config.theme())
}

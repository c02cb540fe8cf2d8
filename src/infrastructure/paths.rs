//! Per-user directory resolution.
//!
//! Follows the XDG base directory layout: `$XDG_CONFIG_HOME` and
//! `$XDG_DATA_HOME` when set to an absolute path, otherwise `~/.config` and
//! `~/.local/share`. All lookups take the environment as a closure so they
//! can be tested without touching the process environment.

use std::env;
use std::path::PathBuf;

const APP_DIR: &str = "taskdeck";

/// Directory holding `config.toml`.
#[must_use]
pub fn config_dir() -> PathBuf {
    config_dir_from(|key| env::var(key).ok())
}

/// Directory for the trace file.
#[must_use]
pub fn data_dir() -> PathBuf {
    data_dir_from(|key| env::var(key).ok())
}

/// Default location of the configuration file.
#[must_use]
pub fn default_config_file() -> PathBuf {
    config_dir().join("config.toml")
}

fn config_dir_from(var: impl Fn(&str) -> Option<String>) -> PathBuf {
    base_dir(&var, "XDG_CONFIG_HOME", &[".config"]).join(APP_DIR)
}

fn data_dir_from(var: impl Fn(&str) -> Option<String>) -> PathBuf {
    base_dir(&var, "XDG_DATA_HOME", &[".local", "share"]).join(APP_DIR)
}

fn base_dir(var: &impl Fn(&str) -> Option<String>, xdg_key: &str, fallback: &[&str]) -> PathBuf {
    if let Some(dir) = var(xdg_key).map(PathBuf::from) {
        if dir.is_absolute() {
            return dir;
        }
    }

    // Without HOME, fall back to the working directory.
    let mut dir = var("HOME").map_or_else(|| PathBuf::from("."), PathBuf::from);
    dir.extend(fallback);
    dir
}

/// Expands a leading `~` to the home directory.
///
/// ```text
/// ~/themes/dark.toml  ->  /home/me/themes/dark.toml
/// /etc/taskdeck.toml  ->  /etc/taskdeck.toml
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    expand_tilde_with(path, env::var("HOME").ok().as_deref())
}

fn expand_tilde_with(path: &str, home: Option<&str>) -> PathBuf {
    match (path, home) {
        ("~", Some(home)) => PathBuf::from(home),
        (_, Some(home)) if path.starts_with("~/") => PathBuf::from(home).join(&path[2..]),
        _ => PathBuf::from(path),
    }
}

//! Command line flags. Every flag overrides the matching config setting.

use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Default, Parser)]
#[command(name = "taskdeck", version, about = "Terminal dashboard for the Task Manager API")]
pub struct Cli {
    /// Configuration file (default: $XDG_CONFIG_HOME/taskdeck/config.toml)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Base URL of the API, e.g. http://localhost:8080/api
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Value sent in the X-API-Key header
    #[arg(long, value_name = "KEY")]
    pub api_key: Option<String>,

    /// Built-in theme: catppuccin-mocha or catppuccin-latte
    #[arg(long, value_name = "NAME")]
    pub theme: Option<String>,

    /// TOML theme file, takes precedence over --theme
    #[arg(long, value_name = "PATH")]
    pub theme_file: Option<String>,

    /// Trace filter, e.g. debug or taskdeck=trace
    #[arg(long, value_name = "LEVEL")]
    pub trace_level: Option<String>,
}

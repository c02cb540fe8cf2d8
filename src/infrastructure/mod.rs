//! Filesystem and environment helpers.

pub mod paths;

pub use paths::{config_dir, data_dir, default_config_file, expand_tilde};

//! Parsing and validation of `preflight.toml` run configuration files.
//!
//! This crate reads the configuration file and produces a strongly-typed
//! [`ProjectConfig`] holding the cluster version pair, run defaults, and the
//! checks to skip. Command-line flags override these values.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{
    load_config, load_config_file, load_config_from_str, load_config_or_default,
    CONFIG_FILE_NAME,
};
pub use types::*;

//! Application configuration module.
//!
//! Manages the TOML config file holding TMDB credentials and request
//! settings.

#[allow(clippy::module_inception)]
mod config;
mod paths;

#[allow(clippy::module_name_repetitions)]
pub use config::{AppConfig, TmdbConfig, mask_secret};
pub use paths::resolve_config_path;

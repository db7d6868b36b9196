//! Configuration management for Releaseman.
//!
//! This crate handles the `release_config.yml` file and the prepared
//! configuration that carries state from `prepare` to the finishing commands.

mod atomic;
mod error;
mod loader;
mod overrides;
mod schema;

pub use atomic::write_atomic;
pub use error::{ConfigError, ConfigResult};
pub use loader::{
    DEFAULT_CONFIG_PATH, HOME_ENV_KEY, PREPARED_CONFIG_FILE_NAME, load_config, load_or_default,
    prepared_config_path, remove_prepared_config, save_config,
};
pub use overrides::ConfigOverrides;
pub use schema::{
    ChangelogConfig, Config, DEFAULT_CHANGELOG_PATH, DEFAULT_CONTENT_TEMPLATE,
    DEFAULT_FOOTER_TEMPLATE, DEFAULT_HEADER_TEMPLATE, PrintMode, ReleaseConfig,
};

//! Configuration loading, saving and the prepared-config location.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{Config, ConfigError, ConfigResult, write_atomic};

/// Default release configuration path.
pub const DEFAULT_CONFIG_PATH: &str = "./release_config.yml";

/// File name of the config handed from `prepare` to the finishing commands.
pub const PREPARED_CONFIG_FILE_NAME: &str = "prepared_config.yml";

/// Environment variable that relocates the releaseman state directory.
pub const HOME_ENV_KEY: &str = "RELEASEMAN_HOME";

const STATE_DIR_NAME: &str = ".releaseman";

/// Loads configuration from the given path.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_config(path: impl AsRef<Path>) -> ConfigResult<Config> {
    let path = path.as_ref();
    debug!(path = %path.display(), "loading configuration");

    let content = std::fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(Config::default());
    }

    serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads configuration, falling back to empty defaults when the file is absent.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_or_default(path: impl AsRef<Path>) -> ConfigResult<Config> {
    let path = path.as_ref();
    if !path.exists() {
        debug!(path = %path.display(), "no configuration file, using defaults");
        return Ok(Config::default());
    }
    load_config(path)
}

/// Serializes the configuration and atomically writes it to `path`.
///
/// # Errors
///
/// Returns [`ConfigError::Write`] if serialization or the write fails.
pub fn save_config(config: &Config, path: impl AsRef<Path>) -> ConfigResult<()> {
    let path = path.as_ref();
    let yaml = serde_yaml::to_string(config).map_err(|e| ConfigError::Write {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    write_atomic(path, yaml.as_bytes())?;
    debug!(path = %path.display(), "saved configuration");
    Ok(())
}

/// Returns the prepared-config path, creating its directory if needed.
///
/// The directory is `$RELEASEMAN_HOME` when set, `~/.releaseman` otherwise.
///
/// # Errors
///
/// Returns an error if no home directory is known or the directory cannot
/// be created.
pub fn prepared_config_path() -> ConfigResult<PathBuf> {
    let dir = match std::env::var_os(HOME_ENV_KEY) {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => dirs::home_dir()
            .ok_or(ConfigError::NoHomeDir)?
            .join(STATE_DIR_NAME),
    };
    std::fs::create_dir_all(&dir)?;
    Ok(dir.join(PREPARED_CONFIG_FILE_NAME))
}

/// Deletes a consumed prepared config. A missing file is not an error.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be removed.
pub fn remove_prepared_config(path: impl AsRef<Path>) -> ConfigResult<()> {
    match std::fs::remove_file(path.as_ref()) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

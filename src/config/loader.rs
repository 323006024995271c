// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::Result;

/// Environment variable naming a config file when `--config` is absent.
pub const CONFIG_ENV: &str = "JOBSH_CONFIG";

/// Load a configuration file from a given path and return the raw `RawConfigFile`.
///
/// This only performs TOML deserialization; it does **not** perform semantic
/// validation. Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let config: RawConfigFile = toml::from_str(&contents)?;

    Ok(config)
}

/// Load a configuration file from path and run basic validation.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let raw_config = load_from_path(&path)?;
    let config = ConfigFile::try_from(raw_config)?;
    Ok(config)
}

/// Resolve which config file to use, if any.
///
/// An explicit path wins; otherwise `JOBSH_CONFIG` is consulted. `None`
/// means "use built-in defaults".
pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    explicit.map(Path::to_path_buf).or_else(|| {
        std::env::var_os(CONFIG_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    })
}

/// Load the effective configuration: file (if any) or defaults.
pub fn load_effective(explicit: Option<&Path>) -> Result<ConfigFile> {
    match resolve_config_path(explicit) {
        Some(path) => {
            debug!(path = %path.display(), "loading shell config");
            load_and_validate(path)
        }
        None => Ok(ConfigFile::default()),
    }
}

//! Finding, creating and reading `daylight.toml`.

use anyhow::{Context, Result, anyhow, bail};
use std::fs;
use std::path::PathBuf;
use std::sync::OnceLock;

use super::Config;
use super::validation::validate_config;
use crate::constants::{APP_DIR_NAME, CONFIG_FILE_NAME};
use crate::utils::private_path;

/// Directory given with `--config`; `None` inside means the XDG default.
static CONFIG_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Record the `--config` directory. Fails when called a second time.
pub fn set_config_dir(dir: Option<String>) -> Result<()> {
    CONFIG_DIR
        .set(dir.map(PathBuf::from))
        .map_err(|_| anyhow!("Configuration directory can only be chosen once per run"))
}

/// The `--config` directory, if one was recorded.
pub fn get_custom_config_dir() -> Option<PathBuf> {
    CONFIG_DIR.get().cloned().flatten()
}

/// Read the configuration, writing the commented default file first if
/// there is none yet.
pub fn load() -> Result<Config> {
    let path = get_config_path()?;
    let shown = private_path(&path);

    if !path.exists() {
        super::builder::create_default_config(&path)
            .with_context(|| format!("Failed to write default configuration to {shown}"))?;
        log_block_start!("Created default configuration at {shown}");
    }

    load_from_path(&path).with_context(|| format!("Failed to load configuration from {shown}"))
}

/// Read the configuration at `path`. A missing file is an error here.
pub fn load_from_path(path: &PathBuf) -> Result<Config> {
    let shown = private_path(path);
    if !path.is_file() {
        bail!("Configuration file not found at {shown}");
    }

    let text = fs::read_to_string(path).with_context(|| format!("Failed to read {shown}"))?;
    parse_config(&text).with_context(|| format!("Invalid configuration in {shown}"))
}

/// Deserialize TOML text and check every value.
pub(crate) fn parse_config(text: &str) -> Result<Config> {
    let config: Config = toml::from_str(text).context("Failed to parse TOML")?;
    validate_config(&config)?;
    Ok(config)
}

/// `<--config dir>/daylight.toml`, else `$XDG_CONFIG_HOME/daylight/daylight.toml`.
pub fn get_config_path() -> Result<PathBuf> {
    let dir = match get_custom_config_dir() {
        Some(dir) => dir,
        None => dirs::config_dir()
            .context("Could not determine config directory")?
            .join(APP_DIR_NAME),
    };
    Ok(dir.join(CONFIG_FILE_NAME))
}

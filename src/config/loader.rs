use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;

use super::schema::FetchConfig;

/// Parse TOML config text; absent keys keep their defaults.
pub fn parse_config(content: &str) -> Result<FetchConfig> {
    toml::from_str(content).context("Invalid fetch config")
}

/// Read the config at `path`, or fall back to the built-in defaults when
/// there is no file. Nothing is written.
pub fn load_config(path: &Path) -> Result<FetchConfig> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(FetchConfig::default());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_config(&content).with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// File config with `APIFETCH_*` environment overrides applied on top.
pub fn resolve_config(path: &Path) -> Result<FetchConfig> {
    Ok(load_config(path)?.with_env_overrides())
}

/// Write `config` to a new file at `path`, refusing to clobber an existing one.
pub fn init_config(path: &Path, config: &FetchConfig) -> Result<()> {
    if path.exists() {
        bail!("Config file already exists: {}", path.display());
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
    }

    let content = toml::to_string_pretty(config).context("Failed to serialize config to TOML")?;
    fs::write(path, content)
        .with_context(|| format!("Failed to write config file: {}", path.display()))?;

    tracing::info!(path = %path.display(), "wrote config file");
    Ok(())
}

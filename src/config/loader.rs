use std::fs;
use std::path::Path;

use log::info;

use crate::error::{Context, Result};

use super::{validator, Config};

/// Load the client configuration. Without a path the builtin defaults are used; a
/// JSON file only needs the fields it wants to override.
pub fn load_config(path: Option<&Path>, base_url: Option<&str>) -> Result<Config> {
    let config = match path {
        Some(path) => read_config_file(path)?,
        None => Config::builtin(),
    }
    .with_base_url(base_url);

    validator::validate_config(&config)?;
    Ok(config)
}

fn read_config_file(path: &Path) -> Result<Config> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read config JSON at {}", path.display()))?;

    let config: Config = serde_json::from_str(&json)
        .with_context(|| format!("failed to parse config JSON at {}", path.display()))?;

    info!("Loaded configuration from {}", path.display());
    Ok(config)
}

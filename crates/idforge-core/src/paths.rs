use anyhow::Result;
use std::path::PathBuf;

const IDFORGE_DIR: &str = "idforge";
const STORE_FILE: &str = "authorized_ids.json";
const CONFIG_FILE: &str = "config.toml";

/// Environment variable to override the idforge data directory.
const IDFORGE_DIR_ENV: &str = "IDFORGE_DIR";

/// Resolve the idforge data directory.
/// Priority: IDFORGE_DIR env var > <data dir>/idforge/
pub fn resolve_data_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var(IDFORGE_DIR_ENV)
        && !dir.trim().is_empty()
    {
        return Ok(PathBuf::from(dir));
    }
    dirs::data_dir()
        .map(|d| d.join(IDFORGE_DIR))
        .ok_or_else(|| anyhow::anyhow!("Failed to determine data directory"))
}

/// Default record file: <data dir>/authorized_ids.json
pub fn default_store_path() -> Result<PathBuf> {
    Ok(resolve_data_dir()?.join(STORE_FILE))
}

/// Config file: <config dir>/idforge/config.toml
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join(IDFORGE_DIR).join(CONFIG_FILE))
}

use anyhow::{Context, Result};
use std::{
    env,
    path::{Path, PathBuf},
};

const CONFIG_FILE: &str = ".reflux.toml";
const PLATFORM_CONFIG_FILE: &str = "config.toml";
const CONFIG_ENV: &str = "REFLUX_CONFIG";

/// Load config file content
///
/// Searches for the config in:
/// 1. The file named by `REFLUX_CONFIG`
/// 2. `.reflux.toml` in the current working directory
/// 3. `config.toml` in the platform config directory
/// 4. `.reflux.toml` in the home directory
///
/// Returns the file content if found, None otherwise. A `REFLUX_CONFIG`
/// naming an unreadable file is an error.
///
/// Runs before logging is set up, so problems are returned, not logged.
pub fn load_config_file() -> Result<Option<String>> {
    if let Some(path) = env::var_os(CONFIG_ENV) {
        let path = PathBuf::from(path);
        return std::fs::read_to_string(&path)
            .map(Some)
            .with_context(|| format!("{} points to unreadable {}", CONFIG_ENV, path.display()));
    }

    if let Some(content) = read_config_file(Path::new(CONFIG_FILE)) {
        return Ok(Some(content));
    }

    if let Some(content) = get_platform_config_path().and_then(|path| read_config_file(&path)) {
        return Ok(Some(content));
    }

    Ok(get_home_config_path().and_then(|path| read_config_file(&path)))
}

/// Read one config file, None when it is missing or unreadable
pub fn read_config_file(path: &Path) -> Option<String> {
    std::fs::read_to_string(path).ok()
}

fn get_platform_config_path() -> Option<PathBuf> {
    crate::paths::config_dir()
        .map(|dir| dir.join(PLATFORM_CONFIG_FILE))
        .ok()
}

fn get_home_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_FILE))
}

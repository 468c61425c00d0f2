use crate::error::{MpmError, Result};
use directories::{ProjectDirs, UserDirs};
use std::path::{Path, PathBuf};

/// Expand a leading `~` to the user's home directory
pub fn expand_home(path: &Path) -> Result<PathBuf> {
    let path_str = path.to_string_lossy();

    if !path_str.starts_with('~') {
        return Ok(path.to_path_buf());
    }

    let user_dirs = UserDirs::new()
        .ok_or_else(|| MpmError::Other("Could not determine user home directory".to_string()))?;
    let home = user_dirs.home_dir();

    if path_str == "~" {
        return Ok(home.to_path_buf());
    }

    let stripped = path_str
        .strip_prefix("~/")
        .ok_or_else(|| MpmError::ConfigError(format!("Invalid path format: {}", path_str)))?;

    Ok(home.join(stripped))
}

pub fn config_dir() -> Result<PathBuf> {
    let proj = ProjectDirs::from("", "", "mpm")
        .ok_or_else(|| MpmError::Other("Could not determine config directory".to_string()))?;
    Ok(proj.config_dir().to_path_buf())
}

pub fn settings_file() -> Result<PathBuf> {
    Ok(config_dir()?.join("settings.kdl"))
}

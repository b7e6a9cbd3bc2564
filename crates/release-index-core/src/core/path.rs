use crate::core::error::{IndexError, IndexResult};
use std::path::{Path, PathBuf};

/// Get the release-index home directory
///
/// Platform-specific locations:
/// - Windows: %APPDATA%\release-index
/// - Linux: ~/.config/release-index
/// - macOS: ~/Library/Application Support/release-index
pub fn index_home() -> IndexResult<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| IndexError::Path("Could not determine config directory".to_string()))?;
    Ok(config_dir.join("release-index"))
}

/// Get the config file path (`<index_home>/config.yaml`)
pub fn config_file() -> IndexResult<PathBuf> {
    Ok(index_home()?.join("config.yaml"))
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_dir(path: &Path) -> IndexResult<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Ensure the parent directory of a file exists.
///
/// A bare file name (no parent component) needs nothing created.
pub fn ensure_parent_dir(file: &Path) -> IndexResult<()> {
    match file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => ensure_dir(parent),
        _ => Ok(()),
    }
}

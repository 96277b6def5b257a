//! Platform-specific paths for rig configuration files.
//!
//! # Directory Structure
//!
//! - **User config**: `~/.config/skybox/` (Linux), `~/Library/Application Support/skybox/` (macOS), `%APPDATA%\skybox\` (Windows)
//! - **User rigs**: `<user config>/rigs/*.toml`
//!
//! # Example
//!
//! ```rust,no_run
//! use skybox_config::paths;
//!
//! if let Some(path) = paths::find_rig("flume") {
//!     println!("Found rig at: {:?}", path);
//! }
//! ```

use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::factory::get_factory_rig;
use crate::rig::RigConfig;

/// Application name used for directory paths.
const APP_NAME: &str = "skybox";

/// Subdirectory name for rig files.
const RIGS_SUBDIR: &str = "rigs";

/// Returns the user-specific configuration directory.
///
/// Returns a fallback path if the config directory cannot be determined.
pub fn user_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Returns the user-specific rigs directory.
pub fn user_rigs_dir() -> PathBuf {
    user_config_dir().join(RIGS_SUBDIR)
}

/// Find a rig file by name or path.
///
/// Searches in order:
/// 1. `name` as a file path
/// 2. the user rigs directory, with `.toml` appended if missing
pub fn find_rig(name: &str) -> Option<PathBuf> {
    find_rig_in(name, &user_rigs_dir())
}

fn find_rig_in(name: &str, rigs_dir: &Path) -> Option<PathBuf> {
    let path = PathBuf::from(name);
    if path.is_file() {
        return Some(path);
    }

    let filename = if name.ends_with(".toml") {
        name.to_string()
    } else {
        format!("{name}.toml")
    };

    let user_path = rigs_dir.join(filename);
    user_path.is_file().then_some(user_path)
}

/// Resolve a rig by name: factory rigs first, then [`find_rig`].
///
/// # Errors
///
/// [`ConfigError::RigNotFound`] if nothing matches; load errors otherwise.
pub fn resolve_rig(name: &str) -> Result<RigConfig, ConfigError> {
    if let Some(rig) = get_factory_rig(name) {
        return Ok(rig);
    }
    match find_rig(name) {
        Some(path) => RigConfig::load(path),
        None => Err(ConfigError::RigNotFound(name.to_string())),
    }
}

/// Ensure the user rigs directory exists.
pub fn ensure_user_rigs_dir() -> Result<PathBuf, ConfigError> {
    ensure_dir(user_rigs_dir())
}

fn ensure_dir(dir: PathBuf) -> Result<PathBuf, ConfigError> {
    if !dir.exists() {
        std::fs::create_dir_all(&dir).map_err(|e| ConfigError::create_dir(&dir, e))?;
    }
    Ok(dir)
}

/// Save `rig` as `<name>.toml` in the user rigs directory, creating it if
/// needed, so that [`resolve_rig`] finds it by name.
///
/// Returns the path written.
pub fn install_rig(rig: &RigConfig) -> Result<PathBuf, ConfigError> {
    install_rig_in(rig, ensure_user_rigs_dir()?)
}

fn install_rig_in(rig: &RigConfig, dir: PathBuf) -> Result<PathBuf, ConfigError> {
    let path = ensure_dir(dir)?.join(format!("{}.toml", rig.name));
    rig.save(&path)?;
    tracing::debug!(rig = %rig.name, path = %path.display(), "installed rig");
    Ok(path)
}

/// List the rig files in the user rigs directory.
///
/// Returns an empty vector if the directory doesn't exist or can't be read.
pub fn list_user_rigs() -> Vec<PathBuf> {
    list_rigs_in_dir(&user_rigs_dir())
}

fn list_rigs_in_dir(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut rigs: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "toml"))
        .collect();
    rigs.sort();
    rigs
}

/// Rig name from a file path (the file stem).
pub fn rig_name_from_path(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(ToString::to_string)
}

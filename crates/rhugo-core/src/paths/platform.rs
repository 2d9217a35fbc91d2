//! Per-user and bundle root resolution.
//!
//! Both roots honour an environment override first so tests and packagers
//! can redirect them without touching the user's home directory.

use std::env;
use std::path::PathBuf;

use tracing::debug;

use super::error::PathError;

/// Environment variable overriding the staging directory.
pub const STAGING_DIR_ENV: &str = "RHUGO_HOME";

/// Environment variable overriding the bundle directory.
pub const BUNDLE_DIR_ENV: &str = "RHUGO_BUNDLE_DIR";

/// Name of the directory holding bundled binaries.
pub const BUNDLE_DIR_NAME: &str = "hugo-bin";

/// Get the per-user directory that staged binaries are copied into.
///
/// Resolution order:
/// 1. `RHUGO_HOME` environment variable
/// 2. `~/.small-tech.org/rhugo`
pub fn staging_root() -> Result<PathBuf, PathError> {
    if let Ok(path) = env::var(STAGING_DIR_ENV) {
        return normalize_user_path(&path);
    }

    let home = dirs::home_dir().ok_or(PathError::NoHomeDir)?;
    Ok(home.join(".small-tech.org").join("rhugo"))
}

/// Get the directory holding the read-only bundled binaries.
///
/// Resolution order:
/// 1. `RHUGO_BUNDLE_DIR` environment variable
/// 2. `hugo-bin/` next to the running executable, if present
/// 3. `hugo-bin/` at the root of the source repository
pub fn bundle_root() -> Result<PathBuf, PathError> {
    if let Ok(path) = env::var(BUNDLE_DIR_ENV) {
        return normalize_user_path(&path);
    }

    if let Some(beside_exe) = env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(BUNDLE_DIR_NAME)))
    {
        if beside_exe.is_dir() {
            return Ok(beside_exe);
        }
    }

    let repo_bundle = PathBuf::from(env!("RHUGO_REPO_ROOT")).join(BUNDLE_DIR_NAME);
    debug!(path = %repo_bundle.display(), "No bundle beside executable, using repository bundle");
    Ok(repo_bundle)
}

/// Normalize a user-provided path, expanding `~` and making it absolute.
pub(crate) fn normalize_user_path(raw: &str) -> Result<PathBuf, PathError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(PathError::EmptyPath);
    }

    let expanded = if trimmed.starts_with("~/") || trimmed == "~" {
        let home = dirs::home_dir().ok_or(PathError::NoHomeDir)?;
        if trimmed == "~" {
            home
        } else {
            home.join(trimmed.trim_start_matches("~/"))
        }
    } else {
        PathBuf::from(trimmed)
    };

    if expanded.is_absolute() {
        Ok(expanded)
    } else {
        env::current_dir()
            .map(|cwd| cwd.join(expanded))
            .map_err(PathError::CurrentDir)
    }
}

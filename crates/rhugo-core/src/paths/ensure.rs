//! Staging directory preparation.

use std::fs;
use std::path::Path;

use super::error::PathError;

/// Create `dir` (and its parents) if missing, then check it accepts writes.
///
/// Called only once a bundled binary has been found, so hosts without a
/// bundled variant never get a staging directory.
pub fn ensure_staging_dir(dir: &Path) -> Result<(), PathError> {
    if dir.exists() && !dir.is_dir() {
        return Err(PathError::NotADirectory(dir.to_path_buf()));
    }

    fs::create_dir_all(dir).map_err(|source| PathError::Create {
        path: dir.to_path_buf(),
        source,
    })?;

    probe_writable(dir)
}

/// Write and remove a per-process probe file in `dir`.
pub fn probe_writable(dir: &Path) -> Result<(), PathError> {
    let probe = dir.join(format!(".rhugo-probe-{}", std::process::id()));
    fs::write(&probe, b"").map_err(|source| PathError::NotWritable {
        path: dir.to_path_buf(),
        source,
    })?;
    let _ = fs::remove_file(&probe);
    Ok(())
}

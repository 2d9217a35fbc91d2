//! Idempotent copy of a bundled binary into the staging directory.

use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;

/// Permission bits given to staged executables.
#[cfg(unix)]
pub const STAGED_MODE: u32 = 0o755;

/// What `stage_binary` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageOutcome {
    /// The binary was copied into place.
    Copied,
    /// A staged copy already existed; nothing was written.
    AlreadyStaged,
}

/// Copy `source` to `destination` unless `destination` already exists.
///
/// The copy is written next to the destination under a temporary name and
/// renamed into place, so a reader never observes a half-written file at
/// `destination`. Concurrent first-time staging from several processes is
/// still not coordinated.
pub fn stage_binary(source: &Path, destination: &Path) -> io::Result<StageOutcome> {
    if destination.exists() {
        debug!(path = %destination.display(), "Binary already staged");
        return Ok(StageOutcome::AlreadyStaged);
    }

    let file_name = destination
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "destination has no file name"))?;
    let partial = destination.with_file_name(format!(
        ".{}.partial-{}",
        file_name.to_string_lossy(),
        std::process::id()
    ));

    let copied = fs::copy(source, &partial).and_then(|bytes| {
        make_executable(&partial)?;
        fs::rename(&partial, destination)?;
        Ok(bytes)
    });
    let bytes = match copied {
        Ok(bytes) => bytes,
        Err(e) => {
            let _ = fs::remove_file(&partial);
            return Err(e);
        }
    };

    debug!(
        from = %source.display(),
        to = %destination.display(),
        bytes,
        "Staged binary"
    );
    Ok(StageOutcome::Copied)
}

#[cfg(unix)]
fn make_executable(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(STAGED_MODE))
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn copies_bytes_on_first_call() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("bundled");
        let destination = temp.path().join("staged");
        fs::write(&source, b"binary-bytes").unwrap();

        let outcome = stage_binary(&source, &destination).unwrap();

        assert_eq!(outcome, StageOutcome::Copied);
        assert_eq!(fs::read(&destination).unwrap(), b"binary-bytes");
    }

    #[test]
    fn second_call_is_a_no_op() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("bundled");
        let destination = temp.path().join("staged");
        fs::write(&source, b"v1").unwrap();

        stage_binary(&source, &destination).unwrap();
        fs::write(&source, b"v2").unwrap();
        let outcome = stage_binary(&source, &destination).unwrap();

        assert_eq!(outcome, StageOutcome::AlreadyStaged);
        assert_eq!(fs::read(&destination).unwrap(), b"v1");
    }

    #[test]
    fn missing_source_leaves_no_partial_file() {
        let temp = TempDir::new().unwrap();
        let destination = temp.path().join("staged");

        let result = stage_binary(&temp.path().join("absent"), &destination);

        assert!(result.is_err());
        assert!(!destination.exists());
        assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
    }

    #[test]
    #[cfg(unix)]
    fn staged_copy_is_executable() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let source = temp.path().join("bundled");
        let destination = temp.path().join("staged");
        fs::write(&source, b"#!/bin/sh\n").unwrap();
        fs::set_permissions(&source, fs::Permissions::from_mode(0o444)).unwrap();

        stage_binary(&source, &destination).unwrap();

        let mode = fs::metadata(&destination).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, STAGED_MODE);
    }
}

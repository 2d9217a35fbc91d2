//! Shared helpers for runtime integration tests.

#![allow(dead_code)]

use rhugo_core::{BinaryDescriptor, HugoConfig};
use rhugo_runtime::Hugo;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Write an executable shell script standing in for the Hugo binary.
#[cfg(unix)]
pub fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// A facade whose binary is the given script body.
#[cfg(unix)]
pub fn fake_hugo(body: &str) -> (TempDir, Hugo) {
    let temp = TempDir::new().unwrap();
    let script = write_script(temp.path(), "hugo-v0.64.0-linux-amd64", body);
    let config = HugoConfig::new(temp.path().join("stage"), temp.path());
    let binary = BinaryDescriptor::new(&script, &script, "0.64.0");
    (temp, Hugo::with_binary(config, binary))
}

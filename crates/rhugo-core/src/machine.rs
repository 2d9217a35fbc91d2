//! Host machine description.
//!
//! The platform and CPU architecture of the running machine are mapped
//! independently through two fixed lookup tables to the canonical tokens
//! used in bundled binary names.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors raised when the host has no bundled binary variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlatformError {
    /// The operating system is not one the bundle is built for.
    #[error("Unsupported platform: {0}")]
    UnsupportedPlatform(String),

    /// The CPU architecture is not one the bundle is built for.
    #[error("Unsupported architecture: {0}")]
    UnsupportedArchitecture(String),
}

/// Canonical platform token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Linux,
    Darwin,
    Windows,
}

impl Platform {
    /// Map a host platform name to its canonical token.
    ///
    /// Accepts both Rust's `std::env::consts::OS` spellings and the
    /// spellings used by other runtimes (`win32`).
    pub fn from_host(name: &str) -> Result<Self, PlatformError> {
        match name {
            "linux" => Ok(Self::Linux),
            "darwin" | "macos" => Ok(Self::Darwin),
            "win32" | "windows" => Ok(Self::Windows),
            other => Err(PlatformError::UnsupportedPlatform(other.to_string())),
        }
    }

    /// Token used in binary file names.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Linux => "linux",
            Self::Darwin => "darwin",
            Self::Windows => "windows",
        }
    }

    /// Executable suffix for this platform.
    pub const fn exe_suffix(self) -> &'static str {
        match self {
            Self::Windows => ".exe",
            Self::Linux | Self::Darwin => "",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical CPU architecture token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Architecture {
    Arm,
    Arm64,
    Amd64,
}

impl Architecture {
    /// Map a host architecture name to its canonical token.
    pub fn from_host(name: &str) -> Result<Self, PlatformError> {
        match name {
            "arm" => Ok(Self::Arm),
            "arm64" | "aarch64" => Ok(Self::Arm64),
            "x64" | "x86_64" => Ok(Self::Amd64),
            other => Err(PlatformError::UnsupportedArchitecture(other.to_string())),
        }
    }

    /// Token used in binary file names.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Arm => "arm",
            Self::Arm64 => "arm64",
            Self::Amd64 => "amd64",
        }
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Platform and architecture of a machine.
///
/// Resolved once from the host and never mutated; it only serves to
/// compute the bundled binary's lookup key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MachineDescriptor {
    pub platform: Platform,
    pub architecture: Architecture,
}

impl MachineDescriptor {
    /// Build a descriptor from raw host names.
    ///
    /// The platform is checked first, so a host that is unsupported on both
    /// axes reports `UnsupportedPlatform`.
    pub fn from_host(platform: &str, architecture: &str) -> Result<Self, PlatformError> {
        Ok(Self {
            platform: Platform::from_host(platform)?,
            architecture: Architecture::from_host(architecture)?,
        })
    }

    /// Describe the machine this process is running on.
    pub fn current() -> Result<Self, PlatformError> {
        Self::from_host(std::env::consts::OS, std::env::consts::ARCH)
    }
}

impl fmt::Display for MachineDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.platform, self.architecture)
    }
}

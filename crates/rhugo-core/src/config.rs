//! Runtime configuration.
//!
//! `HugoConfig` is an explicit value handed to the locator and the facade.
//! Nothing downstream reads the home directory or the environment on its
//! own, which keeps independent instances isolated (notably in tests).

use std::env;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::paths::{PathError, bundle_root, staging_root};

/// Version of the bundled Hugo binaries.
pub const DEFAULT_HUGO_VERSION: &str = "0.64.0";

/// Line prefix Hugo prints once its initial build has finished.
pub const DEFAULT_READINESS_MARKER: &str = "Built in";

/// Environment variable overriding the readiness marker.
pub const READINESS_MARKER_ENV: &str = "RHUGO_READINESS_MARKER";

/// Environment variable setting a server startup timeout in seconds.
pub const STARTUP_TIMEOUT_ENV: &str = "RHUGO_STARTUP_TIMEOUT_SECS";

/// Errors raised while assembling configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Path(#[from] PathError),

    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: &'static str, reason: String },
}

/// Configuration shared by the locator, command runner and coordinator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HugoConfig {
    /// Per-user directory receiving the staged executable.
    pub staging_dir: PathBuf,
    /// Read-only directory holding one binary per supported machine.
    pub bundle_dir: PathBuf,
    /// Version tag of the bundled binaries.
    pub version: String,
    /// Prefix of the stdout line that signals server readiness.
    pub readiness_marker: String,
    /// Upper bound on server startup. `None` waits indefinitely.
    pub startup_timeout: Option<Duration>,
}

impl HugoConfig {
    /// Create a configuration with explicit directories and default policy.
    pub fn new(staging_dir: impl Into<PathBuf>, bundle_dir: impl Into<PathBuf>) -> Self {
        Self {
            staging_dir: staging_dir.into(),
            bundle_dir: bundle_dir.into(),
            version: DEFAULT_HUGO_VERSION.to_string(),
            readiness_marker: DEFAULT_READINESS_MARKER.to_string(),
            startup_timeout: None,
        }
    }

    /// Resolve configuration from the environment and per-user defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::new(staging_root()?, bundle_root()?);

        if let Ok(marker) = env::var(READINESS_MARKER_ENV) {
            if marker.is_empty() {
                return Err(ConfigError::InvalidValue {
                    key: READINESS_MARKER_ENV,
                    reason: "marker cannot be empty".to_string(),
                });
            }
            debug!(%marker, "Readiness marker overridden from environment");
            config.readiness_marker = marker;
        }

        if let Ok(raw) = env::var(STARTUP_TIMEOUT_ENV) {
            let secs: u64 = raw.trim().parse().map_err(|e| ConfigError::InvalidValue {
                key: STARTUP_TIMEOUT_ENV,
                reason: format!("{raw:?}: {e}"),
            })?;
            debug!(secs, "Server startup timeout set from environment");
            config.startup_timeout = Some(Duration::from_secs(secs));
        }

        Ok(config)
    }

    /// Set the bundled binary version.
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Set the readiness marker prefix.
    #[must_use]
    pub fn with_readiness_marker(mut self, marker: impl Into<String>) -> Self {
        self.readiness_marker = marker.into();
        self
    }

    /// Bound server startup by `timeout`.
    #[must_use]
    pub const fn with_startup_timeout(mut self, timeout: Duration) -> Self {
        self.startup_timeout = Some(timeout);
        self
    }
}

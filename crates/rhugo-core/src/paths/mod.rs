//! Path utilities for rhugo's staging and bundle directories.
//!
//! # Design
//!
//! - Returns `PathBuf` and `PathError` for clear error handling
//! - No interactive/terminal I/O
//! - Roots are resolved here once and then carried in `HugoConfig`, so the
//!   rest of the workspace never reads the environment directly

mod ensure;
mod error;
mod platform;
mod resolver;

#[cfg(test)]
pub(crate) mod test_utils;

pub use ensure::{ensure_staging_dir, probe_writable};
pub use error::PathError;
pub use platform::{
    BUNDLE_DIR_ENV, BUNDLE_DIR_NAME, STAGING_DIR_ENV, bundle_root, staging_root,
};
pub use resolver::ResolvedPaths;

//! Core domain types and port definitions for rhugo.
//!
//! This crate knows how bundled Hugo binaries are named, where they live and
//! how process output is delivered to observers. It never spawns processes;
//! that is `rhugo-runtime`'s job.
#![deny(unused_crate_dependencies)]

pub mod binary;
pub mod config;
pub mod machine;
pub mod paths;
pub mod ports;
pub mod stats;

pub use binary::{BINARY_BASE_NAME, BinaryDescriptor, binary_file_name};
pub use config::{
    ConfigError, DEFAULT_HUGO_VERSION, DEFAULT_READINESS_MARKER, HugoConfig,
    READINESS_MARKER_ENV, STARTUP_TIMEOUT_ENV,
};
pub use machine::{Architecture, MachineDescriptor, Platform, PlatformError};
pub use paths::{
    PathError, ResolvedPaths, bundle_root, ensure_staging_dir, probe_writable, staging_root,
};
pub use ports::{OutputChunk, OutputStream, ProcessOutput, Subscription, SubscriptionId};
pub use stats::BuildStats;

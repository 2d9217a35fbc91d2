//! Process-facing side of rhugo.
//!
//! This crate stages the bundled Hugo binary, runs one-shot commands against
//! it and coordinates long-running server sessions. Domain types and the
//! process-output port live in `rhugo-core`.
#![deny(unsafe_code)]

pub mod command;
pub mod hugo;
pub mod locator;
pub mod process;
pub mod server;

pub use command::{CommandError, CommandResult, ExecutionRequest, HugoCommandBuilder};
pub use hugo::{
    BuildOptions, DEFAULT_BASE_URL, DEFAULT_DESTINATION, DEFAULT_SOURCE, Hugo, ServeOptions,
};
pub use locator::{BinaryLocator, LocatorError, LocatorResult, StageOutcome, stage_binary};
pub use process::{GRACE_PERIOD, OutputHub, StopMethod, Stopped, shutdown_child, stop_child};
pub use server::{
    Readiness, ReadinessGate, ServerProcess, ServerResult, ServerSession, ServerStartupError,
    StartupState, await_readiness, start_server,
};

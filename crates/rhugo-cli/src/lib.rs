#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

//! Command-line front end for rhugo.
//!
//! The binary in `main.rs` only parses arguments, installs logging and
//! dispatches; everything else lives here so it can be tested.

// Used by the integration tests only
#[cfg(test)]
use tempfile as _;

// Used by main.rs
use dotenvy as _;
use tracing_subscriber as _;

pub mod bootstrap;
pub mod commands;
pub mod error;
pub mod handlers;
pub mod parser;

pub use bootstrap::{CliContext, bootstrap};
pub use commands::Commands;
pub use error::CliError;
pub use parser::Cli;

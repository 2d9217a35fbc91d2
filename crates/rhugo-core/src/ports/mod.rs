//! Port definitions (trait abstractions) for external systems.
//!
//! Ports carry no process or filesystem implementation details; the runtime
//! crate provides the OS-backed implementations.

pub mod process_output;

pub use process_output::{
    OutputChunk, OutputStream, ProcessOutput, Subscription, SubscriptionId,
};

//! Long-running server sessions.
//!
//! [`start_server`] is the entry point; [`await_readiness`] runs the same
//! readiness logic against any [`rhugo_core::ProcessOutput`] source.

mod coordinator;
mod error;
mod gate;
mod session;

pub use coordinator::{Readiness, await_readiness, start_server, watch_readiness};
pub use error::{ServerResult, ServerStartupError};
pub use gate::{ReadinessGate, StartupState};
pub use session::{ServerProcess, ServerSession};

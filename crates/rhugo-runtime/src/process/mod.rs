//! Subprocess plumbing shared by the server coordinator.

mod hub;
pub mod shutdown;
mod stream;

pub use hub::OutputHub;
pub use shutdown::{GRACE_PERIOD, StopMethod, Stopped, shutdown_child, stop_child};
pub use stream::spawn_output_pump;

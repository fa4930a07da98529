//! Startup and teardown of the order store.

pub mod order_system;
pub mod tracing;

pub use order_system::*;
pub use tracing::*;

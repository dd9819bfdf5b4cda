//! System orchestration, startup, and shutdown logic.

pub mod cart_system;
pub mod tracing;

pub use cart_system::*;
pub use tracing::*;

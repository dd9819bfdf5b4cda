//! Cart actor: single-writer owner of the cart state and its mutations.

pub mod error;
mod service;

pub use error::*;
pub use service::*;

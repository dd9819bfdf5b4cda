//! Notification sink: the user-facing error signal (the toast stand-in).
//!
//! Failures are also returned as structured [`CartError`](crate::cart_actor::CartError)
//! outcomes; the sink exists because the UI reacts to messages, not to `Result`s.

use tracing::error;

/// Message for a mutation rejected by the stock ceiling.
pub const OUT_OF_STOCK: &str = "requested quantity out of stock";
/// Message for any other failure while adding a product.
pub const ADD_FAILED: &str = "failed to add product";
/// Message for any failure while removing a product.
pub const REMOVE_FAILED: &str = "failed to remove product";
/// Message for any other failure while changing a product quantity.
pub const UPDATE_FAILED: &str = "failed to change product quantity";

/// Fire-and-forget user-facing error signal. Implementations must not block.
pub trait ErrorNotifier: Send + Sync {
    fn notify_error(&self, message: &str);
}

/// Routes notifications to the log. Stands in for the UI toast layer in the demo.
#[derive(Debug, Default)]
pub struct LogNotifier;

impl LogNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl ErrorNotifier for LogNotifier {
    fn notify_error(&self, message: &str) {
        error!(user_message = message, "User-facing cart error");
    }
}

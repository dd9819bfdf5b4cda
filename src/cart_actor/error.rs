use thiserror::Error;

use crate::catalog::CatalogError;
use crate::domain::ProductId;

/// Structured outcome of a cart mutation. Every variant is also mirrored to the
/// notification sink with its user-facing message; the enum is what tests and
/// programmatic callers match on.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    #[error("Insufficient stock: requested {requested}, available {available}")]
    StockExceeded { requested: u32, available: u32 },
    #[error("Product not in cart: {0}")]
    NotFound(ProductId),
    #[error("Catalog lookup failed: {0}")]
    Lookup(#[from] CatalogError),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

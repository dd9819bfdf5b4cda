use serde::{Deserialize, Serialize};

/// Numeric product identifier, as served by the catalog collaborator.
pub type ProductId = u64;

/// Catalog record for a product: the display fields behind `GET /products/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: f64,
    pub image: String,
}

impl Product {
    pub fn new(
        id: ProductId,
        title: impl Into<String>,
        price: f64,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            price,
            image: image.into(),
        }
    }
}

/// Available stock for a product, as served by `GET /stock/{id}`.
///
/// Fetched fresh for every mutation and never cached; the ceiling can change out of
/// band between calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stock {
    pub amount: u32,
}

impl Stock {
    pub fn new(amount: u32) -> Self {
        Self { amount }
    }
}

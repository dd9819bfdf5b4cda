//! Catalog collaborator port: the remote stock and product lookup service.
//!
//! The real service lives behind `GET /stock/{id}` and `GET /products/{id}` and is
//! outside this crate; the cart service only ever talks to [`CatalogApi`].

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{Product, ProductId, Stock};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogError {
    #[error("Product not found in catalog: {0}")]
    NotFound(ProductId),
    #[error("Catalog unavailable: {0}")]
    Unavailable(String),
}

/// Stock and product lookups. Stock is queried fresh for every mutation.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Current stock ceiling for a product (`GET /stock/{id}`).
    async fn get_stock(&self, product_id: ProductId) -> Result<Stock, CatalogError>;

    /// Full catalog record for a product (`GET /products/{id}`).
    async fn get_product(&self, product_id: ProductId) -> Result<Product, CatalogError>;
}

/// Catalog backed by in-process tables, for demo wiring and tests.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    products: Mutex<HashMap<ProductId, Product>>,
    stock: Mutex<HashMap<ProductId, u32>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a product together with its available stock.
    pub fn insert(&self, product: Product, stock: u32) {
        self.stock.lock().unwrap().insert(product.id, stock);
        self.products.lock().unwrap().insert(product.id, product);
    }

    /// Adjusts the stock ceiling for an already registered product.
    pub fn set_stock(&self, product_id: ProductId, stock: u32) {
        self.stock.lock().unwrap().insert(product_id, stock);
    }
}

#[async_trait]
impl CatalogApi for InMemoryCatalog {
    async fn get_stock(&self, product_id: ProductId) -> Result<Stock, CatalogError> {
        self.stock
            .lock()
            .unwrap()
            .get(&product_id)
            .map(|amount| Stock::new(*amount))
            .ok_or(CatalogError::NotFound(product_id))
    }

    async fn get_product(&self, product_id: ProductId) -> Result<Product, CatalogError> {
        self.products
            .lock()
            .unwrap()
            .get(&product_id)
            .cloned()
            .ok_or(CatalogError::NotFound(product_id))
    }
}

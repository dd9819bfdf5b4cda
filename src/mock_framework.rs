//! # Mock Framework
//!
//! Test doubles for the cart actor's collaborators.
//!
//! [`MockCatalog`] is a seeded in-memory catalog with switchable outage
//! injection per lookup kind. [`RecordingNotifier`] captures every user-facing
//! message so tests can assert on exactly what would have been shown.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::catalog::{CatalogApi, CatalogError, InMemoryCatalog};
use crate::domain::{Product, ProductId, Stock};
use crate::notifier::ErrorNotifier;

/// Catalog double. Delegates to an [`InMemoryCatalog`] until a failure switch
/// is flipped, after which the corresponding lookup kind errors while the
/// other keeps working.
#[derive(Default)]
pub struct MockCatalog {
    inner: InMemoryCatalog,
    fail_stock: AtomicBool,
    fail_products: AtomicBool,
}

impl MockCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, product: Product, stock: u32) {
        self.inner.insert(product, stock);
    }

    pub fn set_stock(&self, product_id: ProductId, stock: u32) {
        self.inner.set_stock(product_id, stock);
    }

    /// Fails every subsequent stock lookup until switched back off.
    pub fn fail_stock_lookups(&self, fail: bool) {
        self.fail_stock.store(fail, Ordering::SeqCst);
    }

    /// Fails every subsequent product lookup until switched back off.
    pub fn fail_product_lookups(&self, fail: bool) {
        self.fail_products.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl CatalogApi for MockCatalog {
    async fn get_stock(&self, product_id: ProductId) -> Result<Stock, CatalogError> {
        if self.fail_stock.load(Ordering::SeqCst) {
            return Err(CatalogError::Unavailable("injected stock outage".to_string()));
        }
        self.inner.get_stock(product_id).await
    }

    async fn get_product(&self, product_id: ProductId) -> Result<Product, CatalogError> {
        if self.fail_products.load(Ordering::SeqCst) {
            return Err(CatalogError::Unavailable(
                "injected product outage".to_string(),
            ));
        }
        self.inner.get_product(product_id).await
    }
}

/// Notifier double that records every message instead of displaying it.
#[derive(Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything notified so far, oldest first.
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl ErrorNotifier for RecordingNotifier {
    fn notify_error(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_catalog_injects_stock_outages_only() {
        let catalog = MockCatalog::new();
        catalog.insert(Product::new(1, "Trail Boot", 139.9, "trail-boot.jpg"), 5);

        assert!(catalog.get_stock(1).await.is_ok());

        catalog.fail_stock_lookups(true);
        assert!(matches!(
            catalog.get_stock(1).await,
            Err(CatalogError::Unavailable(_))
        ));
        // The other lookup kind stays up.
        assert!(catalog.get_product(1).await.is_ok());

        catalog.fail_stock_lookups(false);
        assert!(catalog.get_stock(1).await.is_ok());
    }

    #[test]
    fn recording_notifier_captures_messages_in_order() {
        let notifier = RecordingNotifier::new();
        notifier.notify_error("first");
        notifier.notify_error("second");

        assert_eq!(
            notifier.messages(),
            vec!["first".to_string(), "second".to_string()]
        );
    }
}

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tracing::{debug, error, info, instrument, warn};

use crate::catalog::CatalogApi;
use crate::clients::CartClient;
use crate::domain::{CartItem, ProductId};
use crate::messages::{CartRequest, ServiceResponse};
use crate::notifier::{ErrorNotifier, ADD_FAILED, OUT_OF_STOCK, REMOVE_FAILED, UPDATE_FAILED};
use crate::storage::{CartStore, STORAGE_KEY};

use super::error::CartError;

/// Cart state manager actor. Owns the ordered line items and applies every
/// mutation through its mailbox, one message at a time, so callers only ever
/// observe fully committed snapshots.
pub struct CartService {
    receiver: mpsc::Receiver<CartRequest>,
    cart: Vec<CartItem>,
    catalog: Arc<dyn CatalogApi>,
    store: Arc<dyn CartStore>,
    notifier: Arc<dyn ErrorNotifier>,
    snapshot_tx: watch::Sender<Vec<CartItem>>,
}

impl CartService {
    /// Creates the service and its client handle. The initial cart is whatever
    /// the persisted slot holds; an absent or unreadable slot starts empty.
    pub fn new(
        buffer_size: usize,
        catalog: Arc<dyn CatalogApi>,
        store: Arc<dyn CartStore>,
        notifier: Arc<dyn ErrorNotifier>,
    ) -> (Self, CartClient) {
        let cart = Self::restore(store.as_ref());
        let (sender, receiver) = mpsc::channel(buffer_size);
        let (snapshot_tx, snapshot_rx) = watch::channel(cart.clone());

        let service = Self {
            receiver,
            cart,
            catalog,
            store,
            notifier,
            snapshot_tx,
        };
        let client = CartClient::new(sender, snapshot_rx);
        (service, client)
    }

    /// Deserializes the persisted slot. Malformed contents fall back to an
    /// empty cart with a warning instead of failing startup.
    fn restore(store: &dyn CartStore) -> Vec<CartItem> {
        let slot = match store.load(STORAGE_KEY) {
            Ok(slot) => slot,
            Err(e) => {
                warn!(error = %e, "Failed to read persisted cart, starting empty");
                return Vec::new();
            }
        };

        match slot {
            Some(snapshot) => match serde_json::from_str(&snapshot) {
                Ok(cart) => cart,
                Err(e) => {
                    warn!(error = %e, "Persisted cart is malformed, starting empty");
                    Vec::new()
                }
            },
            None => Vec::new(),
        }
    }

    /// Main actor loop: drains the mailbox until `Shutdown` or channel close.
    #[instrument(name = "cart_service", skip(self))]
    pub async fn run(mut self) {
        info!(lines = self.cart.len(), "CartService starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                CartRequest::AddProduct {
                    product_id,
                    respond_to,
                } => {
                    self.handle_add_product(product_id, respond_to).await;
                }
                CartRequest::RemoveProduct {
                    product_id,
                    respond_to,
                } => {
                    self.handle_remove_product(product_id, respond_to);
                }
                CartRequest::UpdateProductAmount {
                    product_id,
                    amount,
                    respond_to,
                } => {
                    self.handle_update_product_amount(product_id, amount, respond_to)
                        .await;
                }
                CartRequest::Shutdown => {
                    info!("CartService shutting down");
                    break;
                }
            }
        }

        info!("CartService stopped");
    }

    /// Adds one unit of a product, appending a new line item on first add.
    ///
    /// The stock ceiling is fetched fresh for every call; a candidate amount
    /// above it aborts the mutation with state unchanged.
    #[instrument(fields(product_id = %product_id), skip(self, respond_to))]
    async fn handle_add_product(
        &mut self,
        product_id: ProductId,
        respond_to: ServiceResponse<Vec<CartItem>, CartError>,
    ) {
        info!("Processing add_product request");

        let mut working = self.cart.clone();

        let stock = match self.catalog.get_stock(product_id).await {
            Ok(stock) => stock,
            Err(e) => {
                error!(error = %e, "Stock lookup failed");
                self.notifier.notify_error(ADD_FAILED);
                let _ = respond_to.send(Err(CartError::Lookup(e)));
                return;
            }
        };

        let current_amount = working
            .iter()
            .find(|item| item.id == product_id)
            .map(|item| item.amount)
            .unwrap_or(0);
        let candidate = current_amount.saturating_add(1);

        if candidate > stock.amount {
            info!(
                requested = candidate,
                available = stock.amount,
                "Stock ceiling reached"
            );
            self.notifier.notify_error(OUT_OF_STOCK);
            let _ = respond_to.send(Err(CartError::StockExceeded {
                requested: candidate,
                available: stock.amount,
            }));
            return;
        }

        if let Some(item) = working.iter_mut().find(|item| item.id == product_id) {
            item.amount = candidate;
        } else {
            let product = match self.catalog.get_product(product_id).await {
                Ok(product) => product,
                Err(e) => {
                    error!(error = %e, "Product lookup failed");
                    self.notifier.notify_error(ADD_FAILED);
                    let _ = respond_to.send(Err(CartError::Lookup(e)));
                    return;
                }
            };
            working.push(CartItem::first(product));
        }

        self.commit(working);
        info!(amount = candidate, "Product added");
        let _ = respond_to.send(Ok(self.cart.clone()));
    }

    /// Drops a product's line item entirely. Removing an id that is not in the
    /// cart is a failure, not a silent no-op.
    #[instrument(fields(product_id = %product_id), skip(self, respond_to))]
    fn handle_remove_product(
        &mut self,
        product_id: ProductId,
        respond_to: ServiceResponse<Vec<CartItem>, CartError>,
    ) {
        info!("Processing remove_product request");

        if !self.cart.iter().any(|item| item.id == product_id) {
            error!("Product not in cart");
            self.notifier.notify_error(REMOVE_FAILED);
            let _ = respond_to.send(Err(CartError::NotFound(product_id)));
            return;
        }

        let working: Vec<CartItem> = self
            .cart
            .iter()
            .filter(|item| item.id != product_id)
            .cloned()
            .collect();

        self.commit(working);
        info!("Product removed");
        let _ = respond_to.send(Ok(self.cart.clone()));
    }

    /// Sets a product's amount outright. Non-positive amounts are ignored.
    ///
    /// The stock check runs before the in-cart check, even for products absent
    /// from the cart: when both would fail, the stock violation is the outcome
    /// that surfaces.
    #[instrument(fields(product_id = %product_id, amount = %amount), skip(self, respond_to))]
    async fn handle_update_product_amount(
        &mut self,
        product_id: ProductId,
        amount: i64,
        respond_to: ServiceResponse<Vec<CartItem>, CartError>,
    ) {
        info!("Processing update_product_amount request");

        if amount <= 0 {
            debug!("Non-positive amount, ignoring");
            let _ = respond_to.send(Ok(self.cart.clone()));
            return;
        }

        let stock = match self.catalog.get_stock(product_id).await {
            Ok(stock) => stock,
            Err(e) => {
                error!(error = %e, "Stock lookup failed");
                self.notifier.notify_error(UPDATE_FAILED);
                let _ = respond_to.send(Err(CartError::Lookup(e)));
                return;
            }
        };

        // Amounts beyond the u32 range saturate; the ceiling check rejects them
        // together with everything else above the fetched stock.
        let requested = u32::try_from(amount).unwrap_or(u32::MAX);

        if requested > stock.amount {
            info!(
                requested,
                available = stock.amount,
                "Stock ceiling reached"
            );
            self.notifier.notify_error(OUT_OF_STOCK);
            let _ = respond_to.send(Err(CartError::StockExceeded {
                requested,
                available: stock.amount,
            }));
            return;
        }

        let mut working = self.cart.clone();
        if let Some(item) = working.iter_mut().find(|item| item.id == product_id) {
            item.amount = requested;
        } else {
            error!("Product not in cart");
            self.notifier.notify_error(UPDATE_FAILED);
            let _ = respond_to.send(Err(CartError::NotFound(product_id)));
            return;
        }

        self.commit(working);
        info!(amount = requested, "Product amount updated");
        let _ = respond_to.send(Ok(self.cart.clone()));
    }

    /// Commit: replace the in-memory cart, persist the identical snapshot,
    /// publish it to subscribers. The persistence write is never retried or
    /// rolled back; a failure only logs.
    fn commit(&mut self, next: Vec<CartItem>) {
        self.cart = next;

        match serde_json::to_string(&self.cart) {
            Ok(snapshot) => {
                if let Err(e) = self.store.save(STORAGE_KEY, &snapshot) {
                    error!(error = %e, "Failed to persist cart snapshot");
                }
            }
            Err(e) => error!(error = %e, "Failed to serialize cart snapshot"),
        }

        let _ = self.snapshot_tx.send(self.cart.clone());
    }
}

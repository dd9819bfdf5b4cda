use tracing::{error, info};
use crate::cart_actor::CartService;
use crate::catalog::CatalogApi;
use crate::clients::CartClient;
use crate::notifier::ErrorNotifier;
use crate::storage::CartStore;
use std::sync::Arc;

/// Mailbox depth for the cart actor.
const CART_MAILBOX: usize = 32;

/// The assembled cart system: one cart actor running against the injected
/// catalog, store, and notifier, plus the client handle for callers.
///
/// Responsible for wiring the collaborators together, spawning the actor, and
/// handling shutdown. Each instance is independent; nothing is process-global.
pub struct CartSystem {
    pub cart_client: CartClient,
    handle: tokio::task::JoinHandle<()>,
}

impl CartSystem {
    pub fn new(
        catalog: Arc<dyn CatalogApi>,
        store: Arc<dyn CartStore>,
        notifier: Arc<dyn ErrorNotifier>,
    ) -> Self {
        let (service, cart_client) = CartService::new(CART_MAILBOX, catalog, store, notifier);
        let handle = tokio::spawn(service.run());

        Self {
            cart_client,
            handle,
        }
    }

    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down cart system...");

        // A closed mailbox means the actor already stopped; that is fine here.
        if let Err(e) = self.cart_client.shutdown().await {
            error!(error = %e, "Cart actor unreachable during shutdown");
        }
        drop(self.cart_client);

        if let Err(e) = self.handle.await {
            error!("Actor task failed: {:?}", e);
            return Err(format!("Actor task failed: {:?}", e));
        }

        info!("Cart system shutdown complete.");
        Ok(())
    }
}

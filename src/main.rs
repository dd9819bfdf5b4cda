mod domain;
mod clients;
mod messages;

mod app_system;

#[cfg(test)]
mod mock_framework;

mod cart_actor;
mod catalog;
mod notifier;
mod storage;

use std::sync::Arc;

use tracing::{info, Instrument};
use crate::app_system::{CartSystem, setup_tracing};
use crate::catalog::InMemoryCatalog;
use crate::domain::{cart_total, cart_units, Product};
use crate::notifier::LogNotifier;
use crate::storage::FileStore;

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    info!("Starting application with complete cart system");

    // Seed the catalog the way the remote store would serve it.
    let catalog = Arc::new(InMemoryCatalog::new());
    catalog.insert(Product::new(1, "Trail Boot", 139.9, "trail-boot.jpg"), 3);
    catalog.insert(Product::new(2, "Court Sneaker", 99.5, "court-sneaker.jpg"), 5);
    catalog.insert(Product::new(3, "Desert Runner", 219.0, "desert-runner.jpg"), 1);

    // Fresh slot directory per run, so the walkthrough always starts empty.
    let data_dir = std::env::temp_dir().join(format!("cart-system-demo-{}", std::process::id()));
    let store = Arc::new(FileStore::open(&data_dir).map_err(|e| e.to_string())?);
    info!(path = %data_dir.display(), "Cart slot stored on disk");

    let system = CartSystem::new(catalog.clone(), store.clone(), Arc::new(LogNotifier::new()));

    // Stand-in for the UI subscription: react to every committed snapshot.
    let mut snapshots = system.cart_client.subscribe();
    tokio::spawn(async move {
        while snapshots.changed().await.is_ok() {
            let cart = snapshots.borrow_and_update().clone();
            info!(
                lines = cart.len(),
                units = cart_units(&cart),
                "Cart snapshot published"
            );
        }
    });

    let span = tracing::info_span!("shopping");
    let cart = async {
        info!("Filling the cart");
        system.cart_client.add_product(1).await.map_err(|e| e.to_string())?;
        system.cart_client.add_product(1).await.map_err(|e| e.to_string())?;
        system.cart_client.add_product(2).await.map_err(|e| e.to_string())?;
        system.cart_client.update_product_amount(2, 3).await
            .map_err(|e| e.to_string())
    }
    .instrument(span)
    .await?;

    info!(lines = cart.len(), "Cart filled");

    // Only one runner in stock: the first add fits, the second bounces off
    // the ceiling and the notifier reports it.
    system.cart_client.add_product(3).await.map_err(|e| e.to_string())?;
    match system.cart_client.add_product(3).await {
        Ok(_) => info!("Second runner fit after all"),
        Err(e) => info!(reason = %e, "Second runner was rejected"),
    }

    // Changed our mind about the runner altogether.
    system.cart_client.remove_product(3).await.map_err(|e| e.to_string())?;

    let cart = system.cart_client.cart();
    info!(
        lines = cart.len(),
        units = cart_units(&cart),
        total = cart_total(&cart),
        "Cart after shopping"
    );

    // Shutdown system gracefully
    system.shutdown().await?;

    // A new system over the same slot picks the cart right back up.
    let system = CartSystem::new(catalog, store, Arc::new(LogNotifier::new()));
    let restored = system.cart_client.cart();
    info!(
        lines = restored.len(),
        units = cart_units(&restored),
        "Cart restored from the persisted slot"
    );
    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}

use tokio::sync::oneshot;

use crate::cart_actor::CartError;
use crate::domain::{CartItem, ProductId};

/// Generic type aliases for service communication
pub type ServiceResult<T, E> = std::result::Result<T, E>;
pub type ServiceResponse<T, E> = oneshot::Sender<ServiceResult<T, E>>;

/// Typed messages for the cart actor. Every mutation carries a oneshot channel
/// answering with the committed snapshot or the structured failure.
#[derive(Debug)]
pub enum CartRequest {
    AddProduct {
        product_id: ProductId,
        respond_to: ServiceResponse<Vec<CartItem>, CartError>,
    },
    RemoveProduct {
        product_id: ProductId,
        respond_to: ServiceResponse<Vec<CartItem>, CartError>,
    },
    UpdateProductAmount {
        product_id: ProductId,
        amount: i64,
        respond_to: ServiceResponse<Vec<CartItem>, CartError>,
    },
    Shutdown,
}

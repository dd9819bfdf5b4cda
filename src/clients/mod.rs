use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, instrument};
use crate::messages::CartRequest;
use crate::domain::{CartItem, ProductId};
use crate::cart_actor::CartError;

/// Handle for talking to the cart actor. Cheap to clone; every clone shares
/// the same mailbox and snapshot channel.
#[derive(Clone)]
pub struct CartClient {
    sender: mpsc::Sender<CartRequest>,
    snapshot_rx: watch::Receiver<Vec<CartItem>>,
}

impl CartClient {
    pub fn new(
        sender: mpsc::Sender<CartRequest>,
        snapshot_rx: watch::Receiver<Vec<CartItem>>,
    ) -> Self {
        Self {
            sender,
            snapshot_rx,
        }
    }

    /// Latest committed cart snapshot. Never blocks on in-flight mutations.
    pub fn cart(&self) -> Vec<CartItem> {
        self.snapshot_rx.borrow().clone()
    }

    /// Watch channel carrying every committed snapshot, exactly one
    /// publication per state change.
    pub fn subscribe(&self) -> watch::Receiver<Vec<CartItem>> {
        self.snapshot_rx.clone()
    }

    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), CartError> {
        debug!("Sending shutdown request");
        self.sender
            .send(CartRequest::Shutdown)
            .await
            .map_err(|_| CartError::ActorCommunicationError("Actor closed".to_string()))
    }
}

// =============================================================================
// Macro for request/response mutation methods
// =============================================================================

macro_rules! client_method {
    ($client:ty => fn $method:ident($($param:ident: $param_type:ty),*) -> $return_type:ty as $request:ident::$variant:ident, Error = $error_type:ty) => {
        impl $client {
            #[instrument(skip(self))]
            pub async fn $method(&self, $($param: $param_type),*) -> Result<$return_type, $error_type> {
                debug!("Sending request");
                let (respond_to, response) = oneshot::channel();
                self.sender.send($request::$variant {
                    $($param,)*
                    respond_to,
                }).await.map_err(|_| <$error_type>::ActorCommunicationError("Actor closed".to_string()))?;

                response.await.map_err(|_| <$error_type>::ActorCommunicationError("Actor dropped".to_string()))?
            }
        }
    };
}

client_method!(CartClient => fn add_product(product_id: ProductId) -> Vec<CartItem> as CartRequest::AddProduct, Error = CartError);
client_method!(CartClient => fn remove_product(product_id: ProductId) -> Vec<CartItem> as CartRequest::RemoveProduct, Error = CartError);
client_method!(CartClient => fn update_product_amount(product_id: ProductId, amount: i64) -> Vec<CartItem> as CartRequest::UpdateProductAmount, Error = CartError);

//! Session-backed cart persistence.
//!
//! The cart is serialized into the Postgres-backed session on every mutation
//! and rehydrated on every request. Loading fails open: a missing or corrupt
//! stored value yields an empty cart rather than an error, so a bad session
//! can never take the shop down for that customer.

use tower_sessions::Session;

use drippss_core::cart::Cart;

use crate::error::{AppError, Result};
use crate::models::session_keys;

/// Load the cart from the session, failing open to an empty cart.
pub async fn load_cart(session: &Session) -> Cart {
    match session.get::<Cart>(session_keys::CART).await {
        Ok(Some(cart)) => cart,
        Ok(None) => Cart::new(),
        Err(e) => {
            tracing::warn!("Discarding unreadable session cart: {e}");
            Cart::new()
        }
    }
}

/// Persist the cart to the session.
///
/// # Errors
///
/// Returns `AppError::Internal` if the session store rejects the write; the
/// mutation is not acknowledged to the client in that case.
pub async fn save_cart(session: &Session, cart: &Cart) -> Result<()> {
    session
        .insert(session_keys::CART, cart)
        .await
        .map_err(|e| AppError::Internal(format!("failed to persist cart: {e}")))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tower_sessions::MemoryStore;

    use drippss_core::ProductId;

    use super::*;

    fn in_memory_session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    #[tokio::test]
    async fn missing_cart_loads_empty() {
        let session = in_memory_session();
        assert!(load_cart(&session).await.is_empty());
    }

    #[tokio::test]
    async fn corrupt_stored_value_loads_empty() {
        let session = in_memory_session();
        session
            .insert(session_keys::CART, "definitely not a cart")
            .await
            .expect("insert");

        // Fail open: a bad stored value must never surface as an error.
        assert!(load_cart(&session).await.is_empty());
    }

    #[tokio::test]
    async fn saved_cart_round_trips() {
        let session = in_memory_session();
        let mut cart = Cart::new();
        cart.add_item(ProductId::new(1), 2, Some("M".into()));

        save_cart(&session, &cart).await.expect("save");
        assert_eq!(load_cart(&session).await, cart);
    }
}

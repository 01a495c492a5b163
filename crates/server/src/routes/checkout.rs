//! Checkout route.

use axum::{Json, extract::State};
use tower_sessions::Session;

use drippss_core::checkout::CustomerDetails;

use crate::cart::{load_cart, save_cart};
use crate::error::Result;
use crate::middleware::OptionalAuth;
use crate::models::order::OrderWithItems;
use crate::services::checkout::CheckoutService;
use crate::state::AppState;

/// `POST /checkout` - place an order from the session cart.
///
/// Guests can check out; a logged-in customer's order is linked to their
/// account. The cart is cleared only after the order commit succeeds, so a
/// failed attempt can simply be retried.
pub async fn place_order(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    session: Session,
    Json(details): Json<CustomerDetails>,
) -> Result<Json<OrderWithItems>> {
    let mut cart = load_cart(&session).await;

    let service = CheckoutService::new(state.pool(), state.dashboard_cache());
    let order = service
        .place_order(&cart, user.map(|u| u.id), &details)
        .await?;

    cart.clear();
    save_cart(&session, &cart).await?;

    Ok(Json(order))
}

//! Session cart routes.
//!
//! Every mutation returns the freshly priced cart, so the client never has to
//! recompute totals. The priced view is always rebuilt from the live catalog.

use axum::{Json, extract::State};
use serde::Deserialize;
use tower_sessions::Session;

use drippss_core::ProductId;

use crate::cart::{load_cart, save_cart};
use crate::error::Result;
use crate::services::checkout::{CheckoutService, PricedCart};
use crate::state::AppState;

/// Body for adding a line to the cart.
#[derive(Debug, Deserialize)]
pub struct AddForm {
    pub product_id: ProductId,
    pub quantity: u32,
    pub size: Option<String>,
}

/// Body for setting a line's quantity or removing a line.
#[derive(Debug, Deserialize)]
pub struct LineForm {
    pub product_id: ProductId,
    #[serde(default)]
    pub quantity: u32,
    pub size: Option<String>,
}

async fn priced(state: &AppState, cart: &drippss_core::cart::Cart) -> Result<PricedCart> {
    let service = CheckoutService::new(state.pool(), state.dashboard_cache());
    Ok(service.price_cart(cart).await?)
}

/// `GET /cart` - the priced cart.
pub async fn show(State(state): State<AppState>, session: Session) -> Result<Json<PricedCart>> {
    let cart = load_cart(&session).await;
    Ok(Json(priced(&state, &cart).await?))
}

/// `POST /cart/add` - add a line, merging with an existing one for the same
/// product and size.
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<AddForm>,
) -> Result<Json<PricedCart>> {
    let mut cart = load_cart(&session).await;
    cart.add_item(form.product_id, form.quantity, form.size);
    save_cart(&session, &cart).await?;
    Ok(Json(priced(&state, &cart).await?))
}

/// `POST /cart/update` - set a line's quantity. A quantity below one removes
/// the line.
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<LineForm>,
) -> Result<Json<PricedCart>> {
    let mut cart = load_cart(&session).await;
    cart.update_quantity(form.product_id, form.quantity, form.size.as_deref());
    save_cart(&session, &cart).await?;
    Ok(Json(priced(&state, &cart).await?))
}

/// `POST /cart/remove` - remove a line. No-op when the line is absent.
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<LineForm>,
) -> Result<Json<PricedCart>> {
    let mut cart = load_cart(&session).await;
    cart.remove_item(form.product_id, form.size.as_deref());
    save_cart(&session, &cart).await?;
    Ok(Json(priced(&state, &cart).await?))
}

//! Account order history.

use axum::{Json, extract::State};

use crate::db::orders::{OrderFilter, OrderRepository};
use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::models::order::Order;
use crate::state::AppState;

/// `GET /account/orders` - the current user's orders, newest first.
pub async fn account_orders(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<Vec<Order>>> {
    let filter = OrderFilter {
        user_id: Some(user.id),
        ..OrderFilter::default()
    };
    let orders = OrderRepository::new(state.pool()).list(&filter).await?;
    Ok(Json(orders))
}

//! Admin order management.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use tracing::instrument;

use drippss_core::{OrderId, OrderStatus};

use crate::db::orders::{OrderFilter, OrderRepository};
use crate::error::{AppError, Result};
use crate::middleware::RequireStaff;
use crate::models::order::{Order, OrderWithItems};
use crate::state::AppState;

/// Query parameters for the admin order listing.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub status: Option<OrderStatus>,
}

/// Body for `PUT /admin/orders/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct StatusForm {
    pub status: OrderStatus,
}

/// `GET /admin/orders` - list orders, optionally filtered by status.
pub async fn index(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Order>>> {
    let filter = OrderFilter {
        status: query.status,
        ..OrderFilter::default()
    };
    let orders = OrderRepository::new(state.pool()).list(&filter).await?;
    Ok(Json(orders))
}

/// `GET /admin/orders/{id}` - one order with its item snapshots.
pub async fn show(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Path(id): Path<OrderId>,
) -> Result<Json<OrderWithItems>> {
    let order = OrderRepository::new(state.pool())
        .get_with_items(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("order {id}")))?;
    Ok(Json(order))
}

/// `PUT /admin/orders/{id}/status` - move an order through its lifecycle.
///
/// Transitions are validated against the state machine: one step forward, or
/// cancel from any non-terminal status. Anything else is a 422.
#[instrument(skip(state, staff))]
pub async fn update_status(
    State(state): State<AppState>,
    staff: RequireStaff,
    Path(id): Path<OrderId>,
    Json(form): Json<StatusForm>,
) -> Result<Json<Order>> {
    let order = OrderRepository::new(state.pool())
        .update_status(id, form.status)
        .await?;

    state.dashboard_cache().invalidate();
    tracing::info!(
        order_id = %id,
        status = %order.status,
        staff = %staff.user.email,
        "Order status updated"
    );

    Ok(Json(order))
}

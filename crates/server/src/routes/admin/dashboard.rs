//! Admin dashboard.

use axum::{Json, extract::State};
use serde::Serialize;

use crate::db::orders::StatusCount;
use crate::error::Result;
use crate::middleware::RequireStaff;
use crate::models::order::Order;
use crate::services::dashboard::{DashboardService, DashboardStats};
use crate::state::AppState;

const RECENT_ORDERS_LIMIT: i64 = 10;

/// The full dashboard payload.
#[derive(Debug, Serialize)]
pub struct Dashboard {
    pub stats: DashboardStats,
    pub orders_by_status: Vec<StatusCount>,
    pub recent_orders: Vec<Order>,
}

/// `GET /admin/dashboard` - aggregates, per-status counts, recent orders.
///
/// Revenue and the order count exclude cancelled orders; the per-status
/// breakdown still shows them.
pub async fn show(State(state): State<AppState>, _staff: RequireStaff) -> Result<Json<Dashboard>> {
    let service = DashboardService::new(state.pool(), state.dashboard_cache());

    let stats = service.stats().await?;
    let orders_by_status = service.orders_by_status().await?;
    let recent_orders = service.recent_orders(RECENT_ORDERS_LIMIT).await?;

    Ok(Json(Dashboard {
        stats,
        orders_by_status,
        recent_orders,
    }))
}

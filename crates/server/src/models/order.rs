//! Order and order item models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use sqlx::types::Json;

use drippss_core::checkout::Address;
use drippss_core::{OrderId, OrderItemId, OrderStatus, ProductId, UserId};

/// A placed order.
///
/// Totals are fixed at creation: `total = subtotal + shipping_cost` always
/// holds for persisted rows.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Order {
    pub id: OrderId,
    pub user_id: Option<UserId>,
    pub status: OrderStatus,
    pub subtotal: Decimal,
    pub shipping_cost: Decimal,
    pub total: Decimal,
    pub shipping_address: Json<Address>,
    pub billing_address: Json<Address>,
    pub customer_email: String,
    pub customer_name: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An immutable snapshot of one cart line at order time.
///
/// Product name, image, and unit price are captured by value so the order
/// history survives later edits or deletion of the product; `product_id`
/// becomes `None` if the product is deleted.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct OrderItem {
    pub id: OrderItemId,
    pub order_id: OrderId,
    pub product_id: Option<ProductId>,
    pub product_name: String,
    pub product_image: Option<String>,
    pub quantity: i32,
    pub size: Option<String>,
    pub unit_price: Decimal,
    pub total_price: Decimal,
    pub created_at: DateTime<Utc>,
}

/// An order together with its item snapshots.
#[derive(Debug, Clone, Serialize)]
pub struct OrderWithItems {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
}

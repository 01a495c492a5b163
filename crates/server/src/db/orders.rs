//! Order repository.
//!
//! Order creation writes the order row and all item snapshots in a single
//! transaction: either everything is committed or nothing is. An order with
//! zero items can never be observed as a success.

use rust_decimal::Decimal;
use sqlx::types::Json;
use sqlx::{PgPool, QueryBuilder};

use drippss_core::checkout::OrderDraft;
use drippss_core::{OrderId, OrderStatus, UserId};

use super::RepositoryError;
use crate::models::order::{Order, OrderItem, OrderWithItems};

const ORDER_COLUMNS: &str = "id, user_id, status, subtotal, shipping_cost, total, \
     shipping_address, billing_address, customer_email, customer_name, notes, \
     created_at, updated_at";

const ITEM_COLUMNS: &str = "id, order_id, product_id, product_name, product_image, \
     quantity, size, unit_price, total_price, created_at";

/// Filters for listing orders.
#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,
    pub user_id: Option<UserId>,
}

/// Counts of orders per status, for the dashboard.
#[derive(Debug, Clone, serde::Serialize)]
pub struct StatusCount {
    pub status: OrderStatus,
    pub count: i64,
}

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Persist an assembled order and its item snapshots atomically.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any statement fails; nothing is
    /// committed in that case.
    pub async fn create(
        &self,
        user_id: Option<UserId>,
        draft: &OrderDraft,
    ) -> Result<OrderWithItems, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let order = sqlx::query_as::<_, Order>(&format!(
            "INSERT INTO orders
                 (user_id, status, subtotal, shipping_cost, total,
                  shipping_address, billing_address, customer_email, customer_name, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {ORDER_COLUMNS}"
        ))
        .bind(user_id)
        .bind(draft.status)
        .bind(draft.subtotal)
        .bind(draft.shipping.cost)
        .bind(draft.total())
        .bind(Json(&draft.shipping_address))
        .bind(Json(&draft.billing_address))
        .bind(draft.customer_email.as_str())
        .bind(&draft.customer_name)
        .bind(&draft.notes)
        .fetch_one(&mut *tx)
        .await?;

        let mut items = Vec::with_capacity(draft.items.len());
        for item in &draft.items {
            let row = sqlx::query_as::<_, OrderItem>(&format!(
                "INSERT INTO order_items
                     (order_id, product_id, product_name, product_image,
                      quantity, size, unit_price, total_price)
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                 RETURNING {ITEM_COLUMNS}"
            ))
            .bind(order.id)
            .bind(item.product_id)
            .bind(&item.product_name)
            .bind(&item.product_image)
            .bind(i32::try_from(item.quantity).map_err(|_| {
                RepositoryError::DataCorruption(
                    "order item quantity exceeds storage range".to_owned(),
                )
            })?)
            .bind(&item.size)
            .bind(item.unit_price)
            .bind(item.total_price)
            .fetch_one(&mut *tx)
            .await?;
            items.push(row);
        }

        tx.commit().await?;
        Ok(OrderWithItems { order, items })
    }

    /// List orders, newest first, applying the given filters.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, filter: &OrderFilter) -> Result<Vec<Order>, RepositoryError> {
        let mut query = QueryBuilder::new(format!("SELECT {ORDER_COLUMNS} FROM orders"));
        let mut prefix = " WHERE ";

        if let Some(status) = filter.status {
            query.push(prefix).push("status = ").push_bind(status);
            prefix = " AND ";
        }
        if let Some(user_id) = filter.user_id {
            query.push(prefix).push("user_id = ").push_bind(user_id);
        }

        query.push(" ORDER BY created_at DESC");

        let orders = query.build_query_as::<Order>().fetch_all(self.pool).await?;
        Ok(orders)
    }

    /// Get an order with its item snapshots.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn get_with_items(
        &self,
        id: OrderId,
    ) -> Result<Option<OrderWithItems>, RepositoryError> {
        let order = sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        let Some(order) = order else {
            return Ok(None);
        };

        let items = sqlx::query_as::<_, OrderItem>(&format!(
            "SELECT {ITEM_COLUMNS} FROM order_items WHERE order_id = $1 ORDER BY id"
        ))
        .bind(id)
        .fetch_all(self.pool)
        .await?;

        Ok(Some(OrderWithItems { order, items }))
    }

    /// Apply a staff-initiated status transition.
    ///
    /// The current status is read inside the transaction and the transition
    /// is validated against the lifecycle state machine before writing.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order does not exist and
    /// `RepositoryError::InvalidTransition` if the move is not allowed.
    pub async fn update_status(
        &self,
        id: OrderId,
        next: OrderStatus,
    ) -> Result<Order, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let current: Option<(OrderStatus,)> =
            sqlx::query_as("SELECT status FROM orders WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        let (current,) = current.ok_or(RepositoryError::NotFound)?;

        if !current.can_transition_to(next) {
            return Err(RepositoryError::InvalidTransition {
                from: current,
                to: next,
            });
        }

        let order = sqlx::query_as::<_, Order>(&format!(
            "UPDATE orders SET status = $2, updated_at = now()
             WHERE id = $1
             RETURNING {ORDER_COLUMNS}"
        ))
        .bind(id)
        .bind(next)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(order)
    }

    /// Total revenue and order count, excluding cancelled orders.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn revenue_and_count(&self) -> Result<(Decimal, i64), RepositoryError> {
        let row: (Decimal, i64) = sqlx::query_as(
            "SELECT COALESCE(SUM(total), 0), COUNT(*) FROM orders WHERE status <> $1",
        )
        .bind(OrderStatus::Cancelled)
        .fetch_one(self.pool)
        .await?;
        Ok(row)
    }

    /// Order counts grouped by status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn counts_by_status(&self) -> Result<Vec<StatusCount>, RepositoryError> {
        let rows: Vec<(OrderStatus, i64)> =
            sqlx::query_as("SELECT status, COUNT(*) FROM orders GROUP BY status")
                .fetch_all(self.pool)
                .await?;
        // Every status appears in the result, even with zero orders.
        let counts = OrderStatus::ALL
            .into_iter()
            .map(|status| StatusCount {
                status,
                count: rows
                    .iter()
                    .find(|(s, _)| *s == status)
                    .map_or(0, |(_, count)| *count),
            })
            .collect();
        Ok(counts)
    }

    /// The most recent orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn recent(&self, limit: i64) -> Result<Vec<Order>, RepositoryError> {
        let orders = sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders ORDER BY created_at DESC LIMIT $1"
        ))
        .bind(limit)
        .fetch_all(self.pool)
        .await?;
        Ok(orders)
    }
}

//! Dashboard aggregates with explicit cache invalidation.
//!
//! Aggregate queries (revenue, counts) are cached briefly so the admin
//! dashboard doesn't hammer the database. Invalidation is an explicit call
//! made by the mutations that change the underlying data (placing an order,
//! editing the catalog), not a hidden framework side effect.

use std::time::Duration;

use moka::future::Cache;
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::PgPool;

use crate::db::RepositoryError;
use crate::db::orders::{OrderRepository, StatusCount};
use crate::db::products::ProductRepository;
use crate::db::users::UserRepository;
use crate::models::order::Order;

/// Aggregate numbers shown at the top of the admin dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardStats {
    pub total_revenue: Decimal,
    pub total_orders: i64,
    pub total_products: i64,
    pub total_customers: i64,
}

/// Cache for [`DashboardStats`]. A single entry with a short lifetime.
#[derive(Clone)]
pub struct DashboardCache {
    stats: Cache<(), DashboardStats>,
}

const STATS_TTL: Duration = Duration::from_secs(60);

impl DashboardCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self {
            stats: Cache::builder()
                .max_capacity(1)
                .time_to_live(STATS_TTL)
                .build(),
        }
    }

    /// Drop the cached aggregates.
    ///
    /// Called by every mutation that changes orders, products, or users, so
    /// the dashboard reflects the write on its next load.
    pub fn invalidate(&self) {
        self.stats.invalidate_all();
    }
}

impl Default for DashboardCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Dashboard aggregation service.
pub struct DashboardService<'a> {
    pool: &'a PgPool,
    cache: &'a DashboardCache,
}

impl<'a> DashboardService<'a> {
    /// Create a new dashboard service.
    #[must_use]
    pub const fn new(pool: &'a PgPool, cache: &'a DashboardCache) -> Self {
        Self { pool, cache }
    }

    /// Headline stats: revenue and order count exclude cancelled orders.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if an aggregate query fails.
    pub async fn stats(&self) -> Result<DashboardStats, RepositoryError> {
        if let Some(stats) = self.cache.stats.get(&()).await {
            return Ok(stats);
        }

        let (total_revenue, total_orders) =
            OrderRepository::new(self.pool).revenue_and_count().await?;
        let total_products = ProductRepository::new(self.pool).count().await?;
        let total_customers = UserRepository::new(self.pool).count().await?;

        let stats = DashboardStats {
            total_revenue,
            total_orders,
            total_products,
            total_customers,
        };
        self.cache.stats.insert((), stats.clone()).await;
        Ok(stats)
    }

    /// Order counts per status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the query fails.
    pub async fn orders_by_status(&self) -> Result<Vec<StatusCount>, RepositoryError> {
        OrderRepository::new(self.pool).counts_by_status().await
    }

    /// The most recent orders.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the query fails.
    pub async fn recent_orders(&self, limit: i64) -> Result<Vec<Order>, RepositoryError> {
        OrderRepository::new(self.pool).recent(limit).await
    }
}

//! Per-size inventory repository.
//!
//! Size rows are upserted by their `(product_id, size)` natural key, so a
//! bulk save is idempotent: repeating the same payload never duplicates rows.
//! Sizes are disabled rather than deleted.

use sqlx::PgPool;

use drippss_core::ProductId;
use drippss_core::sizes::{self, SizeRow};

use super::RepositoryError;
use crate::models::product::ProductSize;

const SIZE_COLUMNS: &str =
    "id, product_id, size, stock, is_enabled, created_at, updated_at";

/// Repository for per-size inventory operations.
pub struct SizeRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SizeRepository<'a> {
    /// Create a new size repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List a product's size rows in canonical display order.
    ///
    /// Storage order is irrelevant; the canonical ordering is applied here so
    /// every caller sees `XS..3XL` first and unknown labels last.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_product(
        &self,
        product_id: ProductId,
    ) -> Result<Vec<ProductSize>, RepositoryError> {
        let mut rows = sqlx::query_as::<_, ProductSize>(&format!(
            "SELECT {SIZE_COLUMNS} FROM product_sizes WHERE product_id = $1 ORDER BY created_at"
        ))
        .bind(product_id)
        .fetch_all(self.pool)
        .await?;

        rows.sort_by(|a, b| sizes::compare_sizes(&a.size, &b.size));
        Ok(rows)
    }

    /// Upsert the full set of size rows for a product.
    ///
    /// Conflict target is `(product_id, size)`; existing rows get the new
    /// stock and enabled flag, missing rows are created. Rows absent from the
    /// payload are left untouched.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any statement fails; the whole
    /// save runs in one transaction.
    pub async fn bulk_upsert(
        &self,
        product_id: ProductId,
        rows: &[SizeRow],
    ) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;
        for row in rows {
            sqlx::query(
                "INSERT INTO product_sizes (product_id, size, stock, is_enabled)
                 VALUES ($1, $2, $3, $4)
                 ON CONFLICT (product_id, size)
                 DO UPDATE SET stock = EXCLUDED.stock,
                               is_enabled = EXCLUDED.is_enabled,
                               updated_at = now()",
            )
            .bind(product_id)
            .bind(&row.size)
            .bind(row.stock.max(0))
            .bind(row.is_enabled)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    /// Create the default size set (`XS..XL`, zero stock, enabled) for a
    /// product with no existing rows. Idempotent: existing rows win.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the statement fails.
    pub async fn initialize_defaults(
        &self,
        product_id: ProductId,
    ) -> Result<(), RepositoryError> {
        let defaults = sizes::default_size_rows();
        let mut tx = self.pool.begin().await?;
        for row in &defaults {
            sqlx::query(
                "INSERT INTO product_sizes (product_id, size, stock, is_enabled)
                 VALUES ($1, $2, $3, $4)
                 ON CONFLICT (product_id, size) DO NOTHING",
            )
            .bind(product_id)
            .bind(&row.size)
            .bind(row.stock)
            .bind(row.is_enabled)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(())
    }
}

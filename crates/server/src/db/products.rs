//! Product repository.
//!
//! Queries are built at runtime with `QueryBuilder` because the storefront
//! listing combines several optional filters (category, featured, name
//! search, active-only).

use sqlx::{PgPool, QueryBuilder};

use drippss_core::{CategoryId, ProductId};
use rust_decimal::Decimal;

use super::RepositoryError;
use crate::models::product::Product;

/// Filters for listing products.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    /// Restrict to a category by slug.
    pub category_slug: Option<String>,
    /// Only featured products.
    pub featured: bool,
    /// Case-insensitive substring match on the product name.
    pub search: Option<String>,
    /// Include inactive products (admin listings).
    pub include_inactive: bool,
}

/// Fields for creating or updating a product.
#[derive(Debug, Clone)]
pub struct ProductInput {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub compare_at_price: Option<Decimal>,
    pub image_url: Option<String>,
    pub images: Vec<String>,
    pub category_id: Option<CategoryId>,
    pub stock: i32,
    pub is_featured: bool,
    pub is_active: bool,
    pub shipping_price: Option<Decimal>,
}

const PRODUCT_COLUMNS: &str = "id, name, slug, description, price, compare_at_price, image_url, \
     images, category_id, stock, is_featured, is_active, shipping_price, created_at, updated_at";

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List products, newest first, applying the given filters.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, filter: &ProductFilter) -> Result<Vec<Product>, RepositoryError> {
        let mut query = QueryBuilder::new(format!("SELECT {PRODUCT_COLUMNS} FROM products"));
        let mut prefix = " WHERE ";

        if !filter.include_inactive {
            query.push(prefix).push("is_active = TRUE");
            prefix = " AND ";
        }
        if let Some(slug) = &filter.category_slug {
            query
                .push(prefix)
                .push("category_id = (SELECT id FROM categories WHERE slug = ")
                .push_bind(slug.clone())
                .push(")");
            prefix = " AND ";
        }
        if filter.featured {
            query.push(prefix).push("is_featured = TRUE");
            prefix = " AND ";
        }
        if let Some(search) = &filter.search {
            query
                .push(prefix)
                .push("name ILIKE ")
                .push_bind(format!("%{search}%"));
        }

        query.push(" ORDER BY created_at DESC");

        let products = query
            .build_query_as::<Product>()
            .fetch_all(self.pool)
            .await?;
        Ok(products)
    }

    /// Get a product by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;
        Ok(product)
    }

    /// Get a product by its URL slug.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<Product>, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE slug = $1"
        ))
        .bind(slug)
        .fetch_optional(self.pool)
        .await?;
        Ok(product)
    }

    /// Fetch the products referenced by the given IDs.
    ///
    /// Missing IDs are silently absent from the result; the cart treats
    /// vanished products as removed lines.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_many(&self, ids: &[ProductId]) -> Result<Vec<Product>, RepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let raw: Vec<i32> = ids.iter().map(|id| id.as_i32()).collect();
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ANY($1)"
        ))
        .bind(&raw)
        .fetch_all(self.pool)
        .await?;
        Ok(products)
    }

    /// Create a product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the slug is already taken.
    pub async fn create(&self, input: &ProductInput) -> Result<Product, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "INSERT INTO products
                 (name, slug, description, price, compare_at_price, image_url, images,
                  category_id, stock, is_featured, is_active, shipping_price)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(&input.name)
        .bind(&input.slug)
        .bind(&input.description)
        .bind(input.price)
        .bind(input.compare_at_price)
        .bind(&input.image_url)
        .bind(&input.images)
        .bind(input.category_id)
        .bind(input.stock)
        .bind(input.is_featured)
        .bind(input.is_active)
        .bind(input.shipping_price)
        .fetch_one(self.pool)
        .await
        .map_err(conflict_on_unique("product slug already exists"))?;
        Ok(product)
    }

    /// Update a product in full.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product does not exist and
    /// `RepositoryError::Conflict` if the new slug is already taken.
    pub async fn update(
        &self,
        id: ProductId,
        input: &ProductInput,
    ) -> Result<Product, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "UPDATE products SET
                 name = $2, slug = $3, description = $4, price = $5, compare_at_price = $6,
                 image_url = $7, images = $8, category_id = $9, stock = $10,
                 is_featured = $11, is_active = $12, shipping_price = $13, updated_at = now()
             WHERE id = $1
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(id)
        .bind(&input.name)
        .bind(&input.slug)
        .bind(&input.description)
        .bind(input.price)
        .bind(input.compare_at_price)
        .bind(&input.image_url)
        .bind(&input.images)
        .bind(input.category_id)
        .bind(input.stock)
        .bind(input.is_featured)
        .bind(input.is_active)
        .bind(input.shipping_price)
        .fetch_optional(self.pool)
        .await
        .map_err(conflict_on_unique("product slug already exists"))?;
        product.ok_or(RepositoryError::NotFound)
    }

    /// Delete a product. Order items keep their snapshot; their product
    /// reference is set to NULL by the foreign key.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product does not exist.
    pub async fn delete(&self, id: ProductId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    /// Count all products (dashboard aggregate).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM products")
            .fetch_one(self.pool)
            .await?;
        Ok(count.0)
    }
}

/// Map unique-constraint violations to `Conflict`, everything else to `Database`.
fn conflict_on_unique(message: &'static str) -> impl Fn(sqlx::Error) -> RepositoryError {
    move |e| {
        if let sqlx::Error::Database(ref db_err) = e
            && db_err.is_unique_violation()
        {
            return RepositoryError::Conflict(message.to_owned());
        }
        RepositoryError::Database(e)
    }
}

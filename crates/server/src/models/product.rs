//! Product and per-size inventory models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

use drippss_core::sizes::SizeRow;
use drippss_core::{CategoryId, ProductId, ProductSizeId};

/// A catalog product.
///
/// `stock` is the flat fallback quantity, used only when the product has no
/// enabled size rows.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Product {
    pub id: ProductId,
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
    /// Per-unit shipping override; `None` uses the default shipping cost.
    pub shipping_price: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Whether the product is shown with a sale badge.
    #[must_use]
    pub fn is_on_sale(&self) -> bool {
        drippss_core::pricing::discount_percent(self.price, self.compare_at_price).is_some()
    }
}

/// One size's stock record for a product.
///
/// Rows are upserted by `(product_id, size)` and disabled rather than
/// deleted.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ProductSize {
    pub id: ProductSizeId,
    pub product_id: ProductId,
    pub size: String,
    pub stock: i32,
    pub is_enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProductSize {
    /// The pure inventory view of this row.
    #[must_use]
    pub fn as_size_row(&self) -> SizeRow {
        SizeRow {
            size: self.size.clone(),
            stock: self.stock,
            is_enabled: self.is_enabled,
        }
    }
}

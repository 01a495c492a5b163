//! Storefront catalog routes.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use drippss_core::pricing;
use drippss_core::sizes::{self, SizeRow};

use crate::db::categories::CategoryRepository;
use crate::db::products::{ProductFilter, ProductRepository};
use crate::db::sizes::SizeRepository;
use crate::error::{AppError, Result};
use crate::models::category::Category;
use crate::models::product::Product;
use crate::state::AppState;

/// Query parameters for the product listing.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Restrict to a category by slug.
    pub category: Option<String>,
    /// Only featured products.
    #[serde(default)]
    pub featured: bool,
    /// Case-insensitive name search.
    pub q: Option<String>,
}

/// A product as shown in storefront listings.
#[derive(Debug, Serialize)]
pub struct ProductCard {
    #[serde(flatten)]
    pub product: Product,
    pub price_display: String,
    /// Percentage off, shown only when the compare-at price is higher.
    pub discount_percent: Option<u32>,
}

impl ProductCard {
    fn from_product(product: Product) -> Self {
        let price_display = pricing::format_currency(product.price);
        let discount_percent =
            pricing::discount_percent(product.price, product.compare_at_price);
        Self {
            product,
            price_display,
            discount_percent,
        }
    }
}

/// One size option on the product page.
#[derive(Debug, Serialize)]
pub struct SizeOption {
    pub size: String,
    pub is_purchasable: bool,
    /// Preselected on the product page.
    pub is_default: bool,
}

/// Full product detail: card fields plus size availability.
#[derive(Debug, Serialize)]
pub struct ProductDetail {
    #[serde(flatten)]
    pub card: ProductCard,
    pub category: Option<Category>,
    /// Size options in canonical display order. Empty for flat-stock products.
    pub sizes: Vec<SizeOption>,
    /// Quantity limit for the default selection.
    pub max_purchasable: i32,
}

/// `GET /products` - list active products.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<ProductCard>>> {
    let filter = ProductFilter {
        category_slug: query.category,
        featured: query.featured,
        search: query.q,
        include_inactive: false,
    };
    let products = ProductRepository::new(state.pool()).list(&filter).await?;
    Ok(Json(
        products.into_iter().map(ProductCard::from_product).collect(),
    ))
}

/// `GET /products/{slug}` - product detail with size availability.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<ProductDetail>> {
    let product = ProductRepository::new(state.pool())
        .get_by_slug(&slug)
        .await?
        .filter(|p| p.is_active)
        .ok_or_else(|| AppError::NotFound(format!("product '{slug}'")))?;

    let category = match product.category_id {
        Some(id) => CategoryRepository::new(state.pool()).get_by_id(id).await?,
        None => None,
    };

    let size_records = SizeRepository::new(state.pool())
        .list_for_product(product.id)
        .await?;
    let rows: Vec<SizeRow> = size_records.iter().map(|r| r.as_size_row()).collect();

    let (size_options, selected) = if sizes::uses_size_inventory(&rows) {
        let default = sizes::default_selection(&rows).map(|r| r.size.clone());
        let options = rows
            .iter()
            .filter(|row| row.is_enabled)
            .map(|row| SizeOption {
                size: row.size.clone(),
                is_purchasable: row.is_purchasable(),
                is_default: Some(&row.size) == default.as_ref(),
            })
            .collect();
        (options, default)
    } else {
        (Vec::new(), None)
    };

    let max = sizes::max_purchasable(&rows, selected.as_deref(), product.stock);

    Ok(Json(ProductDetail {
        card: ProductCard::from_product(product),
        category,
        sizes: size_options,
        max_purchasable: max,
    }))
}

/// `GET /categories` - list all categories.
pub async fn categories(State(state): State<AppState>) -> Result<Json<Vec<Category>>> {
    let categories = CategoryRepository::new(state.pool()).list().await?;
    Ok(Json(categories))
}

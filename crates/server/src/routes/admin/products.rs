//! Admin product management.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use rust_decimal::Decimal;
use serde::Deserialize;

use drippss_core::{CategoryId, ProductId};

use crate::db::products::{ProductFilter, ProductInput, ProductRepository};
use crate::error::Result;
use crate::middleware::RequireStaff;
use crate::models::product::Product;
use crate::state::AppState;

/// Query parameters for the admin product listing.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub q: Option<String>,
}

/// Body for creating or updating a product.
#[derive(Debug, Deserialize)]
pub struct ProductForm {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub compare_at_price: Option<Decimal>,
    pub image_url: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    pub category_id: Option<CategoryId>,
    #[serde(default)]
    pub stock: i32,
    #[serde(default)]
    pub is_featured: bool,
    /// New products default to active.
    #[serde(default = "default_true")]
    pub is_active: bool,
    pub shipping_price: Option<Decimal>,
}

const fn default_true() -> bool {
    true
}

impl ProductForm {
    fn into_input(self) -> ProductInput {
        ProductInput {
            name: self.name,
            slug: self.slug,
            description: self.description,
            price: self.price,
            compare_at_price: self.compare_at_price,
            image_url: self.image_url,
            images: self.images,
            category_id: self.category_id,
            stock: self.stock.max(0),
            is_featured: self.is_featured,
            is_active: self.is_active,
            shipping_price: self.shipping_price,
        }
    }
}

/// `GET /admin/products` - list all products, inactive included.
pub async fn index(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Product>>> {
    let filter = ProductFilter {
        search: query.q,
        include_inactive: true,
        ..ProductFilter::default()
    };
    let products = ProductRepository::new(state.pool()).list(&filter).await?;
    Ok(Json(products))
}

/// `POST /admin/products` - create a product.
pub async fn create(
    State(state): State<AppState>,
    staff: RequireStaff,
    Json(form): Json<ProductForm>,
) -> Result<(StatusCode, Json<Product>)> {
    let product = ProductRepository::new(state.pool())
        .create(&form.into_input())
        .await?;

    state.dashboard_cache().invalidate();
    tracing::info!(
        product_id = %product.id,
        staff = %staff.user.email,
        "Product created"
    );

    Ok((StatusCode::CREATED, Json(product)))
}

/// `PUT /admin/products/{id}` - update a product in full.
pub async fn update(
    State(state): State<AppState>,
    staff: RequireStaff,
    Path(id): Path<ProductId>,
    Json(form): Json<ProductForm>,
) -> Result<Json<Product>> {
    let product = ProductRepository::new(state.pool())
        .update(id, &form.into_input())
        .await?;

    state.dashboard_cache().invalidate();
    tracing::info!(product_id = %id, staff = %staff.user.email, "Product updated");

    Ok(Json(product))
}

/// `DELETE /admin/products/{id}` - delete a product.
///
/// Past order items keep their snapshots; only their product link is cleared.
pub async fn delete(
    State(state): State<AppState>,
    staff: RequireStaff,
    Path(id): Path<ProductId>,
) -> Result<StatusCode> {
    ProductRepository::new(state.pool()).delete(id).await?;

    state.dashboard_cache().invalidate();
    tracing::info!(product_id = %id, staff = %staff.user.email, "Product deleted");

    Ok(StatusCode::NO_CONTENT)
}

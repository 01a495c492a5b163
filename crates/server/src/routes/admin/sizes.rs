//! Admin per-size inventory management.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;

use drippss_core::ProductId;
use drippss_core::sizes::SizeRow;

use crate::db::products::ProductRepository;
use crate::db::sizes::SizeRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireStaff;
use crate::models::product::ProductSize;
use crate::state::AppState;

/// Body for the bulk size save.
#[derive(Debug, Deserialize)]
pub struct SaveForm {
    pub sizes: Vec<SizeRow>,
}

async fn require_product(state: &AppState, id: ProductId) -> Result<()> {
    ProductRepository::new(state.pool())
        .get_by_id(id)
        .await?
        .map(|_| ())
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))
}

/// `GET /admin/products/{id}/sizes` - the product's size rows in canonical
/// order.
///
/// A product with no rows yet gets the default `XS..XL` set created on first
/// view, so the admin always has rows to edit.
pub async fn index(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Path(id): Path<ProductId>,
) -> Result<Json<Vec<ProductSize>>> {
    require_product(&state, id).await?;

    let repo = SizeRepository::new(state.pool());
    let mut rows = repo.list_for_product(id).await?;
    if rows.is_empty() {
        repo.initialize_defaults(id).await?;
        rows = repo.list_for_product(id).await?;
    }
    Ok(Json(rows))
}

/// `PUT /admin/products/{id}/sizes` - bulk save size rows.
///
/// Each row is upserted by its `(product, size)` key, so saving the same
/// payload twice is idempotent. Negative stock is clamped to zero.
pub async fn save(
    State(state): State<AppState>,
    staff: RequireStaff,
    Path(id): Path<ProductId>,
    Json(form): Json<SaveForm>,
) -> Result<Json<Vec<ProductSize>>> {
    require_product(&state, id).await?;

    let repo = SizeRepository::new(state.pool());
    repo.bulk_upsert(id, &form.sizes).await?;

    state.dashboard_cache().invalidate();
    tracing::info!(
        product_id = %id,
        rows = form.sizes.len(),
        staff = %staff.user.email,
        "Size inventory saved"
    );

    let rows = repo.list_for_product(id).await?;
    Ok(Json(rows))
}

//! Admin category management.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;

use drippss_core::CategoryId;

use crate::db::categories::{CategoryInput, CategoryRepository};
use crate::error::Result;
use crate::middleware::RequireStaff;
use crate::models::category::Category;
use crate::state::AppState;

/// Body for creating or updating a category.
#[derive(Debug, Deserialize)]
pub struct CategoryForm {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

impl CategoryForm {
    fn into_input(self) -> CategoryInput {
        CategoryInput {
            name: self.name,
            slug: self.slug,
            description: self.description,
            image_url: self.image_url,
        }
    }
}

/// `GET /admin/categories` - list all categories.
pub async fn index(
    State(state): State<AppState>,
    _staff: RequireStaff,
) -> Result<Json<Vec<Category>>> {
    let categories = CategoryRepository::new(state.pool()).list().await?;
    Ok(Json(categories))
}

/// `POST /admin/categories` - create a category.
pub async fn create(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Json(form): Json<CategoryForm>,
) -> Result<(StatusCode, Json<Category>)> {
    let category = CategoryRepository::new(state.pool())
        .create(&form.into_input())
        .await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// `PUT /admin/categories/{id}` - update a category in full.
pub async fn update(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Path(id): Path<CategoryId>,
    Json(form): Json<CategoryForm>,
) -> Result<Json<Category>> {
    let category = CategoryRepository::new(state.pool())
        .update(id, &form.into_input())
        .await?;
    Ok(Json(category))
}

/// `DELETE /admin/categories/{id}` - delete a category.
///
/// Products in the category are not deleted; they become uncategorized.
pub async fn delete(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Path(id): Path<CategoryId>,
) -> Result<StatusCode> {
    CategoryRepository::new(state.pool()).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

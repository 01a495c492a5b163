//! Category model.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use drippss_core::CategoryId;

/// A product category.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

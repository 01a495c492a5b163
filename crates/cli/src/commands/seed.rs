//! Demo catalog seeding.
//!
//! Creates a couple of categories and products with size inventory, for local
//! development. Safe to re-run: anything already present is skipped.

use rust_decimal::Decimal;

use drippss_core::sizes::SizeRow;
use drippss_server::config::ServerConfig;
use drippss_server::db::categories::{CategoryInput, CategoryRepository};
use drippss_server::db::products::{ProductInput, ProductRepository};
use drippss_server::db::sizes::SizeRepository;
use drippss_server::db::{self, RepositoryError};

use super::CliError;

/// Seed the database with a demo catalog.
///
/// # Errors
///
/// Returns `CliError` if a write fails for a reason other than the record
/// already existing.
pub async fn run() -> Result<(), CliError> {
    let config = ServerConfig::from_env()?;
    let pool = db::create_pool(&config.database_url).await?;

    let categories = CategoryRepository::new(&pool);
    let products = ProductRepository::new(&pool);
    let sizes = SizeRepository::new(&pool);

    for input in demo_categories() {
        match categories.create(&input).await {
            Ok(category) => tracing::info!(slug = %category.slug, "Category created"),
            Err(RepositoryError::Conflict(_)) => {
                tracing::info!(slug = %input.slug, "Category exists, skipping");
            }
            Err(e) => return Err(e.into()),
        }
    }

    for (mut input, category_slug, rows) in demo_products() {
        input.category_id = categories
            .get_by_slug(category_slug)
            .await?
            .map(|category| category.id);

        let product = match products.create(&input).await {
            Ok(product) => {
                tracing::info!(slug = %product.slug, "Product created");
                product
            }
            Err(RepositoryError::Conflict(_)) => {
                tracing::info!(slug = %input.slug, "Product exists, skipping");
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        if !rows.is_empty() {
            sizes.bulk_upsert(product.id, &rows).await?;
        }
    }

    tracing::info!("Seed complete");
    Ok(())
}

fn demo_categories() -> Vec<CategoryInput> {
    vec![
        CategoryInput {
            name: "T-Shirts".to_owned(),
            slug: "t-shirts".to_owned(),
            description: Some("Heavyweight cotton tees".to_owned()),
            image_url: None,
        },
        CategoryInput {
            name: "Hoodies".to_owned(),
            slug: "hoodies".to_owned(),
            description: Some("Oversized fleece hoodies".to_owned()),
            image_url: None,
        },
    ]
}

fn sized(stocks: &[(&str, i32)]) -> Vec<SizeRow> {
    stocks
        .iter()
        .map(|&(size, stock)| SizeRow {
            size: size.to_owned(),
            stock,
            is_enabled: true,
        })
        .collect()
}

#[allow(clippy::too_many_lines)]
fn demo_products() -> Vec<(ProductInput, &'static str, Vec<SizeRow>)> {
    vec![
        (
            ProductInput {
                name: "Faded Box Tee".to_owned(),
                slug: "faded-box-tee".to_owned(),
                description: Some("Boxy fit, garment-washed".to_owned()),
                price: Decimal::new(89900, 2),
                compare_at_price: Some(Decimal::new(119900, 2)),
                image_url: None,
                images: Vec::new(),
                category_id: None,
                stock: 0,
                is_featured: true,
                is_active: true,
                shipping_price: None,
            },
            "t-shirts",
            sized(&[("S", 12), ("M", 20), ("L", 15), ("XL", 8)]),
        ),
        (
            ProductInput {
                name: "Washed Zip Hoodie".to_owned(),
                slug: "washed-zip-hoodie".to_owned(),
                description: Some("400gsm fleece, full zip".to_owned()),
                price: Decimal::new(219900, 2),
                compare_at_price: None,
                image_url: None,
                images: Vec::new(),
                category_id: None,
                stock: 0,
                is_featured: true,
                is_active: true,
                shipping_price: Some(Decimal::new(49900, 2)),
            },
            "hoodies",
            sized(&[("M", 10), ("L", 10), ("XL", 5), ("XXL", 3)]),
        ),
        (
            ProductInput {
                name: "Logo Tote".to_owned(),
                slug: "logo-tote".to_owned(),
                description: Some("One-size canvas tote".to_owned()),
                price: Decimal::new(29900, 2),
                compare_at_price: None,
                image_url: None,
                images: Vec::new(),
                category_id: None,
                // Flat stock; no size rows.
                stock: 40,
                is_featured: false,
                is_active: true,
                shipping_price: None,
            },
            "t-shirts",
            Vec::new(),
        ),
    ]
}

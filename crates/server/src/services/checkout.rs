//! Checkout service.
//!
//! Resolves the session cart against the live catalog, assembles the order
//! draft (validation, totals, item snapshots), and persists it in one
//! transaction. Only after the commit succeeds is the cart cleared, so a
//! failed order leaves the cart intact for re-submission.

use sqlx::PgPool;

use drippss_core::cart::Cart;
use drippss_core::checkout::{self, CheckoutError, CustomerDetails, ResolvedLine};
use drippss_core::pricing::{self, PricedLine, ShippingQuote};
use drippss_core::{ProductId, UserId};
use rust_decimal::Decimal;

use crate::db::RepositoryError;
use crate::db::orders::OrderRepository;
use crate::db::products::ProductRepository;
use crate::error::AppError;
use crate::models::order::OrderWithItems;
use crate::models::product::Product;
use crate::services::dashboard::DashboardCache;

/// A cart line joined with its live product, for display and checkout.
#[derive(Debug, Clone, serde::Serialize)]
pub struct PricedCartLine {
    pub product_id: ProductId,
    pub product_name: String,
    pub product_slug: String,
    pub product_image: Option<String>,
    pub quantity: u32,
    pub size: Option<String>,
    pub unit_price: Decimal,
    pub line_total: Decimal,
}

/// The cart as priced against the live catalog.
///
/// Subtotal and shipping are recomputed on every read; nothing here is
/// cached. The same [`pricing::compute_shipping`] call backs both the cart
/// summary and the checkout summary.
#[derive(Debug, Clone, serde::Serialize)]
pub struct PricedCart {
    pub lines: Vec<PricedCartLine>,
    pub item_count: u32,
    pub subtotal: Decimal,
    pub shipping: ShippingQuote,
    pub total: Decimal,
    pub subtotal_display: String,
    pub total_display: String,
}

/// Checkout service.
pub struct CheckoutService<'a> {
    pool: &'a PgPool,
    dashboard: &'a DashboardCache,
}

impl<'a> CheckoutService<'a> {
    /// Create a new checkout service.
    #[must_use]
    pub const fn new(pool: &'a PgPool, dashboard: &'a DashboardCache) -> Self {
        Self { pool, dashboard }
    }

    /// Resolve the cart's lines against the live catalog.
    ///
    /// Lines whose product has been deleted or deactivated since it was
    /// added are dropped, mirroring the cart's inert-removal semantics.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the product lookup fails.
    pub async fn resolve_lines(&self, cart: &Cart) -> Result<Vec<ResolvedLine>, RepositoryError> {
        let ids: Vec<ProductId> = cart.lines().iter().map(|line| line.product_id).collect();
        let products = ProductRepository::new(self.pool).get_many(&ids).await?;

        let find = |id: ProductId| -> Option<&Product> {
            products.iter().find(|p| p.id == id && p.is_active)
        };

        Ok(cart
            .lines()
            .iter()
            .filter_map(|line| {
                find(line.product_id).map(|product| ResolvedLine {
                    product_id: product.id,
                    product_name: product.name.clone(),
                    product_image: product.image_url.clone(),
                    unit_price: product.price,
                    shipping_price: product.shipping_price,
                    quantity: line.quantity,
                    size: line.size.clone(),
                })
            })
            .collect())
    }

    /// Price the cart for display (cart page and checkout summary).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the product lookup fails.
    pub async fn price_cart(&self, cart: &Cart) -> Result<PricedCart, RepositoryError> {
        let ids: Vec<ProductId> = cart.lines().iter().map(|line| line.product_id).collect();
        let products = ProductRepository::new(self.pool).get_many(&ids).await?;

        let mut lines = Vec::new();
        let mut priced = Vec::new();
        for line in cart.lines() {
            let Some(product) = products
                .iter()
                .find(|p| p.id == line.product_id && p.is_active)
            else {
                continue;
            };
            priced.push(PricedLine {
                quantity: line.quantity,
                unit_price: product.price,
                shipping_price: product.shipping_price,
            });
            lines.push(PricedCartLine {
                product_id: product.id,
                product_name: product.name.clone(),
                product_slug: product.slug.clone(),
                product_image: product.image_url.clone(),
                quantity: line.quantity,
                size: line.size.clone(),
                unit_price: product.price,
                line_total: product.price * Decimal::from(line.quantity),
            });
        }

        let item_count = lines.iter().map(|line| line.quantity).sum();
        let subtotal = pricing::subtotal(&priced);
        let shipping = pricing::compute_shipping(&priced, subtotal);
        let total = subtotal + shipping.cost;

        Ok(PricedCart {
            lines,
            item_count,
            subtotal,
            shipping,
            total,
            subtotal_display: pricing::format_currency(subtotal),
            total_display: pricing::format_currency(total),
        })
    }

    /// Place an order from the current cart.
    ///
    /// Validates the customer details, assembles the draft, and writes the
    /// order with its item snapshots in one transaction. The dashboard
    /// aggregates are invalidated after the commit. The caller clears the
    /// session cart only when this returns `Ok`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Checkout` for validation failures (including a
    /// cart that resolved to zero live lines) and `AppError::Database` if
    /// the write fails; no partial order is left behind in either case.
    pub async fn place_order(
        &self,
        cart: &Cart,
        user_id: Option<UserId>,
        details: &CustomerDetails,
    ) -> Result<OrderWithItems, AppError> {
        if cart.is_empty() {
            return Err(AppError::Checkout(CheckoutError::EmptyCart));
        }

        let lines = self.resolve_lines(cart).await?;
        let draft = checkout::build_order_draft(&lines, details)?;

        let order = OrderRepository::new(self.pool)
            .create(user_id, &draft)
            .await?;

        tracing::info!(
            order_id = %order.order.id,
            total = %order.order.total,
            items = order.items.len(),
            "Order placed"
        );
        self.dashboard.invalidate();

        Ok(order)
    }
}

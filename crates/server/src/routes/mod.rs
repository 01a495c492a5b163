//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (DB ping)
//!
//! # Storefront (public JSON)
//! GET  /products               - Product listing (category/featured/search filters)
//! GET  /products/{slug}        - Product detail with size availability
//! GET  /categories             - Category listing
//!
//! # Cart (session-backed)
//! GET  /cart                   - Priced cart view
//! POST /cart/add               - Add line (merges by product+size)
//! POST /cart/update            - Set line quantity (0 removes)
//! POST /cart/remove            - Remove line (no-op when absent)
//!
//! # Checkout
//! POST /checkout               - Place order from the session cart
//!
//! # Auth
//! POST /auth/register          - Email/password sign-up
//! POST /auth/login             - Sign-in
//! POST /auth/logout            - Sign-out
//! GET  /auth/me                - Current user and roles
//!
//! # Account (requires auth)
//! GET  /account/orders         - The current user's orders
//!
//! # Admin (requires staff role)
//! GET  /admin/dashboard        - Aggregates, orders by status, recent orders
//! GET  /admin/products         - Listing incl. inactive; POST creates
//! PUT  /admin/products/{id}    - Update; DELETE deletes
//! GET  /admin/products/{id}/sizes - Size inventory rows (canonical order)
//! PUT  /admin/products/{id}/sizes - Bulk size save (upsert by product+size)
//! GET  /admin/categories       - Listing; POST creates
//! PUT  /admin/categories/{id}  - Update; DELETE deletes
//! GET  /admin/orders           - Listing (status filter)
//! GET  /admin/orders/{id}      - Order with item snapshots
//! PUT  /admin/orders/{id}/status - Staff status transition
//! ```

pub mod auth;
pub mod cart;
pub mod checkout;
pub mod orders;
pub mod products;

pub mod admin;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::state::AppState;

/// Create the storefront routes router.
pub fn storefront_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(products::index))
        .route("/products/{slug}", get(products::show))
        .route("/categories", get(products::categories))
        .route("/cart", get(cart::show))
        .route("/cart/add", post(cart::add))
        .route("/cart/update", post(cart::update))
        .route("/cart/remove", post(cart::remove))
        .route("/checkout", post(checkout::place_order))
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/me", get(auth::me))
        .route("/account/orders", get(orders::account_orders))
}

/// Create the admin routes router.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(admin::dashboard::show))
        .route(
            "/products",
            get(admin::products::index).post(admin::products::create),
        )
        .route(
            "/products/{id}",
            put(admin::products::update).delete(admin::products::delete),
        )
        .route(
            "/products/{id}/sizes",
            get(admin::sizes::index).put(admin::sizes::save),
        )
        .route(
            "/categories",
            get(admin::categories::index).post(admin::categories::create),
        )
        .route(
            "/categories/{id}",
            put(admin::categories::update).delete(admin::categories::delete),
        )
        .route("/orders", get(admin::orders::index))
        .route("/orders/{id}", get(admin::orders::show))
        .route("/orders/{id}/status", put(admin::orders::update_status))
}

/// Create the full application router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(storefront_routes())
        .nest("/admin", admin_routes())
}

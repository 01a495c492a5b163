//! Admin route handlers.
//!
//! Every handler takes the [`RequireStaff`](crate::middleware::RequireStaff)
//! extractor, so an admin or manager role is checked against the database on
//! each request. Catalog and order mutations invalidate the dashboard cache.

pub mod categories;
pub mod dashboard;
pub mod orders;
pub mod products;
pub mod sizes;

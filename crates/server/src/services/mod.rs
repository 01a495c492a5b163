//! Application services.
//!
//! Services own the multi-step operations: authentication, checkout, and
//! dashboard aggregation. They are constructed explicitly from the shared
//! state and passed where needed.

pub mod auth;
pub mod checkout;
pub mod dashboard;

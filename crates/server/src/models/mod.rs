//! Data models shared across routes, services, and repositories.

pub mod category;
pub mod order;
pub mod product;
pub mod user;

use serde::{Deserialize, Serialize};

use drippss_core::UserId;

/// Keys for values stored in the session.
pub mod session_keys {
    /// The logged-in user ([`super::CurrentUser`]).
    pub const CURRENT_USER: &str = "drippss.current_user";
    /// The session cart ([`drippss_core::cart::Cart`]).
    pub const CART: &str = "drippss.cart";
}

/// The authenticated user, as stored in the session.
///
/// Roles are looked up per request rather than cached here, so revoking a
/// role takes effect without waiting for the session to expire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: UserId,
    pub email: String,
}

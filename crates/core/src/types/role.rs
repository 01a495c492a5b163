//! Application roles and the typed role set.

use serde::{Deserialize, Serialize};

/// Application role with different permission levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "app_role", rename_all = "lowercase")
)]
#[serde(rename_all = "lowercase")]
pub enum AppRole {
    /// Full access to all admin features including role management.
    Admin,
    /// Access to store management features (products, orders, inventory).
    Manager,
    /// Regular shopper account.
    Customer,
}

impl std::fmt::Display for AppRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::Manager => write!(f, "manager"),
            Self::Customer => write!(f, "customer"),
        }
    }
}

impl std::str::FromStr for AppRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "manager" => Ok(Self::Manager),
            "customer" => Ok(Self::Customer),
            _ => Err(format!("invalid role: {s}")),
        }
    }
}

/// The set of roles granted to a user.
///
/// Permission checks go through explicit predicates rather than string
/// comparisons on raw role lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleSet(Vec<AppRole>);

impl RoleSet {
    /// Create an empty role set (an anonymous or roleless user).
    #[must_use]
    pub const fn empty() -> Self {
        Self(Vec::new())
    }

    /// Whether the set contains the given role.
    #[must_use]
    pub fn has_role(&self, role: AppRole) -> bool {
        self.0.contains(&role)
    }

    /// Whether the user has full administrative access.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.has_role(AppRole::Admin)
    }

    /// Whether the user may access the admin surface (admin or manager).
    #[must_use]
    pub fn is_staff(&self) -> bool {
        self.has_role(AppRole::Admin) || self.has_role(AppRole::Manager)
    }

    /// Iterate over the granted roles.
    pub fn iter(&self) -> impl Iterator<Item = AppRole> + '_ {
        self.0.iter().copied()
    }
}

impl From<Vec<AppRole>> for RoleSet {
    fn from(mut roles: Vec<AppRole>) -> Self {
        roles.dedup();
        Self(roles)
    }
}

impl FromIterator<AppRole> for RoleSet {
    fn from_iter<T: IntoIterator<Item = AppRole>>(iter: T) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staff_is_admin_or_manager() {
        let admin = RoleSet::from(vec![AppRole::Admin]);
        let manager = RoleSet::from(vec![AppRole::Manager, AppRole::Customer]);
        let customer = RoleSet::from(vec![AppRole::Customer]);

        assert!(admin.is_staff());
        assert!(admin.is_admin());
        assert!(manager.is_staff());
        assert!(!manager.is_admin());
        assert!(!customer.is_staff());
        assert!(!RoleSet::empty().is_staff());
    }

    #[test]
    fn has_role_is_exact() {
        let set = RoleSet::from(vec![AppRole::Manager]);
        assert!(set.has_role(AppRole::Manager));
        assert!(!set.has_role(AppRole::Admin));
        assert!(!set.has_role(AppRole::Customer));
    }

    #[test]
    fn roles_parse_from_strings() {
        assert_eq!("admin".parse::<AppRole>(), Ok(AppRole::Admin));
        assert_eq!("manager".parse::<AppRole>(), Ok(AppRole::Manager));
        assert_eq!("customer".parse::<AppRole>(), Ok(AppRole::Customer));
        assert!("root".parse::<AppRole>().is_err());
    }
}

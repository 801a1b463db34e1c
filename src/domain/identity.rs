//! Signed-in identity and role model.

use serde::{Deserialize, Serialize};

/// Username that is granted the [`Role::Admin`] role (case-insensitive).
pub const ADMIN_USERNAME: &str = "admin";

/// Authorization role carried by a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Signed-in visitor without staff privileges.
    Guest,
    /// Shelter staff allowed to manage pet records.
    Admin,
}

impl Role {
    /// Derives the role for a verified username.
    #[must_use]
    pub fn for_username(username: &str) -> Self {
        if username.eq_ignore_ascii_case(ADMIN_USERNAME) {
            Self::Admin
        } else {
            Self::Guest
        }
    }

    /// Returns `true` for [`Role::Admin`].
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

/// A verified user identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Username as typed at login.
    pub username: String,
    /// Role derived from the credential.
    pub role: Role,
}

impl Identity {
    /// Creates an identity, deriving the role from the username.
    #[must_use]
    pub fn new(username: impl Into<String>) -> Self {
        let username = username.into();
        let role = Role::for_username(&username);
        Self { username, role }
    }

    /// Returns `true` if this identity carries the admin role.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_role_is_case_insensitive() {
        assert_eq!(Role::for_username("admin"), Role::Admin);
        assert_eq!(Role::for_username("Admin"), Role::Admin);
        assert_eq!(Role::for_username("ADMIN"), Role::Admin);
    }

    #[test]
    fn other_usernames_are_guests() {
        assert_eq!(Role::for_username("administrator"), Role::Guest);
        assert_eq!(Role::for_username("jane"), Role::Guest);
        assert!(!Identity::new("jane").is_admin());
    }
}

//! Credential verification.

use crate::domain::Identity;

/// Shortest password the placeholder check accepts.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Reasons a sign-in attempt is refused. The messages are shown on the
/// login form as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LoginError {
    /// Username or password left blank.
    #[error("Username and password are required")]
    MissingCredentials,

    /// The credential check failed.
    #[error("Invalid username or password (password must be at least 6 characters)")]
    InvalidCredentials,
}

/// Turns a username/password pair into a verified [`Identity`].
pub trait CredentialVerifier: Send + Sync + std::fmt::Debug {
    /// Verifies the pair.
    ///
    /// # Errors
    ///
    /// Returns a [`LoginError`] when the pair is not accepted.
    fn verify(&self, username: &str, password: &str) -> Result<Identity, LoginError>;
}

/// Accepts any non-blank username whose password has at least
/// [`MIN_PASSWORD_LEN`] characters. There is no user database. The
/// username is kept exactly as typed.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderVerifier;

impl CredentialVerifier for PlaceholderVerifier {
    fn verify(&self, username: &str, password: &str) -> Result<Identity, LoginError> {
        if username.trim().is_empty() || password.trim().is_empty() {
            return Err(LoginError::MissingCredentials);
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(LoginError::InvalidCredentials);
        }
        Ok(Identity::new(username))
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::Role;

    #[test]
    fn short_password_is_rejected() {
        assert_eq!(
            PlaceholderVerifier.verify("alice", "12345"),
            Err(LoginError::InvalidCredentials)
        );
    }

    #[test]
    fn blank_fields_are_rejected() {
        assert_eq!(
            PlaceholderVerifier.verify("", "secret123"),
            Err(LoginError::MissingCredentials)
        );
        assert_eq!(
            PlaceholderVerifier.verify("   ", "secret123"),
            Err(LoginError::MissingCredentials)
        );
        assert_eq!(
            PlaceholderVerifier.verify("alice", ""),
            Err(LoginError::MissingCredentials)
        );
        assert_eq!(
            PlaceholderVerifier.verify("bob", "      "),
            Err(LoginError::MissingCredentials)
        );
    }

    #[test]
    fn padded_admin_name_is_a_guest() {
        let Ok(identity) = PlaceholderVerifier.verify(" admin ", "secret1") else {
            panic!("padded name should sign in");
        };
        assert_eq!(identity.username, " admin ");
        assert_eq!(identity.role, Role::Guest);
    }

    #[test]
    fn admin_in_any_case_gets_admin_role() {
        for name in ["admin", "Admin", "ADMIN"] {
            let Ok(identity) = PlaceholderVerifier.verify(name, "secret1") else {
                panic!("{name} should sign in");
            };
            assert_eq!(identity.role, Role::Admin);
            assert_eq!(identity.username, name);
        }
    }

    #[test]
    fn other_users_are_guests() {
        let Ok(identity) = PlaceholderVerifier.verify("volunteer", "123456") else {
            panic!("volunteer should sign in");
        };
        assert_eq!(identity.role, Role::Guest);
        assert!(!identity.is_admin());
    }

    #[test]
    fn messages_match_login_form() {
        assert_eq!(
            LoginError::MissingCredentials.to_string(),
            "Username and password are required"
        );
        assert!(LoginError::InvalidCredentials.to_string().contains("at least 6 characters"));
    }
}

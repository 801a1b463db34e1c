//! Sign-in, session tokens and role checks.
//!
//! [`CredentialVerifier`] turns a username/password pair into an
//! [`Identity`](crate::domain::Identity); [`SessionKeys`] seals that
//! identity into a signed cookie; the [`CurrentUser`] and [`AdminUser`]
//! extractors read it back on every request.

pub mod credentials;
pub mod extract;
pub mod session;

pub use credentials::{CredentialVerifier, LoginError, PlaceholderVerifier};
pub use extract::{AdminUser, CurrentUser};
pub use session::SessionKeys;

/// Returns `true` if `url` points back into this site.
///
/// Accepts `/path` and `~/path`, rejects protocol-relative (`//host`),
/// backslash tricks (`/\host`) and anything absolute.
#[must_use]
pub fn is_local_url(url: &str) -> bool {
    if url.chars().any(char::is_control) {
        return false;
    }
    if let Some(rest) = url.strip_prefix("~/") {
        return !rest.starts_with(['/', '\\']);
    }
    match url.strip_prefix('/') {
        Some(rest) => !rest.starts_with(['/', '\\']),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_urls() {
        assert!(is_local_url("/"));
        assert!(is_local_url("/Pet/Edit/3"));
        assert!(is_local_url("/Pet?searchString=max"));
        assert!(is_local_url("~/Home"));
    }

    #[test]
    fn foreign_urls() {
        assert!(!is_local_url(""));
        assert!(!is_local_url("//evil.example"));
        assert!(!is_local_url("/\\evil.example"));
        assert!(!is_local_url("https://evil.example/"));
        assert!(!is_local_url("Pet/Create"));
        assert!(!is_local_url("/Pet\r\nLocation: x"));
    }
}

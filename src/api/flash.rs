//! One-shot notices carried across a redirect.
//!
//! A handler that redirects attaches a [`Flash`] to the response as a
//! short-lived cookie; the next page that renders takes it out of the jar
//! and clears the cookie, so each notice is shown exactly once.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};

/// Cookie carrying the pending notice.
pub const FLASH_COOKIE: &str = "shelter_flash";

/// A notice shown once on the next rendered page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    /// Text shown to the visitor.
    pub message: String,
    /// Rendered as an error rather than a confirmation.
    pub is_error: bool,
}

impl Flash {
    /// A confirmation notice.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_error: false,
        }
    }

    /// An error notice.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_error: true,
        }
    }

    /// Adds this notice to `jar`.
    #[must_use]
    pub fn attach(&self, jar: CookieJar) -> CookieJar {
        let value = match serde_json::to_vec(self) {
            Ok(json) => URL_SAFE_NO_PAD.encode(json),
            Err(e) => {
                tracing::warn!(error = %e, "flash notice dropped");
                return jar;
            }
        };
        jar.add(
            Cookie::build((FLASH_COOKIE, value))
                .path("/")
                .http_only(true)
                .same_site(SameSite::Lax)
                .build(),
        )
    }

    /// Removes the pending notice from `jar`, returning it if it decodes.
    #[must_use]
    pub fn take(jar: CookieJar) -> (CookieJar, Option<Self>) {
        let Some(cookie) = jar.get(FLASH_COOKIE) else {
            return (jar, None);
        };
        let flash = URL_SAFE_NO_PAD
            .decode(cookie.value())
            .ok()
            .and_then(|bytes| serde_json::from_slice(&bytes).ok());
        let jar = jar.remove(Cookie::build(FLASH_COOKIE).path("/").build());
        (jar, flash)
    }
}

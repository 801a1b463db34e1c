//! Signed session tokens.
//!
//! A session is a single cookie holding `base64url(claims).base64url(mac)`,
//! where the MAC is HMAC-SHA256 over the encoded claims. Nothing is tracked
//! server-side: a token is valid while its signature checks out and its
//! expiry lies in the future.

use axum_extra::extract::cookie::{Cookie, SameSite};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::domain::{Identity, Role};
use crate::error::ShelterError;

type HmacSha256 = Hmac<Sha256>;

/// Cookie carrying the session token.
pub const SESSION_COOKIE: &str = "shelter_session";

/// Longest session lifetime accepted; larger values are clamped.
pub const MAX_SESSION_TTL_DAYS: i64 = 3650;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    role: Role,
    exp: i64,
}

/// Issues and verifies session tokens.
#[derive(Clone)]
pub struct SessionKeys {
    secret: Vec<u8>,
    ttl: Duration,
    secure: bool,
}

impl std::fmt::Debug for SessionKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionKeys")
            .field("secret", &"<redacted>")
            .field("ttl", &self.ttl)
            .field("secure", &self.secure)
            .finish()
    }
}

impl SessionKeys {
    /// Creates keys signing with `secret`; sessions last `ttl_days`,
    /// clamped to `1..=MAX_SESSION_TTL_DAYS`.
    #[must_use]
    pub fn new(secret: Vec<u8>, ttl_days: i64, secure: bool) -> Self {
        Self {
            secret,
            ttl: Duration::days(ttl_days.clamp(1, MAX_SESSION_TTL_DAYS)),
            secure,
        }
    }

    /// Issues a token for `identity` expiring one lifetime from now.
    ///
    /// # Errors
    ///
    /// Returns [`ShelterError::Session`] if the claims cannot be encoded or
    /// signed.
    pub fn issue(&self, identity: &Identity) -> Result<String, ShelterError> {
        self.issue_at(identity, Utc::now())
    }

    /// Issues a token as if the current time were `now`.
    ///
    /// # Errors
    ///
    /// Returns [`ShelterError::Session`] if the claims cannot be encoded or
    /// signed.
    pub fn issue_at(&self, identity: &Identity, now: DateTime<Utc>) -> Result<String, ShelterError> {
        let expires = now
            .checked_add_signed(self.ttl)
            .ok_or_else(|| ShelterError::Session("session expiry out of range".to_string()))?;
        let claims = Claims {
            sub: identity.username.clone(),
            role: identity.role,
            exp: expires.timestamp(),
        };
        let json = serde_json::to_vec(&claims).map_err(|e| ShelterError::Session(e.to_string()))?;
        let payload = URL_SAFE_NO_PAD.encode(json);
        let mac = self.mac(payload.as_bytes())?;
        Ok(format!("{payload}.{}", URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes())))
    }

    /// Returns the identity in `token` if it is authentic and unexpired.
    #[must_use]
    pub fn verify(&self, token: &str) -> Option<Identity> {
        self.verify_at(token, Utc::now())
    }

    /// Verifies `token` as if the current time were `now`.
    #[must_use]
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Option<Identity> {
        let (payload, signature) = token.split_once('.')?;
        let signature = URL_SAFE_NO_PAD.decode(signature).ok()?;
        self.mac(payload.as_bytes()).ok()?.verify_slice(&signature).ok()?;

        let json = URL_SAFE_NO_PAD.decode(payload).ok()?;
        let claims: Claims = serde_json::from_slice(&json).ok()?;
        if claims.exp <= now.timestamp() {
            return None;
        }
        Some(Identity {
            username: claims.sub,
            role: claims.role,
        })
    }

    /// Persistent cookie holding `token`.
    #[must_use]
    pub fn cookie(&self, token: String) -> Cookie<'static> {
        Cookie::build((SESSION_COOKIE, token))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure)
            .max_age(time::Duration::seconds(self.ttl.num_seconds()))
            .build()
    }

    /// Cookie that clears the session when removed from a jar.
    #[must_use]
    pub fn removal_cookie() -> Cookie<'static> {
        Cookie::build(SESSION_COOKIE).path("/").build()
    }

    fn mac(&self, payload: &[u8]) -> Result<HmacSha256, ShelterError> {
        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .map_err(|e| ShelterError::Session(e.to_string()))?;
        mac.update(payload);
        Ok(mac)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn keys() -> SessionKeys {
        SessionKeys::new(b"test-secret-test-secret".to_vec(), 7, false)
    }

    #[test]
    fn issued_token_verifies() {
        let keys = keys();
        let Ok(token) = keys.issue(&Identity::new("Admin")) else {
            panic!("issue failed");
        };
        let Some(identity) = keys.verify(&token) else {
            panic!("token rejected");
        };
        assert_eq!(identity.username, "Admin");
        assert!(identity.is_admin());
    }

    #[test]
    fn expires_after_seven_days() {
        let keys = keys();
        let now = Utc::now();
        let Ok(token) = keys.issue_at(&Identity::new("alice"), now) else {
            panic!("issue failed");
        };
        assert!(keys.verify_at(&token, now + Duration::days(6)).is_some());
        assert!(keys.verify_at(&token, now + Duration::days(7)).is_none());
    }

    #[test]
    fn oversized_lifetime_is_clamped() {
        let keys = SessionKeys::new(b"test-secret".to_vec(), 100_000_000, false);
        let Ok(token) = keys.issue(&Identity::new("admin")) else {
            panic!("issue failed");
        };
        assert!(keys.verify(&token).is_some());
        assert_eq!(
            keys.cookie(token).max_age(),
            Some(time::Duration::days(MAX_SESSION_TTL_DAYS))
        );

        let keys = SessionKeys::new(b"test-secret".to_vec(), -5, false);
        assert_eq!(
            keys.cookie("t".to_string()).max_age(),
            Some(time::Duration::days(1))
        );
    }

    #[test]
    fn tampered_role_is_rejected() {
        let keys = keys();
        let Ok(token) = keys.issue(&Identity::new("alice")) else {
            panic!("issue failed");
        };
        let Some((_, signature)) = token.split_once('.') else {
            panic!("malformed token");
        };
        let forged_claims = Claims {
            sub: "alice".to_string(),
            role: Role::Admin,
            exp: (Utc::now() + Duration::days(7)).timestamp(),
        };
        let Ok(json) = serde_json::to_vec(&forged_claims) else {
            panic!("encode failed");
        };
        let forged = format!("{}.{signature}", URL_SAFE_NO_PAD.encode(json));
        assert!(keys.verify(&forged).is_none());
    }

    #[test]
    fn other_secret_is_rejected() {
        let Ok(token) = keys().issue(&Identity::new("alice")) else {
            panic!("issue failed");
        };
        let other = SessionKeys::new(b"another-secret".to_vec(), 7, false);
        assert!(other.verify(&token).is_none());
        assert!(other.verify("garbage").is_none());
        assert!(other.verify("a.b").is_none());
    }

    #[test]
    fn cookie_is_http_only_with_seven_day_max_age() {
        let cookie = keys().cookie("token".to_string());
        assert_eq!(cookie.name(), SESSION_COOKIE);
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.max_age(), Some(time::Duration::days(7)));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
    }
}

//! Application configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`), with defaults suitable for a local
//! single-process deployment.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::store::{ADOPTION_REQUESTS_FILE, PETS_FILE};

/// Default maximum size of an uploaded pet photo (5 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Default lifetime of a session cookie, in days.
pub const DEFAULT_SESSION_TTL_DAYS: i64 = 7;

/// Top-level application configuration.
///
/// Loaded once at startup via [`ShelterConfig::from_env`].
#[derive(Clone)]
pub struct ShelterConfig {
    /// Socket address to bind the HTTP server to (e.g. `0.0.0.0:5000`).
    pub listen_addr: SocketAddr,

    /// Directory holding `pets.json` and `adoption_requests.json`.
    pub data_dir: PathBuf,

    /// Public static root. Uploaded images live in `<web_root>/images`.
    pub web_root: PathBuf,

    /// HMAC key used to sign session cookies.
    pub session_secret: Vec<u8>,

    /// Session lifetime in days.
    pub session_ttl_days: i64,

    /// Whether cookies carry the `Secure` attribute.
    pub secure_cookies: bool,

    /// Largest accepted pet photo, in bytes.
    pub max_upload_bytes: usize,

    /// Hard limit on any request body, in bytes. Kept above
    /// `max_upload_bytes` so oversized photos reach the form validation.
    pub max_request_bytes: usize,
}

impl std::fmt::Debug for ShelterConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShelterConfig")
            .field("listen_addr", &self.listen_addr)
            .field("data_dir", &self.data_dir)
            .field("web_root", &self.web_root)
            .field("session_secret", &"<redacted>")
            .field("session_ttl_days", &self.session_ttl_days)
            .field("secure_cookies", &self.secure_cookies)
            .field("max_upload_bytes", &self.max_upload_bytes)
            .field("max_request_bytes", &self.max_request_bytes)
            .finish()
    }
}

impl ShelterConfig {
    /// Loads configuration from environment variables.
    ///
    /// Falls back to defaults when a variable is not set or does not parse.
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    /// When `SESSION_SECRET` is unset a random per-process key is generated,
    /// which invalidates all sessions on restart.
    ///
    /// # Errors
    ///
    /// Returns an error if `LISTEN_ADDR` is set but cannot be parsed as a
    /// [`SocketAddr`].
    pub fn from_env() -> Result<Self, std::net::AddrParseError> {
        dotenvy::dotenv().ok();

        let listen_addr: SocketAddr = std::env::var("LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:5000".to_string())
            .parse()?;

        let data_dir = PathBuf::from(std::env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string()));
        let web_root =
            PathBuf::from(std::env::var("WEB_ROOT").unwrap_or_else(|_| "wwwroot".to_string()));

        let session_secret = match std::env::var("SESSION_SECRET") {
            Ok(secret) if !secret.is_empty() => secret.into_bytes(),
            _ => {
                tracing::warn!("SESSION_SECRET not set, sessions will not survive a restart");
                random_secret()
            }
        };

        let max_upload_bytes = parse_env("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES);
        let max_request_bytes = parse_env("MAX_REQUEST_BYTES", DEFAULT_MAX_UPLOAD_BYTES * 12 / 5)
            .max(max_upload_bytes.saturating_add(1024 * 1024));

        Ok(Self {
            listen_addr,
            data_dir,
            web_root,
            session_secret,
            session_ttl_days: parse_env("SESSION_TTL_DAYS", DEFAULT_SESSION_TTL_DAYS),
            secure_cookies: parse_env_bool("SECURE_COOKIES", false),
            max_upload_bytes,
            max_request_bytes,
        })
    }

    /// Configuration rooted at the given directories, with defaults for
    /// everything else. Used by tests and embedders.
    #[must_use]
    pub fn for_dirs(data_dir: impl Into<PathBuf>, web_root: impl Into<PathBuf>) -> Self {
        Self {
            listen_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            data_dir: data_dir.into(),
            web_root: web_root.into(),
            session_secret: random_secret(),
            session_ttl_days: DEFAULT_SESSION_TTL_DAYS,
            secure_cookies: false,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            max_request_bytes: DEFAULT_MAX_UPLOAD_BYTES * 12 / 5,
        }
    }

    /// Path of the pet collection file.
    #[must_use]
    pub fn pets_file(&self) -> PathBuf {
        self.data_dir.join(PETS_FILE)
    }

    /// Path of the adoption-request collection file.
    #[must_use]
    pub fn adoption_requests_file(&self) -> PathBuf {
        self.data_dir.join(ADOPTION_REQUESTS_FILE)
    }

    /// Directory receiving uploaded pet photos.
    #[must_use]
    pub fn images_dir(&self) -> PathBuf {
        self.web_root.join("images")
    }
}

/// Whether `LOG_FORMAT=json` is set. Read before the subscriber exists, so
/// it is not part of [`ShelterConfig`].
#[must_use]
pub fn json_logs_requested() -> bool {
    std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"))
}

/// 32 random bytes from two v4 UUIDs.
fn random_secret() -> Vec<u8> {
    let mut secret = uuid::Uuid::new_v4().as_bytes().to_vec();
    secret.extend_from_slice(uuid::Uuid::new_v4().as_bytes());
    secret
}

/// Parses an environment variable as `T`, returning `default` on missing
/// or invalid values.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Parses an environment variable as a boolean. Accepts `"true"`, `"1"`,
/// `"false"`, `"0"` (case-insensitive). Returns `default` otherwise.
fn parse_env_bool(key: &str, default: bool) -> bool {
    match std::env::var(key).ok().as_deref().map(str::to_ascii_lowercase).as_deref() {
        Some("true" | "1") => true,
        Some("false" | "0") => false,
        _ => default,
    }
}

//! Login form and query DTOs.

use serde::Deserialize;

/// `GET /Account/Login?ReturnUrl=` query.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginQuery {
    /// Where to go after signing in.
    #[serde(rename = "ReturnUrl", alias = "returnUrl", default)]
    pub return_url: Option<String>,
}

/// `POST /Account/Login` form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    /// Username as typed.
    #[serde(default)]
    pub username: String,
    /// Password as typed.
    #[serde(default)]
    pub password: String,
    /// Where to go after signing in.
    #[serde(rename = "returnUrl", alias = "ReturnUrl", default)]
    pub return_url: Option<String>,
}

//! Request extractors for the signed-in user.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::CookieJar;

use super::session::SESSION_COOKIE;
use crate::app_state::AppState;
use crate::domain::Identity;

/// Path of the sign-in form.
pub const LOGIN_PATH: &str = "/Account/Login";

/// Path of the access-denied notice.
pub const ACCESS_DENIED_PATH: &str = "/Account/AccessDenied";

/// The session identity, if any. Never rejects.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Option<Identity>);

/// A signed-in administrator.
///
/// Visitors without a session are sent to the login form with the
/// requested path as `ReturnUrl`; signed-in non-admins are sent to the
/// access-denied notice.
#[derive(Debug, Clone)]
pub struct AdminUser(pub Identity);

/// Rejection for [`AdminUser`].
#[derive(Debug)]
pub enum AdminRejection {
    /// No valid session.
    SignInRequired {
        /// Path and query of the rejected request.
        return_url: String,
    },
    /// Session present but without the admin role.
    Forbidden,
}

impl IntoResponse for AdminRejection {
    fn into_response(self) -> Response {
        match self {
            Self::SignInRequired { return_url } => {
                let encoded: String = url::form_urlencoded::byte_serialize(return_url.as_bytes()).collect();
                Redirect::to(&format!("{LOGIN_PATH}?ReturnUrl={encoded}")).into_response()
            }
            Self::Forbidden => Redirect::to(ACCESS_DENIED_PATH).into_response(),
        }
    }
}

fn session_identity(parts: &Parts, state: &AppState) -> Option<Identity> {
    let jar = CookieJar::from_headers(&parts.headers);
    let token = jar.get(SESSION_COOKIE)?;
    state.sessions.verify(token.value())
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        Ok(Self(session_identity(parts, state)))
    }
}

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AdminRejection;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        match session_identity(parts, state) {
            Some(identity) if identity.is_admin() => Ok(Self(identity)),
            Some(identity) => {
                tracing::warn!(username = %identity.username, path = %parts.uri.path(), "admin access denied");
                Err(AdminRejection::Forbidden)
            }
            None => {
                let return_url = parts
                    .uri
                    .path_and_query()
                    .map_or_else(|| parts.uri.path().to_string(), ToString::to_string);
                Err(AdminRejection::SignInRequired { return_url })
            }
        }
    }
}

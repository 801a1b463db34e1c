//! Sign-in, sign-out and the access-denied notice.

use axum::extract::{Query, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Form, Router};
use axum_extra::extract::CookieJar;
use serde::Serialize;

use crate::api::dto::{LoginForm, LoginQuery};
use crate::app_state::AppState;
use crate::auth::{CurrentUser, SessionKeys, is_local_url};
use crate::error::ShelterError;
use crate::views::{FormError, NoData, Page, form_errors};

use super::render_page;

#[derive(Debug, Serialize)]
struct LoginPage {
    login_name: String,
    has_return_url: bool,
    return_url: String,
    has_errors: bool,
    errors: Vec<FormError>,
}

impl LoginPage {
    fn new(login_name: String, return_url: Option<String>, errors: &[String]) -> Self {
        let return_url = return_url.unwrap_or_default();
        Self {
            login_name,
            has_return_url: !return_url.is_empty(),
            return_url,
            has_errors: !errors.is_empty(),
            errors: form_errors(errors),
        }
    }
}

/// Where to send the browser after signing in: the return URL when it
/// stays on this site, the catalog otherwise.
fn post_login_target(return_url: Option<&str>) -> String {
    match return_url {
        Some(url) if is_local_url(url) => url.strip_prefix('~').unwrap_or(url).to_string(),
        _ => "/".to_string(),
    }
}

/// `GET /Account/Login` — Sign-in form.
///
/// # Errors
///
/// Returns [`ShelterError`] if the page fails to render.
pub async fn login_form(
    CurrentUser(user): CurrentUser,
    jar: CookieJar,
    Query(query): Query<LoginQuery>,
) -> Result<Response, ShelterError> {
    let page = LoginPage::new(String::new(), query.return_url, &[]);
    render_page(jar, user.as_ref(), Page::Login, "Login", &page)
}

/// `POST /Account/Login` — Verifies the credentials and sets the session
/// cookie.
///
/// # Errors
///
/// Returns [`ShelterError::Session`] if the token cannot be issued.
pub async fn login(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response, ShelterError> {
    let identity = match state.verifier.verify(&form.username, &form.password) {
        Ok(identity) => identity,
        Err(e) => {
            tracing::warn!(username = %form.username, reason = %e, "login rejected");
            let page = LoginPage::new(form.username, form.return_url, &[e.to_string()]);
            return render_page(jar, user.as_ref(), Page::Login, "Login", &page);
        }
    };

    let token = state.sessions.issue(&identity)?;
    tracing::info!(username = %identity.username, role = ?identity.role, "signed in");
    let jar = jar.add(state.sessions.cookie(token));
    let target = post_login_target(form.return_url.as_deref());
    Ok((jar, Redirect::to(&target)).into_response())
}

/// `POST /Account/Logout` — Clears the session.
pub async fn logout(CurrentUser(user): CurrentUser, jar: CookieJar) -> Response {
    if let Some(user) = user {
        tracing::info!(username = %user.username, "signed out");
    }
    let jar = jar.remove(SessionKeys::removal_cookie());
    (jar, Redirect::to("/")).into_response()
}

/// `GET /Account/AccessDenied` — Notice for signed-in non-admins.
///
/// # Errors
///
/// Returns [`ShelterError`] if the page fails to render.
pub async fn access_denied(
    CurrentUser(user): CurrentUser,
    jar: CookieJar,
) -> Result<Response, ShelterError> {
    render_page(jar, user.as_ref(), Page::AccessDenied, "Access denied", &NoData {})
}

/// Account routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/Account/Login", get(login_form).post(login))
        .route("/Account/Logout", post(logout))
        .route("/Account/AccessDenied", get(access_denied))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_target_stays_local() {
        assert_eq!(post_login_target(Some("/Pet/Edit/2")), "/Pet/Edit/2");
        assert_eq!(post_login_target(Some("~/Pet/Create")), "/Pet/Create");
        assert_eq!(post_login_target(Some("https://evil.example")), "/");
        assert_eq!(post_login_target(Some("//evil.example")), "/");
        assert_eq!(post_login_target(None), "/");
    }
}

//! Endpoint handlers organized by resource.

pub mod account;
pub mod adoption;
pub mod home;
pub mod pet;
pub mod system;

use axum::Router;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::CookieJar;
use serde::Serialize;

use crate::api::flash::Flash;
use crate::app_state::AppState;
use crate::domain::{Identity, PetId};
use crate::error::ShelterError;
use crate::views::{self, Chrome, Page};

/// Composes all resource routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(home::routes())
        .merge(pet::routes())
        .merge(adoption::routes())
        .merge(account::routes())
        .merge(system::routes())
}

/// Fallback for unknown paths.
pub async fn not_found() -> ShelterError {
    ShelterError::NotFound("page".to_string())
}

/// Renders `page` inside the layout, consuming any pending flash notice
/// from `jar`.
///
/// # Errors
///
/// Returns [`ShelterError::Template`] if rendering fails.
pub fn render_page<T: Serialize>(
    jar: CookieJar,
    user: Option<&Identity>,
    page: Page,
    title: &str,
    data: &T,
) -> Result<Response, ShelterError> {
    let (jar, flash) = Flash::take(jar);
    let chrome = Chrome::new(user, flash);
    let html = views::render(page, title, &chrome, data)?;
    Ok((jar, html).into_response())
}

/// Parses a pet id from a path segment or query value. Anything that is
/// not an id names no pet.
///
/// # Errors
///
/// Returns [`ShelterError::NotFound`] if `raw` is not a pet id.
pub fn parse_pet_id(raw: &str) -> Result<PetId, ShelterError> {
    raw.parse()
        .map_err(|_| ShelterError::NotFound(format!("pet {raw}")))
}

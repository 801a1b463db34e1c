//! Catalog and static pages.

use axum::Router;
use axum::extract::{Query, State};
use axum::response::Response;
use axum::routing::get;
use axum_extra::extract::CookieJar;
use serde::Serialize;

use crate::api::dto::CatalogQuery;
use crate::app_state::AppState;
use crate::auth::CurrentUser;
use crate::error::ShelterError;
use crate::views::{Page, PetCard};

use super::render_page;

#[derive(Debug, Serialize)]
struct CatalogPage {
    #[serde(skip_serializing_if = "Option::is_none")]
    featured: Option<PetCard>,
    search: String,
    species: String,
    has_pets: bool,
    pets: Vec<PetCard>,
}

#[derive(Debug, Serialize)]
struct PrivacyPage {
    session_ttl_days: i64,
}

/// `GET /` — Available pets, filtered by `searchString` and `species`,
/// with the pet of the week on top.
///
/// # Errors
///
/// Returns [`ShelterError`] if the page fails to render.
pub async fn index(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    jar: CookieJar,
    Query(query): Query<CatalogQuery>,
) -> Result<Response, ShelterError> {
    let catalog = state
        .shelter
        .catalog(query.search_string.as_deref(), query.species.as_deref())
        .await;
    let pets: Vec<PetCard> = catalog.pets.iter().map(PetCard::from).collect();
    let page = CatalogPage {
        featured: catalog.featured.as_ref().map(PetCard::from),
        search: query.search_string.unwrap_or_default(),
        species: query.species.unwrap_or_default(),
        has_pets: !pets.is_empty(),
        pets,
    };
    render_page(jar, user.as_ref(), Page::Catalog, "Home", &page)
}

/// `GET /Home/Privacy` — Static privacy notice.
///
/// # Errors
///
/// Returns [`ShelterError`] if the page fails to render.
pub async fn privacy(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    jar: CookieJar,
) -> Result<Response, ShelterError> {
    let page = PrivacyPage {
        session_ttl_days: state.config.session_ttl_days,
    };
    render_page(jar, user.as_ref(), Page::Privacy, "Privacy Policy", &page)
}

/// Catalog routes, including the `/Home` and `/Pet` index aliases.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/Home", get(index))
        .route("/Home/Index", get(index))
        .route("/Pet", get(index))
        .route("/Pet/Index", get(index))
        .route("/Home/Privacy", get(privacy))
}

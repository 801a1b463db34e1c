//! Adoption request form and staff inbox.

use axum::extract::{Query, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::{Form, Router};
use axum_extra::extract::CookieJar;
use serde::Serialize;

use crate::api::dto::{AdoptionForm, AdoptionQuery};
use crate::api::flash::Flash;
use crate::app_state::AppState;
use crate::auth::{AdminUser, CurrentUser};
use crate::error::ShelterError;
use crate::service::InboxEntry;
use crate::views::{FormError, Page, PetCard, form_errors};

use super::{parse_pet_id, render_page};

/// Notice shown on the catalog after a successful submission.
pub const SUBMITTED_NOTICE: &str = "Your adoption request has been submitted. We'll contact you soon.";

#[derive(Debug, Serialize)]
struct AdoptionFormPage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pet: Option<PetCard>,
    form: AdoptionForm,
    has_errors: bool,
    errors: Vec<FormError>,
}

#[derive(Debug, Serialize)]
struct InboxRow {
    id: u32,
    requested_at: String,
    pet_id: u32,
    has_pet_name: bool,
    pet_name: String,
    requester_name: String,
    email: String,
    phone: String,
    message: String,
    status: String,
}

impl From<InboxEntry> for InboxRow {
    fn from(entry: InboxEntry) -> Self {
        let request = entry.request;
        Self {
            id: request.id.get(),
            requested_at: request.requested_at.format("%Y-%m-%d %H:%M").to_string(),
            pet_id: request.pet_id.get(),
            has_pet_name: entry.pet_name.is_some(),
            pet_name: entry.pet_name.unwrap_or_default(),
            requester_name: request.requester_name,
            email: request.email,
            phone: request.phone.unwrap_or_default(),
            message: request.message.unwrap_or_default(),
            status: request.status,
        }
    }
}

#[derive(Debug, Serialize)]
struct InboxPage {
    has_requests: bool,
    requests: Vec<InboxRow>,
}

/// `GET /Adoption/Request?petId=` — Request form bound to a pet.
///
/// # Errors
///
/// Returns [`ShelterError::NotFound`] if the pet does not exist.
pub async fn request_form(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    jar: CookieJar,
    Query(query): Query<AdoptionQuery>,
) -> Result<Response, ShelterError> {
    let id = parse_pet_id(query.pet_id.as_deref().unwrap_or_default())?;
    let pet = state.shelter.pet(id).await?;
    let page = AdoptionFormPage {
        pet: Some(PetCard::from(&pet)),
        form: AdoptionForm::for_pet(id),
        has_errors: false,
        errors: Vec::new(),
    };
    render_page(jar, user.as_ref(), Page::AdoptionForm, "Adoption request", &page)
}

/// `POST /Adoption/Request` — Validates and stores the request, then
/// returns to the catalog with a notice.
///
/// # Errors
///
/// Returns [`ShelterError`] if the form page fails to render.
pub async fn submit(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    jar: CookieJar,
    Form(form): Form<AdoptionForm>,
) -> Result<Response, ShelterError> {
    let pet = match form.pet_id() {
        Some(id) => state.shelter.pets().get_by_id(id).await,
        None => None,
    };

    let mut errors = Vec::new();
    let request = match form.validate() {
        Ok(request) if pet.is_none() => {
            errors.push(format!("Pet {} is no longer available", request.pet_id));
            None
        }
        Ok(request) => Some(request),
        Err(messages) => {
            errors = messages;
            None
        }
    };

    let Some(request) = request else {
        let page = AdoptionFormPage {
            pet: pet.as_ref().map(PetCard::from),
            form,
            has_errors: true,
            errors: form_errors(&errors),
        };
        return render_page(jar, user.as_ref(), Page::AdoptionForm, "Adoption request", &page);
    };

    let stored = state.shelter.submit_adoption(request).await;
    tracing::info!(request_id = %stored.id, pet_id = %stored.pet_id, "adoption request submitted");
    let jar = Flash::success(SUBMITTED_NOTICE).attach(jar);
    Ok((jar, Redirect::to("/Pet")).into_response())
}

/// `GET /Adoption` — Every request, newest first.
///
/// # Errors
///
/// Returns [`ShelterError`] if the page fails to render.
pub async fn inbox(
    AdminUser(user): AdminUser,
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Response, ShelterError> {
    let requests: Vec<InboxRow> = state
        .shelter
        .adoption_inbox()
        .await
        .into_iter()
        .map(InboxRow::from)
        .collect();
    let page = InboxPage {
        has_requests: !requests.is_empty(),
        requests,
    };
    render_page(jar, Some(&user), Page::AdoptionList, "Adoption requests", &page)
}

/// Adoption routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/Adoption", get(inbox))
        .route("/Adoption/Request", get(request_form).post(submit))
}

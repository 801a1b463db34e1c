//! Staff pet management: create, edit, delete.
//!
//! Every handler here requires an [`AdminUser`]. Validation and photo
//! problems re-render the form with inline messages and leave the store
//! untouched.

use axum::Router;
use axum::extract::{Multipart, Path, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::get;
use axum_extra::extract::CookieJar;
use serde::Serialize;

use crate::api::dto::{PetForm, PetSubmission};
use crate::api::flash::Flash;
use crate::app_state::AppState;
use crate::auth::AdminUser;
use crate::domain::{Identity, Pet, PetId};
use crate::error::ShelterError;
use crate::views::{FormError, Page, PetCard, form_errors};

use super::{parse_pet_id, render_page};

/// Where successful pet actions land.
const PET_INDEX: &str = "/Pet";

#[derive(Debug, Serialize)]
struct PetFormPage {
    heading: &'static str,
    action: String,
    is_edit: bool,
    form: PetForm,
    has_errors: bool,
    errors: Vec<FormError>,
    has_current_image: bool,
    current_image: String,
    max_upload_mib: usize,
}

#[derive(Debug, Serialize)]
struct PetDeletePage {
    pet: PetCard,
}

/// Which form is being rendered.
#[derive(Debug, Clone, Copy)]
enum FormMode {
    Create,
    Edit(PetId),
}

fn form_page(
    state: &AppState,
    mode: FormMode,
    form: PetForm,
    current_image: Option<&str>,
    errors: &[String],
) -> PetFormPage {
    let (heading, action, is_edit) = match mode {
        FormMode::Create => ("Add a pet", "/Pet/Create".to_string(), false),
        FormMode::Edit(id) => ("Edit pet", format!("/Pet/Edit/{id}"), true),
    };
    let current_image = current_image.unwrap_or_default().to_string();
    PetFormPage {
        heading,
        action,
        is_edit,
        form,
        has_errors: !errors.is_empty(),
        errors: form_errors(errors),
        has_current_image: !current_image.is_empty(),
        current_image,
        max_upload_mib: state.config.max_upload_bytes / (1024 * 1024),
    }
}

fn render_form(
    jar: CookieJar,
    user: &Identity,
    page: &PetFormPage,
) -> Result<Response, ShelterError> {
    render_page(jar, Some(user), Page::PetForm, page.heading, page)
}

fn redirect_with(jar: CookieJar, flash: &Flash, to: &str) -> Response {
    (flash.attach(jar), Redirect::to(to)).into_response()
}

/// `GET /Pet/Create` — Empty pet form.
///
/// # Errors
///
/// Returns [`ShelterError`] if the page fails to render.
pub async fn create_form(
    AdminUser(user): AdminUser,
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Response, ShelterError> {
    let page = form_page(&state, FormMode::Create, PetForm::blank(), None, &[]);
    render_form(jar, &user, &page)
}

/// `POST /Pet/Create` — Validates the form, stores the photo, then adds
/// the pet.
///
/// # Errors
///
/// Returns [`ShelterError`] if the multipart body is malformed or a page
/// fails to render.
pub async fn create(
    AdminUser(user): AdminUser,
    State(state): State<AppState>,
    jar: CookieJar,
    multipart: Multipart,
) -> Result<Response, ShelterError> {
    let max = state.config.max_upload_bytes;
    let submission = PetSubmission::from_multipart(multipart, max).await?;

    let (draft, mut errors) = match submission.form.validate() {
        Ok(pet) => (Some(pet), Vec::new()),
        Err(errors) => (None, errors),
    };
    errors.extend(submission.photo_errors(true, max));

    let (Some(draft), Some(photo), true) = (draft, submission.photo.as_ref(), errors.is_empty())
    else {
        let page = form_page(&state, FormMode::Create, submission.form, None, &errors);
        return render_form(jar, &user, &page);
    };

    match state.shelter.create_pet(draft, photo).await {
        Ok(pet) => {
            tracing::info!(pet_id = %pet.id, username = %user.username, "pet created");
            Ok(redirect_with(jar, &Flash::success(format!("{} was added.", pet.name)), PET_INDEX))
        }
        Err(e) => {
            tracing::error!(error = %e, "pet creation failed");
            let errors = [format!("An error occurred: {}", e.public_message())];
            let page = form_page(&state, FormMode::Create, submission.form, None, &errors);
            render_form(jar, &user, &page)
        }
    }
}

/// `GET /Pet/Edit/{id}` — Form pre-filled with the pet.
///
/// # Errors
///
/// Returns [`ShelterError::NotFound`] if the pet does not exist.
pub async fn edit_form(
    AdminUser(user): AdminUser,
    State(state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<String>,
) -> Result<Response, ShelterError> {
    let id = parse_pet_id(&id)?;
    let pet = state.shelter.pet(id).await?;
    let page = form_page(
        &state,
        FormMode::Edit(id),
        PetForm::from(&pet),
        pet.image_path.as_deref(),
        &[],
    );
    render_form(jar, &user, &page)
}

/// `POST /Pet/Edit/{id}` — Replaces the pet. Without a new photo the
/// current image is kept.
///
/// # Errors
///
/// Returns [`ShelterError::BadRequest`] if the form id differs from the
/// path id, [`ShelterError::NotFound`] if the pet does not exist.
pub async fn edit(
    AdminUser(user): AdminUser,
    State(state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<Response, ShelterError> {
    let max = state.config.max_upload_bytes;
    let submission = PetSubmission::from_multipart(multipart, max).await?;
    let id = match (id.parse::<PetId>(), submission.form.pet_id()) {
        (Ok(path_id), Some(form_id)) if path_id == form_id => path_id,
        _ => {
            return Err(ShelterError::BadRequest(
                "pet id in the form does not match the URL".to_string(),
            ));
        }
    };

    let (draft, mut errors) = match submission.form.validate() {
        Ok(pet) => (Some(pet), Vec::new()),
        Err(errors) => (None, errors),
    };
    errors.extend(submission.photo_errors(false, max));

    let (Some(draft), true) = (draft, errors.is_empty()) else {
        let current = state.shelter.pet(id).await?;
        let page = form_page(
            &state,
            FormMode::Edit(id),
            submission.form,
            current.image_path.as_deref(),
            &errors,
        );
        return render_form(jar, &user, &page);
    };

    match state.shelter.update_pet(draft, submission.photo.as_ref()).await {
        Ok(pet) => {
            tracing::info!(pet_id = %pet.id, username = %user.username, "pet updated");
            Ok(redirect_with(jar, &Flash::success(format!("{} was updated.", pet.name)), PET_INDEX))
        }
        Err(e @ ShelterError::NotFound(_)) => Err(e),
        Err(e) => {
            tracing::error!(pet_id = %id, error = %e, "pet update failed");
            let current: Option<Pet> = state.shelter.pet(id).await.ok();
            let errors = [format!("An error occurred: {}", e.public_message())];
            let page = form_page(
                &state,
                FormMode::Edit(id),
                submission.form,
                current.as_ref().and_then(|p| p.image_path.as_deref()),
                &errors,
            );
            render_form(jar, &user, &page)
        }
    }
}

/// `GET /Pet/Delete/{id}` — Delete confirmation.
///
/// # Errors
///
/// Returns [`ShelterError::NotFound`] if the pet does not exist.
pub async fn delete_form(
    AdminUser(user): AdminUser,
    State(state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<String>,
) -> Result<Response, ShelterError> {
    let pet = state.shelter.pet(parse_pet_id(&id)?).await?;
    let page = PetDeletePage {
        pet: PetCard::from(&pet),
    };
    render_page(jar, Some(&user), Page::PetDelete, "Delete pet", &page)
}

/// `POST /Pet/Delete/{id}` — Removes the pet and its photo file.
/// Failures other than a missing pet become an error notice on the
/// catalog.
///
/// # Errors
///
/// Returns [`ShelterError::NotFound`] if the pet does not exist.
pub async fn delete(
    AdminUser(user): AdminUser,
    State(state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<String>,
) -> Result<Response, ShelterError> {
    let id = parse_pet_id(&id)?;
    let flash = match state.shelter.delete_pet(id).await {
        Ok(pet) => {
            tracing::info!(pet_id = %id, username = %user.username, "pet deleted");
            Flash::success(format!("{} was removed.", pet.name))
        }
        Err(e @ ShelterError::NotFound(_)) => return Err(e),
        Err(e) => {
            tracing::error!(pet_id = %id, error = %e, "pet deletion failed");
            Flash::error(format!(
                "An error occurred while deleting the pet: {}",
                e.public_message()
            ))
        }
    };
    Ok(redirect_with(jar, &flash, PET_INDEX))
}

/// Pet management routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/Pet/Create", get(create_form).post(create))
        .route("/Pet/Edit/{id}", get(edit_form).post(edit))
        .route("/Pet/Delete/{id}", get(delete_form).post(delete))
}

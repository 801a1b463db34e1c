//! HTML rendering from embedded Mustache templates.
//!
//! Every page is rendered in two passes: the page template produces the
//! body, which is then placed unescaped into the shared layout. Both
//! passes see the [`Chrome`] fields (signed-in user, flash notice) next to
//! the page's own data. Templates only branch on booleans, lists and
//! nested objects, never on plain strings.

use std::collections::HashMap;
use std::sync::LazyLock;

use axum::http::StatusCode;
use axum::response::Html;
use mustache::Template;
use serde::Serialize;

use crate::api::flash::Flash;
use crate::domain::{Identity, Pet};
use crate::error::ShelterError;

const LAYOUT: &str = include_str!("../../templates/layout.mustache");

/// Page templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    /// Adoptable pets plus the featured pet.
    Catalog,
    /// Create or edit form for a pet.
    PetForm,
    /// Delete confirmation.
    PetDelete,
    /// Adoption request form bound to one pet.
    AdoptionForm,
    /// Staff inbox of adoption requests.
    AdoptionList,
    /// Sign-in form.
    Login,
    /// Notice shown to signed-in non-admins.
    AccessDenied,
    /// Static privacy notice.
    Privacy,
    /// Generic error page.
    Error,
}

impl Page {
    /// Every page, for startup validation.
    pub const ALL: [Self; 9] = [
        Self::Catalog,
        Self::PetForm,
        Self::PetDelete,
        Self::AdoptionForm,
        Self::AdoptionList,
        Self::Login,
        Self::AccessDenied,
        Self::Privacy,
        Self::Error,
    ];

    const fn source(self) -> &'static str {
        match self {
            Self::Catalog => include_str!("../../templates/catalog.mustache"),
            Self::PetForm => include_str!("../../templates/pet_form.mustache"),
            Self::PetDelete => include_str!("../../templates/pet_delete.mustache"),
            Self::AdoptionForm => include_str!("../../templates/adoption_form.mustache"),
            Self::AdoptionList => include_str!("../../templates/adoption_list.mustache"),
            Self::Login => include_str!("../../templates/login.mustache"),
            Self::AccessDenied => include_str!("../../templates/access_denied.mustache"),
            Self::Privacy => include_str!("../../templates/privacy.mustache"),
            Self::Error => include_str!("../../templates/error.mustache"),
        }
    }
}

/// Layout-level context shared by every page.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Chrome {
    /// A session is present.
    pub signed_in: bool,
    /// Signed-in username, empty for visitors.
    pub username: String,
    /// The session carries the admin role.
    pub is_admin: bool,
    /// One-shot notice carried over from the previous request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flash: Option<Flash>,
}

impl Chrome {
    /// Builds the chrome for an optional identity and flash notice.
    #[must_use]
    pub fn new(user: Option<&Identity>, flash: Option<Flash>) -> Self {
        Self {
            signed_in: user.is_some(),
            username: user.map(|u| u.username.clone()).unwrap_or_default(),
            is_admin: user.is_some_and(Identity::is_admin),
            flash,
        }
    }
}

/// Pet as shown on cards and confirmation pages.
#[derive(Debug, Clone, Serialize)]
pub struct PetCard {
    /// Raw pet id, used in links.
    pub id: u32,
    /// Display name.
    pub name: String,
    /// Species.
    pub species: String,
    /// Breed, empty when unknown.
    pub breed: String,
    /// Whether `breed` is set.
    pub has_breed: bool,
    /// Age in years.
    pub age: u8,
    /// Notes, empty when absent.
    pub notes: String,
    /// Whether `notes` is set.
    pub has_notes: bool,
    /// Image reference usable as an `src` attribute.
    pub image: String,
    /// Whether `image` is set.
    pub has_image: bool,
}

impl From<&Pet> for PetCard {
    fn from(pet: &Pet) -> Self {
        let breed = pet.breed.clone().unwrap_or_default();
        let notes = pet.notes.clone().unwrap_or_default();
        let image = pet.image_path.clone().unwrap_or_default();
        Self {
            id: pet.id.get(),
            name: pet.name.clone(),
            species: pet.species.clone(),
            has_breed: !breed.is_empty(),
            breed,
            age: pet.age,
            has_notes: !notes.is_empty(),
            notes,
            has_image: !image.is_empty(),
            image,
        }
    }
}

/// Page data for templates that need nothing beyond the chrome.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct NoData {}

/// One validation message, wrapped so templates can name it.
#[derive(Debug, Clone, Serialize)]
pub struct FormError {
    /// Human-readable message.
    pub message: String,
}

/// Wraps plain messages for the `errors` list of a form template.
#[must_use]
pub fn form_errors(messages: &[String]) -> Vec<FormError> {
    messages
        .iter()
        .map(|m| FormError { message: m.clone() })
        .collect()
}

/// Layout plus every page, compiled on first use.
struct Compiled {
    layout: Template,
    pages: HashMap<Page, Template>,
}

impl Compiled {
    fn new() -> Result<Self, mustache::Error> {
        let layout = mustache::compile_str(LAYOUT)?;
        let pages = Page::ALL
            .into_iter()
            .map(|page| mustache::compile_str(page.source()).map(|t| (page, t)))
            .collect::<Result<_, mustache::Error>>()?;
        Ok(Self { layout, pages })
    }
}

static TEMPLATES: LazyLock<Result<Compiled, String>> =
    LazyLock::new(|| Compiled::new().map_err(|e| e.to_string()));

fn templates() -> Result<&'static Compiled, ShelterError> {
    TEMPLATES
        .as_ref()
        .map_err(|e| ShelterError::Template(e.clone()))
}

#[derive(Serialize)]
struct Scope<'a, T: Serialize> {
    #[serde(flatten)]
    chrome: &'a Chrome,
    #[serde(flatten)]
    data: &'a T,
}

#[derive(Serialize)]
struct Layout<'a> {
    #[serde(flatten)]
    chrome: &'a Chrome,
    title: &'a str,
    body: &'a str,
}

/// Renders `page` with `data` inside the layout.
///
/// # Errors
///
/// Returns [`ShelterError::Template`] if a template fails to compile or
/// the data cannot be encoded.
pub fn render<T: Serialize>(
    page: Page,
    title: &str,
    chrome: &Chrome,
    data: &T,
) -> Result<Html<String>, ShelterError> {
    let templates = templates()?;
    let template = templates
        .pages
        .get(&page)
        .ok_or_else(|| ShelterError::Template(format!("no template for {page:?}")))?;
    let body = template.render_to_string(&Scope { chrome, data })?;
    let html = templates.layout.render_to_string(&Layout {
        chrome,
        title,
        body: &body,
    })?;
    Ok(Html(html))
}

/// Renders the error page for `status`. Falls back to the bare status
/// line if the templates themselves are broken.
#[must_use]
pub fn error_page(status: StatusCode, message: &str) -> String {
    #[derive(Serialize)]
    struct ErrorData<'a> {
        status: String,
        message: &'a str,
    }

    let title = status.canonical_reason().unwrap_or("Error");
    let data = ErrorData {
        status: status.to_string(),
        message,
    };
    match render(Page::Error, title, &Chrome::default(), &data) {
        Ok(Html(html)) => html,
        Err(e) => {
            tracing::error!(error = %e, "error page failed to render");
            status.to_string()
        }
    }
}

/// Compiles every template ahead of the first request.
///
/// # Errors
///
/// Returns the first compilation error.
pub fn check_templates() -> Result<(), ShelterError> {
    templates().map(|_| ())
}

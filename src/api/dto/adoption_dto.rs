//! Adoption request form and query DTOs.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::{AdoptionRequest, PetId};

static EMAIL_PATTERN: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s.]+$"));

/// Fewest digits a phone number must contain.
const MIN_PHONE_DIGITS: usize = 7;

/// `GET /Adoption/Request?petId=` query.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdoptionQuery {
    /// Requested pet. Anything that is not a pet id is treated as unknown.
    #[serde(rename = "petId", alias = "PetId", default)]
    pub pet_id: Option<String>,
}

/// Adoption request form, as posted and as echoed back on errors.
///
/// Any `Id`, `RequestedAt` or `Status` sent by the client is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdoptionForm {
    /// `PetId`.
    #[serde(rename(deserialize = "PetId"), default)]
    pub pet_id: String,
    /// `RequesterName`.
    #[serde(rename(deserialize = "RequesterName"), default)]
    pub requester_name: String,
    /// `Email`.
    #[serde(rename(deserialize = "Email"), default)]
    pub email: String,
    /// `Phone`.
    #[serde(rename(deserialize = "Phone"), default)]
    pub phone: String,
    /// `Message`.
    #[serde(rename(deserialize = "Message"), default)]
    pub message: String,
}

impl AdoptionForm {
    /// Empty form bound to `pet_id`.
    #[must_use]
    pub fn for_pet(pet_id: PetId) -> Self {
        Self {
            pet_id: pet_id.to_string(),
            ..Self::default()
        }
    }

    /// The `PetId` field, if it is a positive integer.
    #[must_use]
    pub fn pet_id(&self) -> Option<PetId> {
        self.pet_id.parse::<PetId>().ok().filter(|id| id.get() > 0)
    }

    /// Checks every field and builds a pending request.
    ///
    /// # Errors
    ///
    /// Returns every validation message, in form order.
    pub fn validate(&self) -> Result<AdoptionRequest, Vec<String>> {
        let mut errors = Vec::new();

        let pet_id = self.pet_id();
        if pet_id.is_none() {
            errors.push("A pet must be selected".to_string());
        }

        let name = self.requester_name.trim();
        if name.is_empty() {
            errors.push("Your name is required".to_string());
        } else if name.chars().count() > 100 {
            errors.push("Name cannot exceed 100 characters".to_string());
        }

        let email = self.email.trim();
        if email.is_empty() {
            errors.push("Email is required".to_string());
        } else if !is_valid_email(email) {
            errors.push("Please enter a valid email address".to_string());
        }

        let phone = self.phone.trim();
        if !phone.is_empty() && !is_valid_phone(phone) {
            errors.push("Please enter a valid phone number".to_string());
        }

        let message = self.message.trim();
        if message.chars().count() > 1000 {
            errors.push("Message cannot exceed 1000 characters".to_string());
        }

        match pet_id {
            Some(pet_id) if errors.is_empty() => Ok(AdoptionRequest::pending(
                pet_id,
                name.to_string(),
                email.to_string(),
                (!phone.is_empty()).then(|| phone.to_string()),
                (!message.is_empty()).then(|| message.to_string()),
            )),
            _ => Err(errors),
        }
    }
}

fn is_valid_email(email: &str) -> bool {
    match &*EMAIL_PATTERN {
        Ok(pattern) => pattern.is_match(email),
        Err(e) => {
            tracing::error!(error = %e, "email pattern failed to compile");
            false
        }
    }
}

fn is_valid_phone(phone: &str) -> bool {
    let allowed = phone
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '+' | '-' | '(' | ')' | '.'));
    allowed && phone.chars().filter(char::is_ascii_digit).count() >= MIN_PHONE_DIGITS
}

//! Pet create/edit form: multipart parsing and validation.

use axum::extract::Multipart;
use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use serde::Serialize;

use crate::domain::{Pet, PetId};
use crate::error::ShelterError;
use crate::service::PhotoUpload;

/// Multipart field carrying the photo.
pub const PHOTO_FIELD: &str = "petPhoto";

/// Oldest accepted age, in years.
pub const MAX_AGE: u8 = 50;

/// Raw pet form values, echoed back into the form on validation errors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PetForm {
    /// Hidden `Id` field (edit only).
    pub id: String,
    /// `Name`.
    pub name: String,
    /// `Species`.
    pub species: String,
    /// `Breed`.
    pub breed: String,
    /// `Age`.
    pub age: String,
    /// `Notes`.
    pub notes: String,
    /// `IsAdopted` checkbox.
    pub is_adopted: bool,
    /// `IsPetOfTheWeek` checkbox.
    pub is_pet_of_the_week: bool,
}

impl PetForm {
    /// Blank form for a new pet.
    #[must_use]
    pub fn blank() -> Self {
        Self {
            age: "0".to_string(),
            ..Self::default()
        }
    }

    fn set(&mut self, name: &str, value: String) {
        match name {
            "Id" => self.id = value,
            "Name" => self.name = value,
            "Species" => self.species = value,
            "Breed" => self.breed = value,
            "Age" => self.age = value,
            "Notes" => self.notes = value,
            "IsAdopted" => self.is_adopted |= is_checked(&value),
            "IsPetOfTheWeek" => self.is_pet_of_the_week |= is_checked(&value),
            _ => {}
        }
    }

    /// The `Id` field as a pet id, if it parses.
    #[must_use]
    pub fn pet_id(&self) -> Option<PetId> {
        self.id.parse().ok()
    }

    /// Checks every field and builds the pet record. The id is taken from
    /// the `Id` field when present and left at its default otherwise.
    ///
    /// # Errors
    ///
    /// Returns every validation message, in form order.
    pub fn validate(&self) -> Result<Pet, Vec<String>> {
        let mut errors = Vec::new();

        let name = self.name.trim();
        if name.is_empty() {
            errors.push("Name is required".to_string());
        } else if !(2..=100).contains(&name.chars().count()) {
            errors.push("Name must be between 2 and 100 characters".to_string());
        }

        let species = self.species.trim();
        if species.is_empty() {
            errors.push("Species is required".to_string());
        }

        let breed = optional(&self.breed);
        if breed.as_ref().is_some_and(|b| b.chars().count() > 100) {
            errors.push("Breed cannot exceed 100 characters".to_string());
        }

        let age = match self.age.trim().parse::<u8>() {
            Ok(age) if age <= MAX_AGE => Some(age),
            _ if self.age.trim().is_empty() => {
                errors.push("Age is required".to_string());
                None
            }
            _ => {
                errors.push(format!("Age must be between 0 and {MAX_AGE}"));
                None
            }
        };

        let notes = optional(&self.notes);
        if notes.as_ref().is_some_and(|n| n.chars().count() > 500) {
            errors.push("Notes cannot exceed 500 characters".to_string());
        }

        match age {
            Some(age) if errors.is_empty() => Ok(Pet {
                id: self.pet_id().unwrap_or_default(),
                name: name.to_string(),
                species: species.to_string(),
                breed,
                age,
                notes,
                image_path: None,
                is_adopted: self.is_adopted,
                is_pet_of_the_week: self.is_pet_of_the_week,
            }),
            _ => Err(errors),
        }
    }
}

impl From<&Pet> for PetForm {
    fn from(pet: &Pet) -> Self {
        Self {
            id: pet.id.to_string(),
            name: pet.name.clone(),
            species: pet.species.clone(),
            breed: pet.breed.clone().unwrap_or_default(),
            age: pet.age.to_string(),
            notes: pet.notes.clone().unwrap_or_default(),
            is_adopted: pet.is_adopted,
            is_pet_of_the_week: pet.is_pet_of_the_week,
        }
    }
}

/// A parsed pet form submission.
#[derive(Debug, Clone, Default)]
pub struct PetSubmission {
    /// Text fields.
    pub form: PetForm,
    /// The uploaded photo, if a non-empty one fit within the limit.
    pub photo: Option<PhotoUpload>,
    /// A photo was sent but exceeded the size limit. Its bytes were
    /// discarded.
    pub photo_too_large: bool,
}

impl PetSubmission {
    /// Reads a `multipart/form-data` body. The photo is read chunk by chunk
    /// and dropped as soon as it grows past `max_photo_bytes`. A body cut
    /// off by the request size limit counts as an oversized photo; fields
    /// after the cut are lost.
    ///
    /// # Errors
    ///
    /// Returns [`ShelterError::Multipart`] if the body is malformed.
    pub async fn from_multipart(
        mut multipart: Multipart,
        max_photo_bytes: usize,
    ) -> Result<Self, ShelterError> {
        let mut submission = Self::default();
        match submission.read_fields(&mut multipart, max_photo_bytes).await {
            Err(e) if e.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                tracing::warn!(error = %e, "upload exceeded the request size limit");
                submission.photo = None;
                submission.photo_too_large = true;
                Ok(submission)
            }
            Err(e) => Err(e.into()),
            Ok(()) => Ok(submission),
        }
    }

    async fn read_fields(
        &mut self,
        multipart: &mut Multipart,
        max_photo_bytes: usize,
    ) -> Result<(), MultipartError> {
        while let Some(mut field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_owned) else {
                continue;
            };
            if name != PHOTO_FIELD {
                let value = field.text().await?;
                self.form.set(&name, value);
                continue;
            }

            let file_name = field.file_name().unwrap_or_default().to_owned();
            let mut bytes = Vec::new();
            let mut too_large = false;
            while let Some(chunk) = field.chunk().await? {
                if too_large || bytes.len().saturating_add(chunk.len()) > max_photo_bytes {
                    too_large = true;
                    bytes = Vec::new();
                    continue;
                }
                bytes.extend_from_slice(&chunk);
            }
            if too_large {
                self.photo_too_large = true;
            } else if !bytes.is_empty() {
                self.photo = Some(PhotoUpload { file_name, bytes });
            }
        }
        Ok(())
    }

    /// Validation messages for the photo. `required` is set on create.
    #[must_use]
    pub fn photo_errors(&self, required: bool, max_photo_bytes: usize) -> Vec<String> {
        if self.photo_too_large {
            vec![format!("File size cannot exceed {}MB", max_photo_bytes / (1024 * 1024))]
        } else if required && self.photo.is_none() {
            vec!["Pet photo is required".to_string()]
        } else {
            Vec::new()
        }
    }
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn is_checked(value: &str) -> bool {
    value.eq_ignore_ascii_case("true") || value.eq_ignore_ascii_case("on")
}

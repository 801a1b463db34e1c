//! Pet record.

use serde::{Deserialize, Serialize};

use super::PetId;

/// A pet in the shelter catalog.
///
/// Field names serialize in PascalCase to match the persisted
/// `pets.json` layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Pet {
    /// Store-assigned identifier.
    #[serde(default)]
    pub id: PetId,
    /// Display name.
    pub name: String,
    /// Free-text species (e.g. `"Dog"`).
    pub species: String,
    /// Optional breed description.
    #[serde(default)]
    pub breed: Option<String>,
    /// Age in years.
    #[serde(default)]
    pub age: u8,
    /// Optional staff notes shown on the catalog card.
    #[serde(default)]
    pub notes: Option<String>,
    /// Image reference: `/images/<file>`, an absolute URL or a data URI.
    #[serde(default)]
    pub image_path: Option<String>,
    /// Whether the pet has already been adopted.
    #[serde(default)]
    pub is_adopted: bool,
    /// Whether the pet is featured on the homepage.
    #[serde(default)]
    pub is_pet_of_the_week: bool,
}

impl Pet {
    /// Returns `true` if the pet can still be adopted.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        !self.is_adopted
    }

    /// Returns the image reference if it points at a file under the public
    /// web root (a rooted relative path such as `/images/abc.png`).
    ///
    /// Data URIs, absolute URLs and protocol-relative URLs return `None`.
    #[must_use]
    pub fn local_image_path(&self) -> Option<&str> {
        let path = self.image_path.as_deref()?;
        if path.starts_with('/') && !path.starts_with("//") {
            Some(path)
        } else {
            None
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn pet_with_image(image: Option<&str>) -> Pet {
        Pet {
            id: PetId::new(1),
            name: "Max".to_string(),
            species: "Dog".to_string(),
            breed: None,
            age: 3,
            notes: None,
            image_path: image.map(str::to_string),
            is_adopted: false,
            is_pet_of_the_week: false,
        }
    }

    #[test]
    fn local_image_path_accepts_rooted_paths() {
        let pet = pet_with_image(Some("/images/a.png"));
        assert_eq!(pet.local_image_path(), Some("/images/a.png"));
    }

    #[test]
    fn local_image_path_rejects_remote_and_inline() {
        assert_eq!(pet_with_image(Some("data:image/svg+xml;base64,AAA")).local_image_path(), None);
        assert_eq!(pet_with_image(Some("https://cdn.example.com/a.png")).local_image_path(), None);
        assert_eq!(pet_with_image(Some("//cdn.example.com/a.png")).local_image_path(), None);
        assert_eq!(pet_with_image(None).local_image_path(), None);
    }

    #[test]
    fn deserializes_original_field_names() {
        let json = r#"{"Id":3,"Name":"Charlie","Species":"Dog","Breed":null,"Age":5,
            "Notes":"Calm","ImagePath":null,"IsAdopted":true}"#;
        let Ok(pet) = serde_json::from_str::<Pet>(json) else {
            panic!("deserialization failed");
        };
        assert_eq!(pet.id, PetId::new(3));
        assert!(pet.is_adopted);
        assert!(!pet.is_pet_of_the_week);
        assert!(!pet.is_available());
    }
}

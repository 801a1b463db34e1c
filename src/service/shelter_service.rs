//! Shelter service: catalog queries, pet management and adoption intake.

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::{AdoptionRequest, Pet, PetId};
use crate::error::ShelterError;
use crate::service::image_store::{ImageStore, PhotoUpload};
use crate::store::{AdoptionRepository, PetRepository};

/// What the catalog page shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    /// Available pets matching the filters, in store order.
    pub pets: Vec<Pet>,
    /// Pet of the week, independent of the filters.
    pub featured: Option<Pet>,
}

/// An adoption request together with the name of the pet it refers to,
/// if that pet still exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboxEntry {
    /// The stored request.
    pub request: AdoptionRequest,
    /// Current name of the requested pet.
    pub pet_name: Option<String>,
}

/// Orchestration layer between the endpoints and the stores.
///
/// Holds the repositories as trait objects so tests and embedders can swap
/// the JSON stores for other implementations. Photo files are always
/// written before the pet store is touched.
#[derive(Debug, Clone)]
pub struct ShelterService {
    pets: Arc<dyn PetRepository>,
    adoptions: Arc<dyn AdoptionRepository>,
    images: ImageStore,
}

impl ShelterService {
    /// Creates a new `ShelterService`.
    #[must_use]
    pub fn new(
        pets: Arc<dyn PetRepository>,
        adoptions: Arc<dyn AdoptionRepository>,
        images: ImageStore,
    ) -> Self {
        Self {
            pets,
            adoptions,
            images,
        }
    }

    /// Returns a reference to the pet repository.
    #[must_use]
    pub fn pets(&self) -> &Arc<dyn PetRepository> {
        &self.pets
    }

    /// Returns a reference to the adoption repository.
    #[must_use]
    pub fn adoptions(&self) -> &Arc<dyn AdoptionRepository> {
        &self.adoptions
    }

    /// Available pets, narrowed by a case-insensitive name substring and
    /// an exact species, plus the featured pet. Empty filters are ignored;
    /// filters are matched as given, without trimming.
    pub async fn catalog(&self, search: Option<&str>, species: Option<&str>) -> Catalog {
        let species = species.filter(|s| !s.is_empty());
        let needle = search.filter(|s| !s.is_empty()).map(str::to_lowercase);

        let mut pets = self.pets.list_available(species).await;
        if let Some(needle) = needle {
            pets.retain(|p| p.name.to_lowercase().contains(&needle));
        }
        Catalog {
            pets,
            featured: self.pets.get_featured().await,
        }
    }

    /// Looks a pet up by id.
    ///
    /// # Errors
    ///
    /// Returns [`ShelterError::NotFound`] if no pet has this id.
    pub async fn pet(&self, id: PetId) -> Result<Pet, ShelterError> {
        self.pets
            .get_by_id(id)
            .await
            .ok_or_else(|| ShelterError::NotFound(format!("pet {id}")))
    }

    /// Stores `photo`, then adds `pet` referencing it.
    ///
    /// # Errors
    ///
    /// Returns [`ShelterError::Io`] if the photo cannot be written; the pet
    /// store is not touched in that case.
    pub async fn create_pet(&self, mut pet: Pet, photo: &PhotoUpload) -> Result<Pet, ShelterError> {
        let reference = self.images.save(&photo.file_name, &photo.bytes).await?;
        pet.image_path = Some(reference);
        Ok(self.pets.add(pet).await)
    }

    /// Replaces the pet with `pet.id`. A new photo replaces the image
    /// reference (the old file is kept); without one the current
    /// reference is preserved.
    ///
    /// # Errors
    ///
    /// Returns [`ShelterError::NotFound`] if the pet does not exist, or
    /// [`ShelterError::Io`] if the new photo cannot be written.
    pub async fn update_pet(
        &self,
        mut pet: Pet,
        photo: Option<&PhotoUpload>,
    ) -> Result<Pet, ShelterError> {
        let existing = self.pet(pet.id).await?;
        pet.image_path = match photo {
            Some(photo) => Some(self.images.save(&photo.file_name, &photo.bytes).await?),
            None => existing.image_path,
        };
        self.pets.update(pet.clone()).await;
        Ok(pet)
    }

    /// Removes the pet's local photo file, then the pet itself.
    ///
    /// # Errors
    ///
    /// Returns [`ShelterError::NotFound`] if the pet does not exist, or
    /// [`ShelterError::Io`] if the photo file cannot be removed; the record
    /// is kept in that case.
    pub async fn delete_pet(&self, id: PetId) -> Result<Pet, ShelterError> {
        let pet = self.pet(id).await?;
        if let Some(reference) = pet.local_image_path() {
            self.images.delete(reference).await?;
        }
        self.pets.delete(id).await;
        Ok(pet)
    }

    /// Stores a new adoption request.
    pub async fn submit_adoption(&self, request: AdoptionRequest) -> AdoptionRequest {
        self.adoptions.add(request).await
    }

    /// All adoption requests, newest first, with the requested pet's name.
    pub async fn adoption_inbox(&self) -> Vec<InboxEntry> {
        let names: HashMap<PetId, String> = self
            .pets
            .list_all()
            .await
            .into_iter()
            .map(|p| (p.id, p.name))
            .collect();
        self.adoptions
            .list_all()
            .await
            .into_iter()
            .map(|request| InboxEntry {
                pet_name: names.get(&request.pet_id).cloned(),
                request,
            })
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::seed::sample_pets;
    use crate::store::{JsonAdoptionStore, JsonFile, JsonPetStore};

    struct Fixture {
        _dir: tempfile::TempDir,
        web_root: std::path::PathBuf,
        service: ShelterService,
    }

    fn fixture(pets: Vec<Pet>) -> Fixture {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir");
        };
        let web_root = dir.path().join("wwwroot");
        let pet_store = JsonPetStore::with_pets(JsonFile::new(dir.path().join("pets.json")), pets);
        let adoption_store =
            JsonAdoptionStore::with_requests(JsonFile::new(dir.path().join("requests.json")), Vec::new());
        let service = ShelterService::new(
            Arc::new(pet_store),
            Arc::new(adoption_store),
            ImageStore::new(&web_root),
        );
        Fixture {
            _dir: dir,
            web_root,
            service,
        }
    }

    fn draft(name: &str) -> Pet {
        Pet {
            id: PetId::default(),
            name: name.to_string(),
            species: "Dog".to_string(),
            breed: None,
            age: 1,
            notes: None,
            image_path: None,
            is_adopted: false,
            is_pet_of_the_week: false,
        }
    }

    fn photo() -> PhotoUpload {
        PhotoUpload {
            file_name: "rex.png".to_string(),
            bytes: b"png".to_vec(),
        }
    }

    #[tokio::test]
    async fn catalog_search_is_case_insensitive_substring() {
        let f = fixture(sample_pets());
        let catalog = f.service.catalog(Some("AR"), None).await;
        let names: Vec<&str> = catalog.pets.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Charlie"]);
        assert_eq!(catalog.featured.map(|p| p.name), Some("Max".to_string()));
    }

    #[tokio::test]
    async fn catalog_combines_species_and_search() {
        let f = fixture(sample_pets());
        let cats = f.service.catalog(None, Some("Cat")).await;
        assert!(!cats.pets.is_empty());
        assert!(cats.pets.iter().all(|p| p.species == "Cat"));

        let blank = f.service.catalog(Some(""), Some("")).await;
        assert_eq!(blank.pets.len(), f.service.pets().list_available(None).await.len());
    }

    #[tokio::test]
    async fn catalog_filters_are_not_trimmed() {
        let f = fixture(sample_pets());
        assert!(f.service.catalog(Some(" Max "), None).await.pets.is_empty());
        assert!(f.service.catalog(None, Some(" Cat")).await.pets.is_empty());
        assert!(!f.service.catalog(Some("Max"), None).await.pets.is_empty());
    }

    #[tokio::test]
    async fn create_pet_stores_photo_and_record() {
        let f = fixture(Vec::new());
        let Ok(pet) = f.service.create_pet(draft("Rex"), &photo()).await else {
            panic!("create failed");
        };
        assert_eq!(pet.id, PetId::new(1));
        let Some(reference) = pet.local_image_path() else {
            panic!("no local image");
        };
        assert!(f.web_root.join(reference.trim_start_matches('/')).exists());
        assert_eq!(f.service.pets().list_all().await.len(), 1);
    }

    #[tokio::test]
    async fn update_without_photo_keeps_image() {
        let f = fixture(Vec::new());
        let Ok(pet) = f.service.create_pet(draft("Rex"), &photo()).await else {
            panic!("create failed");
        };
        let mut edited = pet.clone();
        edited.name = "Rexy".to_string();
        edited.image_path = None;

        let Ok(updated) = f.service.update_pet(edited, None).await else {
            panic!("update failed");
        };
        assert_eq!(updated.image_path, pet.image_path);
        assert_eq!(f.service.pet(pet.id).await.ok().map(|p| p.name), Some("Rexy".to_string()));
    }

    #[tokio::test]
    async fn update_unknown_pet_is_not_found() {
        let f = fixture(Vec::new());
        let mut ghost = draft("Ghost");
        ghost.id = PetId::new(42);
        assert!(matches!(
            f.service.update_pet(ghost, None).await,
            Err(ShelterError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn delete_pet_removes_local_file() {
        let f = fixture(Vec::new());
        let Ok(pet) = f.service.create_pet(draft("Rex"), &photo()).await else {
            panic!("create failed");
        };
        let Some(reference) = pet.local_image_path() else {
            panic!("no local image");
        };
        let file = f.web_root.join(reference.trim_start_matches('/'));

        assert!(f.service.delete_pet(pet.id).await.is_ok());
        assert!(!file.exists());
        assert!(f.service.pets().list_all().await.is_empty());
        assert!(matches!(
            f.service.delete_pet(pet.id).await,
            Err(ShelterError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn delete_seed_pet_with_data_uri() {
        let f = fixture(sample_pets());
        assert!(f.service.delete_pet(PetId::new(1)).await.is_ok());
        assert_eq!(f.service.pets().list_all().await.len(), 5);
    }

    #[tokio::test]
    async fn inbox_names_existing_pets() {
        let f = fixture(sample_pets());
        for pet_id in [1, 99] {
            f.service
                .submit_adoption(AdoptionRequest::pending(
                    PetId::new(pet_id),
                    "Ann".to_string(),
                    "ann@example.com".to_string(),
                    None,
                    None,
                ))
                .await;
        }
        let inbox = f.service.adoption_inbox().await;
        assert_eq!(inbox.len(), 2);
        let named: Vec<Option<&str>> = inbox.iter().map(|e| e.pet_name.as_deref()).collect();
        assert!(named.contains(&Some("Max")));
        assert!(named.contains(&None));
    }
}

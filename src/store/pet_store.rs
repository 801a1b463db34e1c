//! JSON-file-backed pet catalog.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{JsonFile, PetRepository};
use crate::domain::seed::sample_pets;
use crate::domain::{Pet, PetId};

/// Pet catalog held in memory and mirrored to a JSON file.
///
/// The whole read-modify-write-persist cycle of each mutation runs under a
/// single mutex, so concurrent requests cannot lose each other's updates.
#[derive(Debug)]
pub struct JsonPetStore {
    file: JsonFile,
    state: Mutex<PetState>,
}

#[derive(Debug)]
struct PetState {
    pets: Vec<Pet>,
    /// Highest id ever loaded or issued by this process.
    high_water: PetId,
}

impl PetState {
    fn new(pets: Vec<Pet>) -> Self {
        let high_water = max_id(&pets);
        Self { pets, high_water }
    }

    fn next_id(&mut self) -> PetId {
        let id = max_id(&self.pets).max(self.high_water).next();
        self.high_water = id;
        id
    }
}

fn max_id(pets: &[Pet]) -> PetId {
    pets.iter().map(|p| p.id).max().unwrap_or_default()
}

impl JsonPetStore {
    /// Loads the catalog from `path`.
    ///
    /// A missing or unreadable file is not an error: the store starts from
    /// the sample catalog instead and the file is written on the first
    /// mutation.
    pub async fn load_or_initialize(path: impl Into<PathBuf>) -> Self {
        let file = JsonFile::new(path);
        let pets = match file.load::<Pet>().await {
            Ok(Some(pets)) => {
                tracing::info!(path = %file.path().display(), count = pets.len(), "pets loaded");
                pets
            }
            Ok(None) => {
                tracing::info!(path = %file.path().display(), "no pet file, using sample catalog");
                sample_pets()
            }
            Err(e) => {
                tracing::warn!(
                    path = %file.path().display(),
                    error = %e,
                    "pet file unreadable, using sample catalog"
                );
                sample_pets()
            }
        };
        Self::with_pets(file, pets)
    }

    /// Creates a store over `file` holding exactly `pets`, without reading
    /// the file.
    #[must_use]
    pub fn with_pets(file: JsonFile, pets: Vec<Pet>) -> Self {
        Self {
            file,
            state: Mutex::new(PetState::new(pets)),
        }
    }

    async fn persist(&self, pets: &[Pet]) {
        if let Err(e) = self.file.save(pets).await {
            tracing::error!(path = %self.file.path().display(), error = %e, "failed to save pets");
        }
    }
}

#[async_trait]
impl PetRepository for JsonPetStore {
    async fn list_available(&self, species: Option<&str>) -> Vec<Pet> {
        let state = self.state.lock().await;
        state
            .pets
            .iter()
            .filter(|p| p.is_available())
            .filter(|p| species.is_none_or(|s| s.is_empty() || p.species == s))
            .cloned()
            .collect()
    }

    async fn get_featured(&self) -> Option<Pet> {
        let state = self.state.lock().await;
        state.pets.iter().find(|p| p.is_pet_of_the_week).cloned()
    }

    async fn get_by_id(&self, id: PetId) -> Option<Pet> {
        let state = self.state.lock().await;
        state.pets.iter().find(|p| p.id == id).cloned()
    }

    async fn add(&self, mut pet: Pet) -> Pet {
        let mut state = self.state.lock().await;
        pet.id = state.next_id();
        state.pets.push(pet.clone());
        self.persist(&state.pets).await;
        tracing::info!(pet_id = %pet.id, name = %pet.name, "pet added");
        pet
    }

    async fn update(&self, pet: Pet) {
        let mut state = self.state.lock().await;
        let id = pet.id;
        if let Some(slot) = state.pets.iter_mut().find(|p| p.id == id) {
            *slot = pet;
            tracing::info!(pet_id = %id, "pet updated");
        }
        self.persist(&state.pets).await;
    }

    async fn delete(&self, id: PetId) {
        let mut state = self.state.lock().await;
        let before = state.pets.len();
        state.pets.retain(|p| p.id != id);
        let removed = before - state.pets.len();
        self.persist(&state.pets).await;
        tracing::info!(pet_id = %id, removed, "pet deleted");
    }

    async fn list_all(&self) -> Vec<Pet> {
        self.state.lock().await.pets.clone()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn pet(name: &str, species: &str) -> Pet {
        Pet {
            id: PetId::default(),
            name: name.to_string(),
            species: species.to_string(),
            breed: None,
            age: 2,
            notes: None,
            image_path: None,
            is_adopted: false,
            is_pet_of_the_week: false,
        }
    }

    fn temp_file() -> (tempfile::TempDir, JsonFile) {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir");
        };
        let file = JsonFile::new(dir.path().join("pets.json"));
        (dir, file)
    }

    #[tokio::test]
    async fn add_to_empty_store_assigns_one() {
        let (_dir, file) = temp_file();
        let store = JsonPetStore::with_pets(file, Vec::new());
        let added = store.add(pet("Rex", "Dog")).await;
        assert_eq!(added.id, PetId::new(1));
    }

    #[tokio::test]
    async fn add_assigns_max_plus_one() {
        let (_dir, file) = temp_file();
        let mut a = pet("A", "Dog");
        a.id = PetId::new(3);
        let mut b = pet("B", "Cat");
        b.id = PetId::new(9);
        let store = JsonPetStore::with_pets(file, vec![a, b]);

        let added = store.add(pet("C", "Dog")).await;
        assert_eq!(added.id, PetId::new(10));
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let (_dir, file) = temp_file();
        let store = JsonPetStore::with_pets(file, Vec::new());
        let first = store.add(pet("A", "Dog")).await;
        let second = store.add(pet("B", "Dog")).await;
        store.delete(second.id).await;

        let third = store.add(pet("C", "Dog")).await;
        assert_eq!(first.id, PetId::new(1));
        assert_eq!(third.id, PetId::new(3));
    }

    #[tokio::test]
    async fn delete_removes_exactly_one_and_ignores_unknown() {
        let (_dir, file) = temp_file();
        let store = JsonPetStore::with_pets(file, sample_pets());
        store.delete(PetId::new(2)).await;
        store.delete(PetId::new(999)).await;

        let all = store.list_all().await;
        assert_eq!(all.len(), 5);
        assert!(all.iter().all(|p| p.id != PetId::new(2)));
    }

    #[tokio::test]
    async fn list_available_skips_adopted_and_filters_species_exactly() {
        let (_dir, file) = temp_file();
        let mut adopted = pet("Old", "Dog");
        adopted.is_adopted = true;
        let store = JsonPetStore::with_pets(file, Vec::new());
        store.add(adopted).await;
        store.add(pet("Rex", "Dog")).await;
        store.add(pet("Tom", "Cat")).await;
        store.add(pet("Lowercase", "dog")).await;

        let available = store.list_available(None).await;
        assert_eq!(available.len(), 3);
        assert!(available.iter().all(Pet::is_available));

        let dogs = store.list_available(Some("Dog")).await;
        let names: Vec<&str> = dogs.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Rex"]);
    }

    #[tokio::test]
    async fn update_replaces_in_place_and_ignores_unknown() {
        let (_dir, file) = temp_file();
        let store = JsonPetStore::with_pets(file, sample_pets());

        let Some(mut luna) = store.get_by_id(PetId::new(2)).await else {
            panic!("seed pet missing");
        };
        luna.is_adopted = true;
        store.update(luna).await;

        let mut ghost = pet("Ghost", "Dog");
        ghost.id = PetId::new(77);
        store.update(ghost).await;

        let all = store.list_all().await;
        assert_eq!(all.len(), 6);
        assert!(all.iter().any(|p| p.id == PetId::new(2) && p.is_adopted));
        assert!(all.iter().all(|p| p.id != PetId::new(77)));
    }

    #[tokio::test]
    async fn featured_pet_is_found() {
        let (_dir, file) = temp_file();
        let store = JsonPetStore::with_pets(file, sample_pets());
        let featured = store.get_featured().await;
        assert_eq!(featured.map(|p| p.name), Some("Max".to_string()));

        let (_dir2, file2) = temp_file();
        let empty = JsonPetStore::with_pets(file2, vec![pet("A", "Dog")]);
        assert!(empty.get_featured().await.is_none());
    }

    #[tokio::test]
    async fn reload_round_trips_records() {
        let (dir, file) = temp_file();
        let store = JsonPetStore::with_pets(file, Vec::new());
        let mut rex = pet("Rex", "Dog");
        rex.breed = Some("Boxer".to_string());
        rex.notes = Some("Loves naps".to_string());
        rex.image_path = Some("/images/rex.png".to_string());
        store.add(rex).await;
        store.add(pet("Tom", "Cat")).await;
        let before = store.list_all().await;

        let reloaded = JsonPetStore::load_or_initialize(dir.path().join("pets.json")).await;
        assert_eq!(reloaded.list_all().await, before);
    }

    #[tokio::test]
    async fn missing_or_corrupt_file_falls_back_to_seed() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir");
        };
        let missing = JsonPetStore::load_or_initialize(dir.path().join("none.json")).await;
        assert_eq!(missing.list_all().await, sample_pets());

        let corrupt_path = dir.path().join("corrupt.json");
        assert!(tokio::fs::write(&corrupt_path, b"[{\"Id\": ").await.is_ok());
        let corrupt = JsonPetStore::load_or_initialize(corrupt_path).await;
        assert_eq!(corrupt.list_all().await.len(), 6);
    }

    #[tokio::test]
    async fn save_failure_keeps_in_memory_state() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir");
        };
        // The backing path is a directory, so every write fails.
        let store = JsonPetStore::with_pets(JsonFile::new(dir.path()), Vec::new());
        let added = store.add(pet("Rex", "Dog")).await;
        assert_eq!(store.get_by_id(added.id).await.map(|p| p.name), Some("Rex".to_string()));
    }
}

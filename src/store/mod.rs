//! Persistence layer: repository traits and their JSON-file implementations.
//!
//! Endpoint code depends only on [`PetRepository`] and
//! [`AdoptionRepository`]. The JSON stores keep the full collection in
//! memory behind a `tokio::sync::Mutex` and rewrite the backing file after
//! every mutation. Save failures are logged and swallowed, so the
//! repository methods themselves are infallible.

pub mod adoption_store;
pub mod json_file;
pub mod pet_store;

use async_trait::async_trait;

use crate::domain::{AdoptionRequest, Pet, PetId};

pub use adoption_store::JsonAdoptionStore;
pub use json_file::JsonFile;
pub use pet_store::JsonPetStore;

/// File name of the pet collection inside the data directory.
pub const PETS_FILE: &str = "pets.json";

/// File name of the adoption-request collection inside the data directory.
pub const ADOPTION_REQUESTS_FILE: &str = "adoption_requests.json";

/// Low-level persistence failure.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Filesystem read or write failed.
    #[error("storage i/o failed: {0}")]
    Io(#[from] std::io::Error),

    /// File content could not be (de)serialized.
    #[error("storage (de)serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Catalog of pet records.
#[async_trait]
pub trait PetRepository: Send + Sync + std::fmt::Debug {
    /// Returns every pet that is not adopted, optionally restricted to an
    /// exact species match.
    async fn list_available(&self, species: Option<&str>) -> Vec<Pet>;

    /// Returns the pet flagged as pet of the week, if any.
    async fn get_featured(&self) -> Option<Pet>;

    /// Looks a pet up by id.
    async fn get_by_id(&self, id: PetId) -> Option<Pet>;

    /// Assigns the next id to `pet`, stores it and returns the stored copy.
    async fn add(&self, pet: Pet) -> Pet;

    /// Replaces the record with the same id. Unknown ids are ignored.
    async fn update(&self, pet: Pet);

    /// Removes every record with the given id. Unknown ids are ignored.
    async fn delete(&self, id: PetId);

    /// Returns every pet, adopted or not, in store order.
    async fn list_all(&self) -> Vec<Pet>;
}

/// Append-only log of adoption requests.
#[async_trait]
pub trait AdoptionRepository: Send + Sync + std::fmt::Debug {
    /// Returns all requests, newest submission first.
    async fn list_all(&self) -> Vec<AdoptionRequest>;

    /// Stores `request` with a server-assigned id and timestamp and returns
    /// the stored copy. Caller-supplied id and timestamp are discarded.
    async fn add(&self, request: AdoptionRequest) -> AdoptionRequest;
}

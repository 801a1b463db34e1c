//! Domain layer: pet and adoption-request records, identifiers, roles and
//! the seed catalog.
//!
//! These types are plain data. Persistence lives in [`crate::store`] and
//! request handling in [`crate::api`].

pub mod adoption;
pub mod identity;
pub mod pet;
pub mod pet_id;
pub mod seed;

pub use adoption::AdoptionRequest;
pub use identity::{Identity, Role};
pub use pet::Pet;
pub use pet_id::{PetId, RequestId};

//! Service layer: business logic orchestration.
//!
//! [`ShelterService`] coordinates the pet and adoption repositories and
//! writes or removes photo files through the [`ImageStore`].

pub mod image_store;
pub mod shelter_service;

pub use image_store::{ImageStore, PhotoUpload};
pub use shelter_service::{Catalog, InboxEntry, ShelterService};

//! Data Transfer Objects for query strings and form bodies.
//!
//! Form fields arrive as strings and are validated into domain records, so
//! a bad value produces an inline message instead of an extractor
//! rejection.

pub mod account_dto;
pub mod adoption_dto;
pub mod catalog_dto;
pub mod pet_dto;

pub use account_dto::*;
pub use adoption_dto::*;
pub use catalog_dto::*;
pub use pet_dto::*;

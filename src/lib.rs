//! # shelter-helper
//!
//! Web application for a small animal shelter: visitors browse adoptable
//! pets and submit adoption requests; staff signed in as `admin` add, edit
//! and remove pets with photo uploads.
//!
//! Pets and adoption requests live in two JSON files that are loaded into
//! memory at startup and rewritten after every change.
//!
//! ## Architecture
//!
//! ```text
//! Browser
//!     │
//!     ├── Handlers + DTOs (api/)       HTML pages, forms, redirects
//!     ├── Session extractors (auth/)   signed cookie → Identity
//!     ├── Templates (views/)
//!     │
//!     ├── ShelterService (service/)    catalog, pet CRUD, adoption intake
//!     ├── ImageStore (service/)        <web_root>/images
//!     │
//!     └── PetRepository / AdoptionRepository (store/)
//!             JSON files in <data_dir>
//! ```

pub mod api;
pub mod app_state;
pub mod auth;
pub mod config;
pub mod domain;
pub mod error;
pub mod service;
pub mod store;
pub mod views;

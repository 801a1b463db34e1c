//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::auth::{CredentialVerifier, PlaceholderVerifier, SessionKeys};
use crate::config::ShelterConfig;
use crate::service::{ImageStore, ShelterService};
use crate::store::{JsonAdoptionStore, JsonPetStore};

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Shelter service for all business logic.
    pub shelter: Arc<ShelterService>,
    /// Session token issuer and verifier.
    pub sessions: Arc<SessionKeys>,
    /// Credential check used by the login form.
    pub verifier: Arc<dyn CredentialVerifier>,
    /// Runtime configuration.
    pub config: Arc<ShelterConfig>,
}

impl AppState {
    /// Assembles the state from its parts.
    #[must_use]
    pub fn new(
        config: ShelterConfig,
        shelter: ShelterService,
        verifier: Arc<dyn CredentialVerifier>,
    ) -> Self {
        let sessions = SessionKeys::new(
            config.session_secret.clone(),
            config.session_ttl_days,
            config.secure_cookies,
        );
        Self {
            shelter: Arc::new(shelter),
            sessions: Arc::new(sessions),
            verifier,
            config: Arc::new(config),
        }
    }

    /// Loads both JSON stores from the configured data directory and wires
    /// them up with the placeholder credential check.
    pub async fn initialize(config: ShelterConfig) -> Self {
        let pets = JsonPetStore::load_or_initialize(config.pets_file()).await;
        let adoptions = JsonAdoptionStore::load_or_initialize(config.adoption_requests_file()).await;
        let shelter = ShelterService::new(
            Arc::new(pets),
            Arc::new(adoptions),
            ImageStore::new(config.web_root.clone()),
        );
        Self::new(config, shelter, Arc::new(PlaceholderVerifier))
    }
}

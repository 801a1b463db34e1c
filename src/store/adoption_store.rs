//! JSON-file-backed adoption request log.

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use super::{AdoptionRepository, JsonFile};
use crate::domain::{AdoptionRequest, RequestId};

/// Adoption requests held in memory and mirrored to a JSON file.
#[derive(Debug)]
pub struct JsonAdoptionStore {
    file: JsonFile,
    state: Mutex<AdoptionState>,
}

#[derive(Debug)]
struct AdoptionState {
    requests: Vec<AdoptionRequest>,
    next_id: RequestId,
}

impl JsonAdoptionStore {
    /// Loads the request log from `path`. A missing or unreadable file
    /// yields an empty log.
    pub async fn load_or_initialize(path: impl Into<PathBuf>) -> Self {
        let file = JsonFile::new(path);
        let requests = match file.load::<AdoptionRequest>().await {
            Ok(Some(requests)) => requests,
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(
                    path = %file.path().display(),
                    error = %e,
                    "adoption request file unreadable, starting empty"
                );
                Vec::new()
            }
        };
        Self::with_requests(file, requests)
    }

    /// Creates a store over `file` holding exactly `requests`, without
    /// reading the file.
    #[must_use]
    pub fn with_requests(file: JsonFile, requests: Vec<AdoptionRequest>) -> Self {
        let next_id = requests
            .iter()
            .map(|r| r.id)
            .max()
            .unwrap_or_default()
            .next();
        Self {
            file,
            state: Mutex::new(AdoptionState { requests, next_id }),
        }
    }
}

#[async_trait]
impl AdoptionRepository for JsonAdoptionStore {
    async fn list_all(&self) -> Vec<AdoptionRequest> {
        let mut requests = self.state.lock().await.requests.clone();
        requests.sort_by(|a, b| b.requested_at.cmp(&a.requested_at));
        requests
    }

    async fn add(&self, mut request: AdoptionRequest) -> AdoptionRequest {
        let mut state = self.state.lock().await;
        request.id = state.next_id;
        request.requested_at = Utc::now();
        state.next_id = state.next_id.next();
        state.requests.push(request.clone());

        if let Err(e) = self.file.save(&state.requests).await {
            tracing::error!(
                path = %self.file.path().display(),
                error = %e,
                "failed to save adoption requests"
            );
        }
        tracing::info!(request_id = %request.id, pet_id = %request.pet_id, "adoption request stored");
        request
    }
}

//! Adoption request record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{PetId, RequestId};

/// Status given to every newly submitted request.
pub const STATUS_PENDING: &str = "Pending";

/// An inquiry from a prospective adopter about one pet.
///
/// Requests are append-only: once stored they are never mutated or
/// deleted, and submitting one does not change the pet's adopted flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AdoptionRequest {
    /// Store-assigned identifier.
    #[serde(default)]
    pub id: RequestId,
    /// Pet the request refers to. Not enforced as a foreign key.
    pub pet_id: PetId,
    /// Name of the person asking to adopt.
    pub requester_name: String,
    /// Contact email address.
    pub email: String,
    /// Optional contact phone number.
    #[serde(default)]
    pub phone: Option<String>,
    /// Optional free-text message.
    #[serde(default)]
    pub message: Option<String>,
    /// Server-side submission time (UTC).
    pub requested_at: DateTime<Utc>,
    /// Workflow status; always [`STATUS_PENDING`] for now.
    #[serde(default = "default_status")]
    pub status: String,
}

fn default_status() -> String {
    STATUS_PENDING.to_string()
}

impl AdoptionRequest {
    /// Builds a pending request. The id and timestamp are placeholders
    /// that the store overwrites on insertion.
    #[must_use]
    pub fn pending(
        pet_id: PetId,
        requester_name: String,
        email: String,
        phone: Option<String>,
        message: Option<String>,
    ) -> Self {
        Self {
            id: RequestId::default(),
            pet_id,
            requester_name,
            email,
            phone,
            message,
            requested_at: Utc::now(),
            status: default_status(),
        }
    }
}

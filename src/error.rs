//! Application error type with HTTP status code mapping.
//!
//! [`ShelterError`] is the central error type for request handling. Each
//! variant maps to an HTTP status code and is rendered as an HTML error
//! page. Form validation problems never reach this type: they are shown
//! inline on the originating form.

use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use crate::store::StoreError;
use crate::views;

/// Request-level error enum with HTTP status code mapping.
#[derive(Debug, thiserror::Error)]
pub enum ShelterError {
    /// The requested record does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The request is malformed (e.g. path and payload ids disagree).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Persistence layer failure.
    #[error("storage error: {0}")]
    Storage(#[from] StoreError),

    /// Filesystem failure outside the stores (uploads, image cleanup).
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Multipart body could not be read.
    #[error("invalid upload: {0}")]
    Multipart(#[from] MultipartError),

    /// Page template failed to compile or render.
    #[error("template error: {0}")]
    Template(String),

    /// Session token could not be issued.
    #[error("session error: {0}")]
    Session(String),
}

impl ShelterError {
    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Multipart(e) => e.status(),
            Self::Storage(_) | Self::Io(_) | Self::Template(_) | Self::Session(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message safe to show to the visitor. Server-side details stay in
    /// the logs.
    #[must_use]
    pub fn public_message(&self) -> String {
        if self.status_code().is_server_error() {
            "An unexpected error occurred. Please try again later.".to_string()
        } else {
            self.to_string()
        }
    }
}

impl From<mustache::Error> for ShelterError {
    fn from(e: mustache::Error) -> Self {
        Self::Template(e.to_string())
    }
}

impl IntoResponse for ShelterError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, %status, "request rejected");
        }
        let body = views::error_page(status, &self.public_message());
        (status, Html(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_by_variant() {
        assert_eq!(
            ShelterError::NotFound("pet 9".to_string()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ShelterError::BadRequest("id mismatch".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ShelterError::Session("key".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn server_errors_hide_details() {
        let err = ShelterError::Session("secret key detail".to_string());
        assert!(!err.public_message().contains("secret"));

        let err = ShelterError::NotFound("pet 9".to_string());
        assert!(err.public_message().contains("pet 9"));
    }

    #[test]
    fn renders_status_on_response() {
        let response = ShelterError::NotFound("pet 9".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}

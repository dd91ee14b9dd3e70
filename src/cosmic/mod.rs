//! Cosmic bucket write access
//!
//! The importer only needs three writes: object types, objects and media.
//! They are expressed as the [`CosmicBucket`] trait so that the pipeline can
//! run against the HTTP client or an in-memory bucket.

#[cfg(feature = "api-backend")]
pub mod api;

#[cfg(feature = "api-backend")]
pub use api::CosmicApiClient;

use crate::models::{CosmicObject, MediaUpload, ObjectType, UploadedMedia};
use async_trait::async_trait;

/// Marker Cosmic puts in the message of duplicate-slug rejections.
pub const ALREADY_EXISTS_MARKER: &str = "already exists";

/// Error returned by a bucket write
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CosmicError {
    /// The resource was created by an earlier run
    #[error("Already exists: {0}")]
    AlreadyExists(String),
    /// The bucket refused this item
    #[error("Rejected ({status}): {message}")]
    Rejected { status: u16, message: String },
    /// The bucket could not be reached or failed internally
    #[error("Transport error: {0}")]
    Transport(String),
    /// The bucket answered with something unreadable
    #[error("Unexpected response: {0}")]
    Decode(String),
    /// The request could not be built from this item
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl CosmicError {
    /// Classify an error response from the write API.
    pub fn from_response(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        if message.contains(ALREADY_EXISTS_MARKER) {
            CosmicError::AlreadyExists(message)
        } else if (400..500).contains(&status) {
            CosmicError::Rejected { status, message }
        } else {
            CosmicError::Transport(format!("HTTP {}: {}", status, message))
        }
    }

    pub fn is_duplicate(&self) -> bool {
        matches!(self, CosmicError::AlreadyExists(_))
    }

    /// True when only the item in question is affected.
    pub fn is_item_fault(&self) -> bool {
        matches!(
            self,
            CosmicError::Rejected { .. } | CosmicError::InvalidRequest(_)
        )
    }
}

/// Write side of a Cosmic bucket.
#[async_trait]
pub trait CosmicBucket: Send + Sync {
    async fn create_object_type(&self, object_type: &ObjectType) -> Result<(), CosmicError>;

    async fn create_object(&self, object: &CosmicObject) -> Result<(), CosmicError>;

    /// Upload media, returning the name Cosmic assigned to it.
    async fn upload_media(&self, media: &MediaUpload) -> Result<UploadedMedia, CosmicError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_classification() {
        let err = CosmicError::from_response(400, "Object type with slug `post` already exists");
        assert!(err.is_duplicate());
        assert!(!err.is_item_fault());
    }

    #[test]
    fn test_client_error_is_item_fault() {
        let err = CosmicError::from_response(422, "title is required");
        assert_eq!(
            err,
            CosmicError::Rejected {
                status: 422,
                message: "title is required".to_string()
            }
        );
        assert!(err.is_item_fault());
    }

    #[test]
    fn test_invalid_request_is_item_fault() {
        let err = CosmicError::InvalidRequest("bad content type".to_string());
        assert!(err.is_item_fault());
        assert!(!err.is_duplicate());
    }

    #[test]
    fn test_server_error_is_transport() {
        let err = CosmicError::from_response(503, "unavailable");
        assert!(matches!(err, CosmicError::Transport(_)));
    }
}

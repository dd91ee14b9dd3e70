//! Media download and packaging
//!
//! Fetches the binary of every asset in every locale and packages it with
//! provenance metadata for upload. Download failures are returned as data.

#[cfg(feature = "api-backend")]
pub mod fetch;
pub mod transcoder;

#[cfg(feature = "api-backend")]
pub use fetch::HttpAssetFetcher;
pub use transcoder::{MediaTranscoder, transcode_assets};

use crate::models::MediaUpload;
use async_trait::async_trait;

/// Content type assumed when the server does not send one.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Error fetching an asset binary
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("Request failed: {0}")]
    Request(String),
    #[error("HTTP status {status} from {url}")]
    Status { status: u16, url: String },
    #[error("Failed to read body: {0}")]
    Body(String),
}

/// A downloaded asset body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedAsset {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

/// Source of asset binaries.
#[async_trait]
pub trait AssetFetcher: Send + Sync {
    /// Fetch the body at `url`.
    async fn fetch(&self, url: &str) -> Result<FetchedAsset, FetchError>;
}

/// Outcome of transcoding one asset in one locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaItem {
    Ready(MediaUpload),
    /// Download failed; `title` is the file name that was attempted
    Failed { title: String },
}

impl MediaItem {
    pub fn is_failed(&self) -> bool {
        matches!(self, MediaItem::Failed { .. })
    }

    pub fn into_upload(self) -> Option<MediaUpload> {
        match self {
            MediaItem::Ready(upload) => Some(upload),
            MediaItem::Failed { .. } => None,
        }
    }
}

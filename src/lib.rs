//! Contentful to Cosmic importer
//!
//! Converts a Contentful space export into Cosmic object types, media and
//! objects, then writes them to a bucket:
//! - Schema mapping (content types to object types and field descriptors)
//! - Media transcoding (asset download per locale)
//! - Entry transformation (one object per entry and locale)
//! - Import orchestration with progress reporting

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod convert;
pub mod cosmic;
pub mod import;
pub mod media;
pub mod models;
pub mod validation;

pub use config::{ConfigError, CosmicConfig};
pub use convert::{
    ConversionError, DescriptorIndex, EntryTransformer, SchemaMapping, map_content_types,
    transform_entries,
};
#[cfg(feature = "api-backend")]
pub use cosmic::CosmicApiClient;
pub use cosmic::{CosmicBucket, CosmicError};
pub use import::{
    CollectingObserver, ImportError, ImportObserver, ImportReport, ImportStage, Importer,
    TracingObserver,
};
#[cfg(feature = "api-backend")]
pub use media::HttpAssetFetcher;
pub use media::{AssetFetcher, FetchError, FetchedAsset, MediaItem, transcode_assets};
pub use validation::{ValidationError, validate_export_shape};

// Re-export models
pub use models::{
    Asset, ContentType, ContentfulExport, CosmicObject, Entry, FieldValue, Locale, MediaMetadata,
    MediaUpload, Metafield, MetafieldDescriptor, MetafieldKind, MetafieldValue, ObjectType,
    ResolvedLink, UploadedMedia,
};

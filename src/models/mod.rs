//! Models module
//!
//! Source (Contentful export) and destination (Cosmic bucket) data structures.

pub mod contentful;
pub mod cosmic;
pub mod rich_text;

pub use contentful::{
    Asset, AssetFile, ContentType, ContentfulExport, Entry, EntryFields, ExportError,
    FieldDefinition, FieldValue, Link, LinkType, Locale, LocalizedValues,
};
pub use cosmic::{
    CosmicObject, MediaMetadata, MediaUpload, Metafield, MetafieldDescriptor, MetafieldKind,
    MetafieldValue, ObjectStatus, ObjectType, ResolvedLink, UploadedMedia,
};
pub use rich_text::{Mark, RichTextNode};

//! Contentful to Cosmic conversion
//!
//! Maps content types to object types and entries to per-locale objects.

pub mod entries;
pub mod html;
pub mod links;
pub mod schema;

pub use entries::{EntryTransformer, FALLBACK_TITLE, resolve_title, transform_entries};
pub use html::{markdown_to_html, rich_text_to_html};
pub use links::{MediaIndex, resolve_link};
pub use schema::{
    DescriptorIndex, DisplayFieldIndex, SchemaMapping, map_content_types, metafield_kind,
    plural_name, singular_name,
};

/// Error during conversion.
///
/// Both variants mean the entries were converted against a different set
/// of content types than the ones they belong to.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    #[error("Entry '{entry}' belongs to unmapped content type '{content_type}'")]
    UnknownContentType { entry: String, content_type: String },
    #[error("Field '{field}' has no descriptor in content type '{content_type}'")]
    MissingDescriptor { content_type: String, field: String },
}

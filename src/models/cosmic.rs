//! Cosmic bucket model
//!
//! Object types, objects with metafields, and media as the Cosmic write API
//! accepts them.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Metafield type understood by Cosmic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MetafieldKind {
    /// Plain text
    Text,
    /// Rendered HTML
    HtmlTextarea,
    Markdown,
    Number,
    Date,
    /// Media reference by name
    File,
    /// Single object reference
    Object,
    /// Multiple object references
    Objects,
}

impl MetafieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetafieldKind::Text => "text",
            MetafieldKind::HtmlTextarea => "html-textarea",
            MetafieldKind::Markdown => "markdown",
            MetafieldKind::Number => "number",
            MetafieldKind::Date => "date",
            MetafieldKind::File => "file",
            MetafieldKind::Object => "object",
            MetafieldKind::Objects => "objects",
        }
    }
}

impl fmt::Display for MetafieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-field metadata derived from a content type field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetafieldDescriptor {
    /// `None` when the source type has no Cosmic counterpart
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<MetafieldKind>,
    pub title: String,
    pub key: String,
    pub required: bool,
    #[serde(skip)]
    pub is_slug: bool,
}

/// Object type definition sent to Cosmic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectType {
    /// Plural display name
    pub title: String,
    pub singular: String,
    pub slug: String,
    pub metafields: Vec<MetafieldDescriptor>,
}

/// Publication status of a created object.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectStatus {
    #[default]
    Draft,
    Published,
}

/// A resolved reference to another object or to uploaded media.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ResolvedLink {
    Link { slug: String },
    Media { name: String },
}

/// Value carried by a metafield.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetafieldValue {
    /// Rendered HTML, serialized JSON or a media name
    Text(String),
    Link(ResolvedLink),
    /// Element-wise resolution; unresolved elements stay as `None`
    Links(Vec<Option<ResolvedLink>>),
    /// Passed through from the export untouched
    Json(Value),
}

impl MetafieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            MetafieldValue::Text(s) => Some(s),
            MetafieldValue::Json(Value::String(s)) => Some(s),
            _ => None,
        }
    }
}

/// One typed value attached to an object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metafield {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<MetafieldKind>,
    pub title: String,
    pub key: String,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<MetafieldValue>,
}

impl Metafield {
    pub fn from_descriptor(descriptor: &MetafieldDescriptor, value: Option<MetafieldValue>) -> Self {
        Self {
            kind: descriptor.kind,
            title: descriptor.title.clone(),
            key: descriptor.key.clone(),
            required: descriptor.required,
            value,
        }
    }
}

/// An object to create, one per entry and locale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CosmicObject {
    pub type_slug: String,
    pub slug: String,
    pub status: ObjectStatus,
    pub title: String,
    pub locale: String,
    pub metafields: Vec<Metafield>,
}

impl CosmicObject {
    pub fn metafield(&self, key: &str) -> Option<&Metafield> {
        self.metafields.iter().find(|m| m.key == key)
    }
}

/// Provenance attached to uploaded media.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaMetadata {
    pub description: String,
    pub contentful_id: String,
    pub locale: String,
    pub title: String,
    pub original_url: String,
}

/// A downloaded asset ready for upload.
#[derive(Clone, PartialEq, Eq)]
pub struct MediaUpload {
    pub payload: Vec<u8>,
    pub filename: String,
    pub content_type: String,
    pub metadata: MediaMetadata,
}

impl fmt::Debug for MediaUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MediaUpload")
            .field("payload", &format_args!("{} bytes", self.payload.len()))
            .field("filename", &self.filename)
            .field("content_type", &self.content_type)
            .field("metadata", &self.metadata)
            .finish()
    }
}

/// Media accepted by Cosmic, under the name it was assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedMedia {
    pub name: String,
    pub metadata: MediaMetadata,
}

//! Contentful space export model
//!
//! Mirrors the subset of `contentful-export` JSON the importer reads:
//! content types, entries, assets and locales. Entry field values are
//! classified once at parse time into [`FieldValue`] so that downstream
//! coercion matches on variants instead of probing raw JSON.

use super::rich_text::RichTextNode;
use crate::validation::{ValidationError, validate_export_shape};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value, json};

/// Error reading an export document
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExportError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("{0}")]
    Malformed(String),
}

/// Top-level export document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentfulExport {
    pub content_types: Vec<ContentType>,
    pub entries: Vec<Entry>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub assets: Vec<Asset>,
    pub locales: Vec<Locale>,
}

impl ContentfulExport {
    /// Parse an export document, checking its top-level shape first.
    pub fn from_json_str(content: &str) -> Result<Self, ExportError> {
        let document: Value =
            serde_json::from_str(content).map_err(|e| ExportError::Malformed(e.to_string()))?;
        validate_export_shape(&document)?;
        serde_json::from_value(document).map_err(|e| ExportError::Malformed(e.to_string()))
    }
}

/// `null` reads as an empty collection.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// `sys` block carrying an identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SysId {
    pub id: String,
}

/// Content type definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentType {
    pub sys: SysId,
    pub name: String,
    /// Field id used as the entry title
    #[serde(default)]
    pub display_field: Option<String>,
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
}

impl ContentType {
    pub fn id(&self) -> &str {
        &self.sys.id
    }
}

/// One field of a content type.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    /// Only present for `Link` fields ("Entry" or "Asset")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_type: Option<String>,
    #[serde(default)]
    pub required: bool,
}

/// A locale declared by the space.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Locale {
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub default: bool,
}

impl Locale {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: None,
            default: false,
        }
    }
}

/// Entry `sys` block.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntrySys {
    pub id: String,
    pub content_type: ContentTypeRef,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentTypeRef {
    pub sys: SysId,
}

/// A content entry with locale-keyed field values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entry {
    pub sys: EntrySys,
    #[serde(default)]
    pub fields: EntryFields,
}

impl Entry {
    pub fn id(&self) -> &str {
        &self.sys.id
    }

    pub fn content_type_id(&self) -> &str {
        &self.sys.content_type.sys.id
    }
}

/// Entry fields in export order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryFields(Vec<(String, LocalizedValues)>);

impl EntryFields {
    pub fn get(&self, key: &str) -> Option<&LocalizedValues> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &LocalizedValues)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for EntryFields {
    fn from(map: Map<String, Value>) -> Self {
        EntryFields(
            map.into_iter()
                .map(|(key, value)| (key, LocalizedValues::from(value)))
                .collect(),
        )
    }
}

impl<'de> Deserialize<'de> for EntryFields {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Map::<String, Value>::deserialize(deserializer).map(EntryFields::from)
    }
}

impl Serialize for EntryFields {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let map: Map<String, Value> = self
            .0
            .iter()
            .map(|(k, v)| (k.clone(), v.to_json()))
            .collect();
        map.serialize(serializer)
    }
}

/// Values of one field keyed by locale code, in export order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocalizedValues(Vec<(String, FieldValue)>);

impl LocalizedValues {
    pub fn get(&self, locale: &str) -> Option<&FieldValue> {
        self.0.iter().find(|(code, _)| code == locale).map(|(_, v)| v)
    }

    /// First value in export order, whatever its locale.
    pub fn first(&self) -> Option<&FieldValue> {
        self.0.first().map(|(_, v)| v)
    }

    fn to_json(&self) -> Value {
        Value::Object(
            self.0
                .iter()
                .map(|(code, v)| (code.clone(), v.to_json()))
                .collect(),
        )
    }
}

impl From<Value> for LocalizedValues {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => LocalizedValues(
                map.into_iter()
                    .map(|(code, v)| (code, FieldValue::from(v)))
                    .collect(),
            ),
            // Not locale-keyed; nothing addressable by locale code.
            _ => LocalizedValues::default(),
        }
    }
}

/// Target kind of a link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkType {
    Entry,
    Asset,
    Other(String),
}

impl From<&str> for LinkType {
    fn from(s: &str) -> Self {
        match s {
            "Entry" => LinkType::Entry,
            "Asset" => LinkType::Asset,
            other => LinkType::Other(other.to_string()),
        }
    }
}

impl LinkType {
    fn as_str(&self) -> &str {
        match self {
            LinkType::Entry => "Entry",
            LinkType::Asset => "Asset",
            LinkType::Other(s) => s,
        }
    }
}

/// A `{"sys": {"type": "Link", ...}}` reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub id: String,
    pub link_type: LinkType,
}

/// A single locale's value of an entry field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// String, number, boolean or null
    Scalar(Value),
    Link(Link),
    /// A rich text document, with the object it was parsed from
    RichText {
        document: RichTextNode,
        raw: Map<String, Value>,
    },
    List(Vec<FieldValue>),
    /// Any other JSON object (locations, free-form objects)
    Object(Map<String, Value>),
}

impl FieldValue {
    pub fn as_link(&self) -> Option<&Link> {
        match self {
            FieldValue::Link(link) => Some(link),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Scalar(Value::String(s)) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Scalar(Value::Null))
    }

    /// True for anything that is not a string, number, boolean or null.
    pub fn is_structured(&self) -> bool {
        !matches!(self, FieldValue::Scalar(_))
    }

    /// JSON form of the value, as it appeared in the export.
    pub fn to_json(&self) -> Value {
        match self {
            FieldValue::Scalar(v) => v.clone(),
            FieldValue::Link(link) => json!({
                "sys": {
                    "type": "Link",
                    "linkType": link.link_type.as_str(),
                    "id": link.id,
                }
            }),
            FieldValue::RichText { raw, .. } => Value::Object(raw.clone()),
            FieldValue::List(items) => Value::Array(items.iter().map(FieldValue::to_json).collect()),
            FieldValue::Object(map) => Value::Object(map.clone()),
        }
    }
}

/// Root node type of a rich text document.
const DOCUMENT_NODE: &str = "document";

fn parse_link(map: &Map<String, Value>) -> Option<Link> {
    let sys = map.get("sys")?.as_object()?;
    if sys.get("type")?.as_str()? != "Link" {
        return None;
    }
    let id = sys.get("id")?.as_str()?.to_string();
    let link_type = sys
        .get("linkType")
        .and_then(Value::as_str)
        .map(LinkType::from)
        .unwrap_or_else(|| LinkType::Other(String::new()));
    Some(Link { id, link_type })
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Array(items) => FieldValue::List(items.into_iter().map(FieldValue::from).collect()),
            Value::Object(map) => {
                if let Some(link) = parse_link(&map) {
                    return FieldValue::Link(link);
                }
                if map.get("nodeType").and_then(Value::as_str) == Some(DOCUMENT_NODE) {
                    if let Ok(document) =
                        serde_json::from_value::<RichTextNode>(Value::Object(map.clone()))
                    {
                        return FieldValue::RichText { document, raw: map };
                    }
                }
                FieldValue::Object(map)
            }
            scalar => FieldValue::Scalar(scalar),
        }
    }
}

/// Asset `fields` block; every member is locale-keyed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetFields {
    #[serde(default)]
    pub title: Map<String, Value>,
    #[serde(default)]
    pub description: Option<Map<String, Value>>,
    #[serde(default)]
    pub file: Map<String, Value>,
}

/// File details of one asset locale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetFile {
    pub url: String,
    pub file_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

/// A media asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asset {
    pub sys: SysId,
    #[serde(default)]
    pub fields: AssetFields,
}

impl Asset {
    pub fn id(&self) -> &str {
        &self.sys.id
    }

    /// File details for `locale`, if the asset carries a usable file there.
    pub fn file(&self, locale: &str) -> Option<AssetFile> {
        let value = self.fields.file.get(locale)?;
        serde_json::from_value(value.clone()).ok()
    }

    /// True when the export has any file entry for `locale`, usable or not.
    pub fn has_file(&self, locale: &str) -> bool {
        self.fields.file.get(locale).is_some_and(|v| !v.is_null())
    }

    /// Name of the file entry for `locale`, falling back to the asset id.
    pub fn file_name(&self, locale: &str) -> String {
        self.fields
            .file
            .get(locale)
            .and_then(|f| f.get("fileName"))
            .and_then(Value::as_str)
            .unwrap_or(self.id())
            .to_string()
    }

    pub fn title(&self, locale: &str) -> Option<String> {
        localized_string(&self.fields.title, locale)
    }

    pub fn description(&self, locale: &str) -> Option<String> {
        self.fields
            .description
            .as_ref()
            .and_then(|d| localized_string(d, locale))
    }
}

fn localized_string(map: &Map<String, Value>, locale: &str) -> Option<String> {
    map.get(locale).and_then(Value::as_str).map(str::to_string)
}

//! Content type to object type mapping
//!
//! Derives Cosmic object types from Contentful content types, together with
//! the descriptor index the entry transformer resolves fields against.

use crate::models::{ContentType, FieldDefinition, MetafieldDescriptor, MetafieldKind, ObjectType};
use std::collections::HashMap;
use tracing::{debug, info};

/// Field descriptors keyed by content type id, then field id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DescriptorIndex {
    types: HashMap<String, HashMap<String, MetafieldDescriptor>>,
}

impl DescriptorIndex {
    /// Descriptor for `field_id` of `type_id`.
    pub fn get(&self, type_id: &str, field_id: &str) -> Option<&MetafieldDescriptor> {
        self.types.get(type_id)?.get(field_id)
    }

    /// All descriptors of a content type, if it was mapped.
    pub fn fields(&self, type_id: &str) -> Option<&HashMap<String, MetafieldDescriptor>> {
        self.types.get(type_id)
    }

    pub fn contains_type(&self, type_id: &str) -> bool {
        self.types.contains_key(type_id)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// Display field id keyed by content type id.
pub type DisplayFieldIndex = HashMap<String, Option<String>>;

/// Result of mapping a set of content types.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaMapping {
    pub object_types: Vec<ObjectType>,
    pub descriptors: DescriptorIndex,
    pub display_fields: DisplayFieldIndex,
}

/// Classify a Contentful field type as a Cosmic metafield kind.
///
/// Returns `None` for types with no Cosmic counterpart.
pub fn metafield_kind(field_type: &str, link_type: Option<&str>) -> Option<MetafieldKind> {
    match (field_type, link_type) {
        ("Symbol" | "Boolean" | "Object" | "Location", _) => Some(MetafieldKind::Text),
        ("RichText", _) => Some(MetafieldKind::HtmlTextarea),
        ("Text", _) => Some(MetafieldKind::Markdown),
        ("Number" | "Integer" | "Decimal", _) => Some(MetafieldKind::Number),
        ("Date", _) => Some(MetafieldKind::Date),
        ("Asset", _) => Some(MetafieldKind::File),
        ("Link", Some("Asset")) => Some(MetafieldKind::File),
        ("Link", _) => Some(MetafieldKind::Object),
        ("Array", _) => Some(MetafieldKind::Objects),
        _ => None,
    }
}

/// Plural form of a type name, e.g. "Category" -> "Categories".
pub fn plural_name(name: &str) -> String {
    pluralizer::pluralize(name, 2, false)
}

/// Singular form of a type name, e.g. "Categories" -> "Category".
pub fn singular_name(name: &str) -> String {
    pluralizer::pluralize(name, 1, false)
}

fn field_descriptor(field: &FieldDefinition) -> MetafieldDescriptor {
    MetafieldDescriptor {
        kind: metafield_kind(&field.field_type, field.link_type.as_deref()),
        title: field.name.clone(),
        key: field.id.clone(),
        required: field.required,
        is_slug: field.name.eq_ignore_ascii_case("slug"),
    }
}

/// Map content types to object types and build the lookup indices.
pub fn map_content_types(content_types: &[ContentType]) -> SchemaMapping {
    let mut mapping = SchemaMapping::default();

    for content_type in content_types {
        let type_id = content_type.id().to_string();

        let metafields: Vec<MetafieldDescriptor> =
            content_type.fields.iter().map(field_descriptor).collect();

        for descriptor in &metafields {
            if descriptor.kind.is_none() {
                debug!(
                    "Field '{}' of '{}' has no Cosmic metafield type",
                    descriptor.key, type_id
                );
            }
        }

        mapping.descriptors.types.insert(
            type_id.clone(),
            metafields
                .iter()
                .map(|d| (d.key.clone(), d.clone()))
                .collect(),
        );
        mapping
            .display_fields
            .insert(type_id.clone(), content_type.display_field.clone());

        mapping.object_types.push(ObjectType {
            title: plural_name(&content_type.name),
            singular: singular_name(&content_type.name),
            slug: type_id,
            metafields,
        });
    }

    info!("Mapped {} content types", mapping.object_types.len());

    mapping
}

//! Entry to object transformation
//!
//! Expands every entry into one Cosmic object per locale and coerces each
//! field value according to its metafield descriptor.

use super::ConversionError;
use super::html::{markdown_to_html, rich_text_to_html};
use super::links::{MediaIndex, resolve_link};
use super::schema::{DescriptorIndex, DisplayFieldIndex, SchemaMapping};
use crate::models::{
    CosmicObject, Entry, FieldValue, Locale, LocalizedValues, Metafield, MetafieldDescriptor,
    MetafieldKind, MetafieldValue, ObjectStatus, ResolvedLink, UploadedMedia,
};
use serde_json::Value;
use tracing::info;

/// Title used when an entry has neither a display field nor a `title` field.
pub const FALLBACK_TITLE: &str = "imported object";

/// Generic field consulted when the display field yields nothing.
const TITLE_FIELD: &str = "title";

/// Outcome of coercing one field value.
enum Coerced {
    Emit(Option<MetafieldValue>),
    Drop,
}

/// Converts entries using a schema mapping and the uploaded media.
pub struct EntryTransformer<'a> {
    display_fields: &'a DisplayFieldIndex,
    descriptors: &'a DescriptorIndex,
    media: MediaIndex,
}

impl<'a> EntryTransformer<'a> {
    pub fn new(
        display_fields: &'a DisplayFieldIndex,
        descriptors: &'a DescriptorIndex,
        media: &[UploadedMedia],
    ) -> Self {
        Self {
            display_fields,
            descriptors,
            media: MediaIndex::new(media),
        }
    }

    pub fn from_mapping(mapping: &'a SchemaMapping, media: &[UploadedMedia]) -> Self {
        Self::new(&mapping.display_fields, &mapping.descriptors, media)
    }

    /// Transform all entries, entry-major then locale, preserving input order.
    pub fn transform(
        &self,
        entries: &[Entry],
        locales: &[Locale],
    ) -> Result<Vec<CosmicObject>, ConversionError> {
        let mut objects = Vec::with_capacity(entries.len() * locales.len());

        for entry in entries {
            for locale in locales {
                objects.push(self.transform_entry(entry, &locale.code)?);
            }
        }

        info!(
            "Transformed {} entries into {} objects across {} locales",
            entries.len(),
            objects.len(),
            locales.len()
        );

        Ok(objects)
    }

    /// Transform one entry for one locale.
    pub fn transform_entry(
        &self,
        entry: &Entry,
        locale: &str,
    ) -> Result<CosmicObject, ConversionError> {
        let type_id = entry.content_type_id();
        if !self.descriptors.contains_type(type_id) {
            return Err(ConversionError::UnknownContentType {
                entry: entry.id().to_string(),
                content_type: type_id.to_string(),
            });
        }

        let display_field = self
            .display_fields
            .get(type_id)
            .and_then(|f| f.as_deref());

        let mut slug = entry.id().to_string();
        let mut metafields = Vec::with_capacity(entry.fields.len());

        for (key, values) in entry.fields.iter() {
            let descriptor = self.descriptors.get(type_id, key).ok_or_else(|| {
                ConversionError::MissingDescriptor {
                    content_type: type_id.to_string(),
                    field: key.to_string(),
                }
            })?;
            let value = values.get(locale);

            if descriptor.is_slug {
                if let Some(s) = value.and_then(FieldValue::as_str).filter(|s| !s.is_empty()) {
                    slug = s.to_string();
                }
            }

            match self.coerce(descriptor, value, locale) {
                Coerced::Emit(value) => metafields.push(Metafield::from_descriptor(descriptor, value)),
                Coerced::Drop => {}
            }
        }

        Ok(CosmicObject {
            type_slug: type_id.to_string(),
            slug,
            status: ObjectStatus::Draft,
            title: resolve_title(entry, display_field, locale),
            locale: locale.to_string(),
            metafields,
        })
    }

    fn coerce(
        &self,
        descriptor: &MetafieldDescriptor,
        value: Option<&FieldValue>,
        locale: &str,
    ) -> Coerced {
        match (descriptor.kind, value) {
            (Some(MetafieldKind::Object), Some(FieldValue::Link(link))) => Coerced::Emit(
                resolve_link(link, &self.media, locale).map(MetafieldValue::Link),
            ),
            (Some(MetafieldKind::File), value) => {
                match value
                    .and_then(FieldValue::as_link)
                    .and_then(|link| resolve_link(link, &self.media, locale))
                {
                    Some(ResolvedLink::Media { name }) => {
                        Coerced::Emit(Some(MetafieldValue::Text(name)))
                    }
                    // An entry link in a file field has no media name.
                    Some(ResolvedLink::Link { .. }) => Coerced::Emit(None),
                    None => Coerced::Drop,
                }
            }
            (Some(MetafieldKind::Objects), Some(FieldValue::List(items)))
                if items.first().is_some_and(|first| first.as_link().is_some()) =>
            {
                let links = items
                    .iter()
                    .map(|item| {
                        item.as_link()
                            .and_then(|link| resolve_link(link, &self.media, locale))
                    })
                    .collect();
                Coerced::Emit(Some(MetafieldValue::Links(links)))
            }
            (Some(MetafieldKind::HtmlTextarea), Some(FieldValue::RichText { document, .. })) => {
                Coerced::Emit(Some(MetafieldValue::Text(rich_text_to_html(document))))
            }
            (Some(MetafieldKind::HtmlTextarea), Some(FieldValue::Scalar(Value::String(source))))
                if !source.is_empty() =>
            {
                Coerced::Emit(Some(MetafieldValue::Text(markdown_to_html(source))))
            }
            (Some(MetafieldKind::Text), Some(value)) if value.is_structured() => {
                Coerced::Emit(Some(MetafieldValue::Text(value.to_json().to_string())))
            }
            (_, value) => Coerced::Emit(pass_through(value)),
        }
    }
}

fn pass_through(value: Option<&FieldValue>) -> Option<MetafieldValue> {
    value
        .filter(|v| !v.is_null())
        .map(|v| MetafieldValue::Json(v.to_json()))
}

fn title_text(value: &FieldValue) -> Option<String> {
    match value {
        FieldValue::Scalar(Value::String(s)) if s.is_empty() => None,
        FieldValue::Scalar(Value::String(s)) => Some(s.clone()),
        FieldValue::Scalar(Value::Null) => None,
        other => Some(other.to_json().to_string()),
    }
}

/// Resolve an object title for `locale`.
///
/// Tries the display field, then the entry's `title` field in this locale,
/// then `title` in its first locale, then [`FALLBACK_TITLE`].
pub fn resolve_title(entry: &Entry, display_field: Option<&str>, locale: &str) -> String {
    let localized = |values: &LocalizedValues| values.get(locale).and_then(title_text);

    display_field
        .and_then(|field| entry.fields.get(field))
        .and_then(localized)
        .or_else(|| {
            entry.fields.get(TITLE_FIELD).and_then(|values| {
                localized(values).or_else(|| values.first().and_then(title_text))
            })
        })
        .unwrap_or_else(|| FALLBACK_TITLE.to_string())
}

/// Transform entries into objects, one per entry and locale.
pub fn transform_entries(
    entries: &[Entry],
    locales: &[Locale],
    display_fields: &DisplayFieldIndex,
    descriptors: &DescriptorIndex,
    media: &[UploadedMedia],
) -> Result<Vec<CosmicObject>, ConversionError> {
    EntryTransformer::new(display_fields, descriptors, media).transform(entries, locales)
}

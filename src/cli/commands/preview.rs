//! Preview command handler
//!
//! Converts an export without touching the network and prints the object
//! types and objects an import would create. Media is not downloaded, so
//! file metafields are left out.

use super::import::load_export;
use crate::cli::error::CliError;
use crate::convert::{EntryTransformer, map_content_types};
use crate::import::ImportError;
use crate::models::{ContentfulExport, CosmicObject, ObjectType};
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Serialize)]
struct Preview<'a> {
    object_types: &'a [ObjectType],
    objects: &'a [CosmicObject],
}

/// Render the conversion of an export string as pretty JSON.
pub fn preview_json(content: &str) -> Result<String, CliError> {
    let export = ContentfulExport::from_json_str(content).map_err(ImportError::from)?;

    let mapping = map_content_types(&export.content_types);
    let objects = EntryTransformer::from_mapping(&mapping, &[])
        .transform(&export.entries, &export.locales)
        .map_err(ImportError::from)?;

    serde_json::to_string_pretty(&Preview {
        object_types: &mapping.object_types,
        objects: &objects,
    })
    .map_err(|e| CliError::Serialization(e.to_string()))
}

/// Render the conversion of the export at `path` as pretty JSON.
pub fn handle_preview(path: &Path) -> Result<String, CliError> {
    preview_json(&load_export(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_lists_types_and_objects() {
        let content = r#"{
            "contentTypes": [{
                "sys": {"id": "post"},
                "name": "Post",
                "displayField": "title",
                "fields": [{"id": "title", "name": "Title", "type": "Symbol", "required": true}]
            }],
            "entries": [{
                "sys": {"id": "p1", "contentType": {"sys": {"id": "post"}}},
                "fields": {"title": {"en": "Hello"}}
            }],
            "locales": [{"code": "en"}]
        }"#;

        let json: serde_json::Value = serde_json::from_str(&preview_json(content).unwrap()).unwrap();
        assert_eq!(json["object_types"][0]["title"], "Posts");
        assert_eq!(json["objects"][0]["title"], "Hello");
        assert_eq!(json["objects"][0]["status"], "draft");
    }

    #[test]
    fn test_preview_rejects_invalid_content() {
        let err = preview_json(r#"{"entries": []}"#).unwrap_err();
        assert!(matches!(err, CliError::Import(ImportError::InvalidContent(_))));
    }
}

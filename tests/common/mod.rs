//! Shared fixtures and in-memory ports for integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use contentful_cosmic_importer::media::{AssetFetcher, FetchError, FetchedAsset};
use contentful_cosmic_importer::{
    CosmicBucket, CosmicError, CosmicObject, MediaUpload, ObjectType, UploadedMedia,
};
use serde_json::{Value, json};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// Serves fixed bodies per URL; unknown URLs fail with a 404.
#[derive(Default)]
pub struct FakeFetcher {
    bodies: HashMap<String, (Vec<u8>, Option<String>)>,
    requested: Mutex<Vec<String>>,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn serve(mut self, url: &str, body: &[u8], content_type: Option<&str>) -> Self {
        self.bodies.insert(
            url.to_string(),
            (body.to_vec(), content_type.map(str::to_string)),
        );
        self
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl AssetFetcher for FakeFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedAsset, FetchError> {
        self.requested.lock().unwrap().push(url.to_string());
        match self.bodies.get(url) {
            Some((bytes, content_type)) => Ok(FetchedAsset {
                bytes: bytes.clone(),
                content_type: content_type.clone(),
            }),
            None => Err(FetchError::Status {
                status: 404,
                url: url.to_string(),
            }),
        }
    }
}

/// Records every write; failures are configured per slug or file name.
#[derive(Default)]
pub struct FakeBucket {
    pub object_types: Mutex<Vec<ObjectType>>,
    pub objects: Mutex<Vec<CosmicObject>>,
    pub media: Mutex<Vec<MediaUpload>>,
    existing_types: HashSet<String>,
    existing_objects: HashSet<String>,
    rejected_objects: HashSet<String>,
    broken_objects: HashSet<String>,
    rejected_media: HashSet<String>,
    broken_types: HashSet<String>,
}

impl FakeBucket {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_existing_type(mut self, slug: &str) -> Self {
        self.existing_types.insert(slug.to_string());
        self
    }

    pub fn with_existing_object(mut self, slug: &str) -> Self {
        self.existing_objects.insert(slug.to_string());
        self
    }

    pub fn rejecting_object(mut self, slug: &str) -> Self {
        self.rejected_objects.insert(slug.to_string());
        self
    }

    pub fn failing_object(mut self, slug: &str) -> Self {
        self.broken_objects.insert(slug.to_string());
        self
    }

    pub fn failing_type(mut self, slug: &str) -> Self {
        self.broken_types.insert(slug.to_string());
        self
    }

    pub fn rejecting_media(mut self, filename: &str) -> Self {
        self.rejected_media.insert(filename.to_string());
        self
    }

    pub fn created_objects(&self) -> Vec<CosmicObject> {
        self.objects.lock().unwrap().clone()
    }

    pub fn created_types(&self) -> Vec<ObjectType> {
        self.object_types.lock().unwrap().clone()
    }

    pub fn uploaded_media(&self) -> Vec<MediaUpload> {
        self.media.lock().unwrap().clone()
    }
}

#[async_trait]
impl CosmicBucket for FakeBucket {
    async fn create_object_type(&self, object_type: &ObjectType) -> Result<(), CosmicError> {
        if self.existing_types.contains(&object_type.slug) {
            return Err(CosmicError::from_response(
                400,
                format!("Object type with slug {} already exists", object_type.slug),
            ));
        }
        if self.broken_types.contains(&object_type.slug) {
            return Err(CosmicError::Transport("connection reset".to_string()));
        }
        self.object_types.lock().unwrap().push(object_type.clone());
        Ok(())
    }

    async fn create_object(&self, object: &CosmicObject) -> Result<(), CosmicError> {
        if self.existing_objects.contains(&object.slug) {
            return Err(CosmicError::from_response(
                400,
                format!("Object with slug {} already exists", object.slug),
            ));
        }
        if self.rejected_objects.contains(&object.slug) {
            return Err(CosmicError::from_response(422, "metafield value invalid"));
        }
        if self.broken_objects.contains(&object.slug) {
            return Err(CosmicError::from_response(500, "internal error"));
        }
        self.objects.lock().unwrap().push(object.clone());
        Ok(())
    }

    async fn upload_media(&self, media: &MediaUpload) -> Result<UploadedMedia, CosmicError> {
        if self.rejected_media.contains(&media.filename) {
            return Err(CosmicError::from_response(413, "file too large"));
        }
        self.media.lock().unwrap().push(media.clone());
        Ok(UploadedMedia {
            name: media.filename.clone(),
            metadata: media.metadata.clone(),
        })
    }
}

pub fn locale(code: &str) -> Value {
    json!({"code": code, "name": code})
}

pub fn field(id: &str, name: &str, field_type: &str, link_type: Option<&str>) -> Value {
    let mut field = json!({"id": id, "name": name, "type": field_type, "required": false});
    if let Some(link_type) = link_type {
        field["linkType"] = json!(link_type);
    }
    field
}

pub fn content_type(id: &str, name: &str, display_field: &str, fields: Vec<Value>) -> Value {
    json!({
        "sys": {"id": id},
        "name": name,
        "displayField": display_field,
        "fields": fields
    })
}

pub fn entry(id: &str, type_id: &str, fields: Value) -> Value {
    json!({
        "sys": {"id": id, "contentType": {"sys": {"id": type_id}}},
        "fields": fields
    })
}

pub fn entry_link(id: &str) -> Value {
    json!({"sys": {"type": "Link", "linkType": "Entry", "id": id}})
}

pub fn asset_link(id: &str) -> Value {
    json!({"sys": {"type": "Link", "linkType": "Asset", "id": id}})
}

pub fn asset(id: &str, locale: &str, title: &str, url: &str, file_name: &str) -> Value {
    json!({
        "sys": {"id": id},
        "fields": {
            "title": {locale: title},
            "file": {locale: {"url": url, "fileName": file_name, "contentType": "image/png"}}
        }
    })
}

pub fn rich_text(text: &str) -> Value {
    json!({
        "nodeType": "document",
        "data": {},
        "content": [{
            "nodeType": "paragraph",
            "data": {},
            "content": [{"nodeType": "text", "value": text, "marks": [], "data": {}}]
        }]
    })
}

/// The "Post" export used by the end-to-end scenarios.
pub fn post_export() -> Value {
    json!({
        "contentTypes": [content_type("post", "Post", "title", vec![
            field("title", "Title", "Symbol", None),
            field("body", "Body", "RichText", None),
            field("cover", "Cover", "Link", Some("Asset")),
        ])],
        "entries": [entry("hello-post", "post", json!({
            "title": {"en": "Hello"},
            "body": {"en": rich_text("First post")},
            "cover": {"en": asset_link("cover-asset")}
        }))],
        "assets": [asset("cover-asset", "en", "Cover", "https://images.example.com/hello.png", "hello.png")],
        "locales": [locale("en")]
    })
}

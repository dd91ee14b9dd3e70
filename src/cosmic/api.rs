//! Cosmic write API client backed by reqwest.

use super::{CosmicBucket, CosmicError};
use crate::config::{ConfigError, CosmicConfig};
use crate::models::{CosmicObject, MediaUpload, ObjectType, UploadedMedia};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

/// HTTP client for one bucket.
#[derive(Debug, Clone)]
pub struct CosmicApiClient {
    client: Client,
    config: CosmicConfig,
}

impl CosmicApiClient {
    /// Create a client; the configuration must carry a slug and write key.
    pub fn new(config: CosmicConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            client: Client::new(),
            config,
        })
    }

    fn write_key(&self) -> &str {
        self.config.bucket.write_key.as_deref().unwrap_or_default()
    }

    fn endpoint(&self, base: &str, path: &str) -> String {
        format!(
            "{}/{}/{}",
            base.trim_end_matches('/'),
            self.config.bucket.slug,
            path
        )
    }

    /// POST `body` plus the write key as JSON.
    async fn post_json<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<Value, CosmicError> {
        let mut payload =
            serde_json::to_value(body).map_err(|e| CosmicError::Decode(e.to_string()))?;
        if let Value::Object(map) = &mut payload {
            map.insert(
                "write_key".to_string(),
                Value::String(self.write_key().to_string()),
            );
        }

        let url = self.endpoint(&self.config.api.url, path);
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| CosmicError::Transport(e.to_string()))?;

        read_response(response).await
    }
}

/// Turn a response into its JSON body or a classified error.
async fn read_response(response: Response) -> Result<Value, CosmicError> {
    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| CosmicError::Transport(e.to_string()))?;

    if status.is_success() {
        return serde_json::from_str(&text).map_err(|e| CosmicError::Decode(e.to_string()));
    }

    let message = serde_json::from_str::<Value>(&text)
        .ok()
        .and_then(|body| body.get("message").and_then(Value::as_str).map(str::to_string))
        .unwrap_or(text);

    Err(CosmicError::from_response(status.as_u16(), message))
}

#[async_trait]
impl CosmicBucket for CosmicApiClient {
    async fn create_object_type(&self, object_type: &ObjectType) -> Result<(), CosmicError> {
        self.post_json("add-object-type", object_type).await.map(|_| ())
    }

    async fn create_object(&self, object: &CosmicObject) -> Result<(), CosmicError> {
        self.post_json("add-object", object).await.map(|_| ())
    }

    async fn upload_media(&self, media: &MediaUpload) -> Result<UploadedMedia, CosmicError> {
        let metadata = serde_json::to_string(&media.metadata)
            .map_err(|e| CosmicError::Decode(e.to_string()))?;
        let part = Part::bytes(media.payload.clone())
            .file_name(media.filename.clone())
            .mime_str(&media.content_type)
            .map_err(|e| {
                CosmicError::InvalidRequest(format!(
                    "invalid content type '{}': {}",
                    media.content_type, e
                ))
            })?;
        let form = Form::new()
            .part("media", part)
            .text("write_key", self.write_key().to_string())
            .text("metadata", metadata);

        let url = self.endpoint(&self.config.api.upload_url, "media");
        debug!("POST {} ({})", url, media.filename);

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| CosmicError::Transport(e.to_string()))?;

        let body = read_response(response).await?;
        let name = body
            .get("media")
            .and_then(|m| m.get("name"))
            .and_then(Value::as_str)
            .ok_or_else(|| CosmicError::Decode("media response without name".to_string()))?;

        Ok(UploadedMedia {
            name: name.to_string(),
            metadata: media.metadata.clone(),
        })
    }
}

//! Importer configuration file support
//!
//! Handles parsing of `.cosmic-import.toml` configuration files and
//! environment variable overrides.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration filename
pub const CONFIG_FILENAME: &str = ".cosmic-import.toml";

/// Default Cosmic write API base URL
pub const DEFAULT_API_URL: &str = "https://api.cosmicjs.com/v1";

/// Default Cosmic media upload base URL
pub const DEFAULT_UPLOAD_URL: &str = "https://upload.cosmicjs.com/v1";

/// Environment variable for the bucket slug
pub const ENV_BUCKET_SLUG: &str = "COSMIC_BUCKET_SLUG";

/// Environment variable for the read key
pub const ENV_READ_KEY: &str = "COSMIC_READ_KEY";

/// Environment variable for the write key
pub const ENV_WRITE_KEY: &str = "COSMIC_WRITE_KEY";

/// Environment variable for the API base URL
pub const ENV_API_URL: &str = "COSMIC_API_URL";

/// Environment variable for the upload base URL
pub const ENV_UPLOAD_URL: &str = "COSMIC_UPLOAD_URL";

/// Error loading or validating configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    Read(PathBuf, String),
    #[error("Failed to parse config file: {0}")]
    Parse(String),
    #[error("Missing configuration value: {0}")]
    Missing(&'static str),
}

/// Bucket section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketSection {
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub read_key: Option<String>,
    #[serde(default)]
    pub write_key: Option<String>,
}

/// API endpoint section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiSection {
    #[serde(default = "default_api_url")]
    pub url: String,
    #[serde(default = "default_upload_url")]
    pub upload_url: String,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_upload_url() -> String {
    DEFAULT_UPLOAD_URL.to_string()
}

impl Default for ApiSection {
    fn default() -> Self {
        Self {
            url: default_api_url(),
            upload_url: default_upload_url(),
        }
    }
}

/// Complete importer configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CosmicConfig {
    #[serde(default)]
    pub bucket: BucketSection,
    #[serde(default)]
    pub api: ApiSection,
}

impl CosmicConfig {
    /// Configuration for a bucket with default endpoints.
    pub fn for_bucket(slug: impl Into<String>, write_key: Option<String>) -> Self {
        Self {
            bucket: BucketSection {
                slug: slug.into(),
                read_key: None,
                write_key,
            },
            api: ApiSection::default(),
        }
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Read(path.to_path_buf(), e.to_string()))?;
        Self::from_toml(&content)
    }

    /// Load `.cosmic-import.toml` from `dir`, or defaults when it is absent,
    /// then apply environment overrides.
    pub fn load_from_dir(dir: &Path) -> Result<Self, ConfigError> {
        let path = dir.join(CONFIG_FILENAME);
        let mut config = if path.exists() {
            Self::load(&path)?
        } else {
            Self::default()
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply overrides from `COSMIC_*` environment variables.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(slug) = lookup(ENV_BUCKET_SLUG) {
            self.bucket.slug = slug;
        }
        if let Some(key) = lookup(ENV_READ_KEY) {
            self.bucket.read_key = Some(key);
        }
        if let Some(key) = lookup(ENV_WRITE_KEY) {
            self.bucket.write_key = Some(key);
        }
        if let Some(url) = lookup(ENV_API_URL) {
            self.api.url = url;
        }
        if let Some(url) = lookup(ENV_UPLOAD_URL) {
            self.api.upload_url = url;
        }
    }

    /// Writes need a bucket slug and a write key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bucket.slug.trim().is_empty() {
            return Err(ConfigError::Missing("bucket slug"));
        }
        if self.bucket.write_key.as_deref().is_none_or(|k| k.is_empty()) {
            return Err(ConfigError::Missing("write key"));
        }
        Ok(())
    }
}

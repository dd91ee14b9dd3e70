//! Import command handler

use crate::cli::error::CliError;
use crate::config::CosmicConfig;
use crate::cosmic::CosmicApiClient;
use crate::import::{ImportObserver, ImportReport, Importer};
use crate::media::HttpAssetFetcher;
use std::path::{Path, PathBuf};

/// Arguments for the import command
#[derive(Debug, Clone)]
pub struct ImportArgs {
    pub export: PathBuf,
    pub config: Option<PathBuf>,
    pub bucket: Option<String>,
    pub read_key: Option<String>,
    pub write_key: Option<String>,
}

/// Read an export file into memory.
pub fn load_export(path: &Path) -> Result<String, CliError> {
    if !path.exists() {
        return Err(CliError::FileNotFound(path.to_path_buf()));
    }
    std::fs::read_to_string(path)
        .map_err(|e| CliError::FileReadError(path.to_path_buf(), e.to_string()))
}

/// Resolve configuration: file (explicit or from the working directory),
/// then environment, then command-line flags.
pub fn resolve_config(args: &ImportArgs) -> Result<CosmicConfig, CliError> {
    let mut config = match &args.config {
        Some(path) => {
            let mut config = CosmicConfig::load(path)?;
            config.apply_env_overrides();
            config
        }
        None => CosmicConfig::load_from_dir(Path::new("."))?,
    };

    if let Some(bucket) = &args.bucket {
        config.bucket.slug = bucket.clone();
    }
    if let Some(key) = &args.read_key {
        config.bucket.read_key = Some(key.clone());
    }
    if let Some(key) = &args.write_key {
        config.bucket.write_key = Some(key.clone());
    }

    config.validate()?;
    Ok(config)
}

/// Run a full import against the configured bucket.
pub async fn handle_import(
    args: &ImportArgs,
    observer: &dyn ImportObserver,
) -> Result<ImportReport, CliError> {
    let config = resolve_config(args)?;
    let content = load_export(&args.export)?;

    let client = CosmicApiClient::new(config)?;
    let mut importer = Importer::new(client, HttpAssetFetcher::new());

    Ok(importer.run_json(&content, observer).await?)
}

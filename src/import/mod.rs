//! Import orchestration
//!
//! Sequences the conversion steps against a Cosmic bucket:
//! - validate the export and map its content types
//! - create object types
//! - download media and upload it
//! - transform entries and create objects

pub mod importer;
pub mod observer;

pub use importer::Importer;
pub use observer::{CollectingObserver, ImportObserver, TracingObserver};

use crate::convert::ConversionError;
use crate::cosmic::CosmicError;
use crate::models::ExportError;
use crate::validation::ValidationError;
use std::fmt;

/// Stage labels reported to the progress sink, in emission order.
pub mod labels {
    pub const CONTENT_VALID: &str = "Content valid. Parsing...";
    pub const PARSED_CONTENT_TYPES: &str = "Successfully parsed content types";
    pub const CREATED_CONTENT_TYPES: &str = "Successfully created content types";
    pub const PARSED_MEDIA: &str = "Successfully parsed media";
    pub const UPLOADING_MEDIA: &str = "Uploading media to Cosmic...";
    pub const CREATED_MEDIA: &str = "Successfully created media";
    pub const PARSED_ENTRIES: &str = "Successfully parsed entries";
    pub const CREATED_OBJECTS: &str = "Successfully created objects";

    pub const ALL: [&str; 8] = [
        CONTENT_VALID,
        PARSED_CONTENT_TYPES,
        CREATED_CONTENT_TYPES,
        PARSED_MEDIA,
        UPLOADING_MEDIA,
        CREATED_MEDIA,
        PARSED_ENTRIES,
        CREATED_OBJECTS,
    ];
}

/// Fatal error of an import run
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImportError {
    #[error("invalid content: {0}")]
    InvalidContent(#[from] ValidationError),
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("Conversion error: {0}")]
    Conversion(#[from] ConversionError),
    #[error("Cosmic error: {0}")]
    Cosmic(#[from] CosmicError),
}

impl From<ExportError> for ImportError {
    fn from(err: ExportError) -> Self {
        match err {
            ExportError::Invalid(e) => ImportError::InvalidContent(e),
            ExportError::Malformed(msg) => ImportError::ParseError(msg),
        }
    }
}

/// Position of an import run in its pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ImportStage {
    #[default]
    Idle,
    ValidatingInput,
    TypesCreated,
    MediaTranscoded,
    MediaUploaded,
    ObjectsTransformed,
    ObjectsCreated,
    Complete,
    Failed,
}

impl ImportStage {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ImportStage::Complete | ImportStage::Failed)
    }
}

impl fmt::Display for ImportStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ImportStage::Idle => "idle",
            ImportStage::ValidatingInput => "validating input",
            ImportStage::TypesCreated => "types created",
            ImportStage::MediaTranscoded => "media transcoded",
            ImportStage::MediaUploaded => "media uploaded",
            ImportStage::ObjectsTransformed => "objects transformed",
            ImportStage::ObjectsCreated => "objects created",
            ImportStage::Complete => "complete",
            ImportStage::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Summary of a completed import run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[must_use = "import reports carry per-item failure messages"]
pub struct ImportReport {
    pub object_types_created: usize,
    /// Object types skipped because they already existed
    pub object_types_existing: usize,
    pub media_uploaded: usize,
    pub media_failed: usize,
    pub objects_created: usize,
    /// Objects skipped because they already existed
    pub objects_existing: usize,
    /// Per-item failures, in the order they were reported
    pub messages: Vec<String>,
}

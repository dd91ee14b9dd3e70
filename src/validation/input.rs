//! Input validation for Contentful exports.
//!
//! An export is only usable when it carries the `contentTypes`, `entries`
//! and `locales` collections. `assets` is optional.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Top-level collections every export must carry.
pub const REQUIRED_COLLECTIONS: [&str; 3] = ["contentTypes", "entries", "locales"];

/// Errors that can occur during input validation.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
pub enum ValidationError {
    /// Document root is not a JSON object
    #[error("export root must be a JSON object")]
    NotAnObject,

    /// A required collection is absent or null
    #[error("missing required collection '{0}'")]
    MissingCollection(&'static str),

    /// A required collection is present but not an array
    #[error("'{0}' must be an array")]
    NotACollection(&'static str),
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validate the top-level shape of an export document.
///
/// # Examples
///
/// ```
/// use contentful_cosmic_importer::validation::input::validate_export_shape;
/// use serde_json::json;
///
/// assert!(validate_export_shape(&json!({"contentTypes": [], "entries": [], "locales": []})).is_ok());
/// assert!(validate_export_shape(&json!({"entries": []})).is_err());
/// ```
pub fn validate_export_shape(document: &Value) -> ValidationResult<()> {
    let root = document.as_object().ok_or(ValidationError::NotAnObject)?;

    for name in REQUIRED_COLLECTIONS {
        match root.get(name) {
            None | Some(Value::Null) => return Err(ValidationError::MissingCollection(name)),
            Some(Value::Array(_)) => {}
            Some(_) => return Err(ValidationError::NotACollection(name)),
        }
    }

    if let Some(assets) = root.get("assets") {
        if !assets.is_array() && !assets.is_null() {
            return Err(ValidationError::NotACollection("assets"));
        }
    }

    Ok(())
}

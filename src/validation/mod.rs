//! Validation functionality
//!
//! Checks an export document's shape before any conversion or write happens.

pub mod input;

pub use input::{REQUIRED_COLLECTIONS, ValidationError, ValidationResult, validate_export_shape};

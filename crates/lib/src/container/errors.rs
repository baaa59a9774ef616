//! Error types for container operations.
//!
//! This module defines structured error types for the container data model,
//! covering codec failures and value type mismatches.

use thiserror::Error;

/// Structured error types for container operations.
///
/// # Stability
///
/// - New variants may be added in minor versions (enum is `#[non_exhaustive]`)
/// - Existing variants will not be removed in minor versions
/// - Helper methods like `is_*()` provide stable APIs
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ContainerError {
    /// Serialization of a container failed
    #[error("Container serialization failed: {reason}")]
    SerializationFailed { reason: String },

    /// Decoding serialized container data failed
    #[error("Container deserialization failed: {reason}")]
    DeserializationFailed { reason: String },

    /// Serialized data was written by an unsupported format version
    #[error("Unsupported container format version {found}; only version {supported} is supported")]
    UnsupportedVersion { found: u8, supported: u8 },

    /// Serialized data lists the same key twice
    #[error("Duplicate container key: {key}")]
    DuplicateKey { key: String },

    /// A value did not have the expected type
    #[error("Container type mismatch: expected {expected}, found {actual}")]
    TypeMismatch { expected: String, actual: String },
}

impl ContainerError {
    /// Check if this error is related to serialization
    pub fn is_serialization_error(&self) -> bool {
        matches!(
            self,
            ContainerError::SerializationFailed { .. }
                | ContainerError::DeserializationFailed { .. }
                | ContainerError::UnsupportedVersion { .. }
                | ContainerError::DuplicateKey { .. }
        )
    }

    /// Check if this error is related to type mismatches
    pub fn is_type_error(&self) -> bool {
        matches!(self, ContainerError::TypeMismatch { .. })
    }
}

// Conversion from ContainerError to the main Error type
impl From<ContainerError> for crate::Error {
    fn from(err: ContainerError) -> Self {
        crate::Error::Container(err)
    }
}

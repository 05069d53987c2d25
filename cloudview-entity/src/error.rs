//! Error types for records and record storage

use thiserror::Error;

/// Result type for entity operations
pub type Result<T> = std::result::Result<T, EntityError>;

/// Errors that can occur reading, storing or reconciling records
#[derive(Debug, Error)]
pub enum EntityError {
    /// The record's schema has no field with this name
    #[error("field not found on {entity_type}: {name}")]
    FieldNotFound { entity_type: String, name: String },

    /// A value does not match the declared field type
    #[error("type mismatch on {entity_type}.{field}: expected {expected}")]
    TypeMismatch {
        entity_type: String,
        field: String,
        expected: String,
    },

    /// Record not found in the store
    #[error("record not found: {id}")]
    RecordNotFound { id: String },

    /// A record of another resource type was handed in
    #[error("expected a {expected} record, got {actual}")]
    EntityTypeMismatch { expected: String, actual: String },

    /// Temp resource keys must be plain file names
    #[error("invalid temp resource key: {key}")]
    InvalidKey { key: String },

    /// Schema lookup error
    #[error(transparent)]
    Fields(#[from] cloudview_fields::FieldsError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl EntityError {
    pub fn field_not_found(entity_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self::FieldNotFound {
            entity_type: entity_type.into(),
            name: name.into(),
        }
    }
}

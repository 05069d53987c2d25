//! Error types for the schema registry

use thiserror::Error;

/// Result type for schema operations
pub type Result<T> = std::result::Result<T, FieldsError>;

/// Errors that can occur in schema registry operations
#[derive(Debug, Error)]
pub enum FieldsError {
    /// Field not found by name on a resource type
    #[error("field not found on {entity_type}: {name}")]
    FieldNotFound { entity_type: String, name: String },

    /// Resource schema not found
    #[error("resource schema not found: {name}")]
    SchemaNotFound { name: String },

    /// Two fields of one resource type share a name
    #[error("duplicate field name on {entity_type}: {name}")]
    DuplicateFieldName { entity_type: String, name: String },

    /// Two schemas share an entity type name
    #[error("duplicate resource schema: {name}")]
    DuplicateSchema { name: String },

    /// The label field is not one of the schema's fields
    #[error("label field '{field}' is not declared on {entity_type}")]
    LabelFieldMissing { entity_type: String, field: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FieldsError::FieldNotFound {
            entity_type: "aws_cloud_volume".into(),
            name: "iops".into(),
        };
        assert_eq!(err.to_string(), "field not found on aws_cloud_volume: iops");
    }

    #[test]
    fn test_label_field_error() {
        let err = FieldsError::LabelFieldMissing {
            entity_type: "aws_cloud_vpc".into(),
            field: "title".into(),
        };
        assert!(err.to_string().contains("title"));
        assert!(err.to_string().contains("aws_cloud_vpc"));
    }
}

//! Error types for view composition

use thiserror::Error;

use crate::fieldset::PolicyProblem;

/// Result type for view operations
pub type Result<T> = std::result::Result<T, ViewsError>;

/// Errors that can occur loading views or rendering records
#[derive(Debug, Error)]
pub enum ViewsError {
    /// No view definition for a resource type
    #[error("view not found: {entity_type}")]
    ViewNotFound { entity_type: String },

    /// A view definition disagrees with its resource schema
    #[error("invalid view for {entity_type}: {}", summarize(.problems))]
    InvalidView {
        entity_type: String,
        problems: Vec<PolicyProblem>,
    },

    /// The single-record renderer failed
    #[error("render failed: {message}")]
    Render { message: String },

    /// Record access error
    #[error(transparent)]
    Entity(#[from] cloudview_entity::EntityError),

    /// Schema lookup error
    #[error(transparent)]
    Fields(#[from] cloudview_fields::FieldsError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

impl ViewsError {
    pub fn render(message: impl Into<String>) -> Self {
        Self::Render {
            message: message.into(),
        }
    }
}

fn summarize(problems: &[PolicyProblem]) -> String {
    problems
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_view_lists_every_problem() {
        let err = ViewsError::InvalidView {
            entity_type: "aws_cloud_volume".into(),
            problems: vec![
                PolicyProblem::DanglingField {
                    fieldset: "volume".into(),
                    field: "throughput".into(),
                },
                PolicyProblem::UnknownSelectable {
                    field: "kms_key".into(),
                },
            ],
        };
        let message = err.to_string();
        assert!(message.starts_with("invalid view for aws_cloud_volume: "));
        assert!(message.contains("throughput"));
        assert!(message.contains("; "));
        assert!(message.contains("kms_key"));
    }
}

//! Error types for the resource catalog

use thiserror::Error;

/// Result type for catalog operations
pub type Result<T> = std::result::Result<T, ResourceError>;

#[derive(Debug, Error)]
pub enum ResourceError {
    #[error(transparent)]
    Config(#[from] cloudview_config::ConfigError),

    #[error(transparent)]
    Fields(#[from] cloudview_fields::FieldsError),

    #[error(transparent)]
    Entity(#[from] cloudview_entity::EntityError),

    #[error(transparent)]
    Views(#[from] cloudview_views::ViewsError),

    /// An external lookup (role directory, link builder) failed
    #[error("lookup failed: {message}")]
    Lookup { message: String },
}

impl From<cloudview_views::ResolveError> for ResourceError {
    fn from(e: cloudview_views::ResolveError) -> Self {
        Self::Lookup {
            message: e.to_string(),
        }
    }
}

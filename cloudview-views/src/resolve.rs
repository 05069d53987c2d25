//! Display-time value substitution.

use cloudview_entity::{FieldValue, Record};
use thiserror::Error;

/// Why a resolver could not produce a display value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ResolveError {
    message: String,
}

impl ResolveError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Replaces one field's stored value with a friendlier one before rendering,
/// e.g. an IAM instance profile ARN shown as its role name.
///
/// The substitution only affects the rendered copy. When `resolve` fails the
/// composer logs the error and shows `fallback` instead.
pub trait ValueResolver: Send + Sync {
    fn field_name(&self) -> &str;

    fn resolve(&self, record: &Record, value: &FieldValue) -> Result<FieldValue, ResolveError>;

    fn fallback(&self, _record: &Record, value: &FieldValue) -> FieldValue {
        value.clone()
    }
}

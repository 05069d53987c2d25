//! Showing an instance's IAM role by name.

use std::collections::HashMap;
use std::sync::Arc;

use cloudview_entity::{FieldValue, Record};
use cloudview_views::{ResolveError, ValueResolver};

/// Looks up IAM role names per cloud context.
pub trait RoleDirectory: Send + Sync {
    /// `Ok(None)` when the directory has no such role.
    fn role_name(&self, cloud_context: &str, role_id: &str) -> Result<Option<String>, ResolveError>;
}

/// Fixed role table, for tests and offline catalogs.
#[derive(Debug, Clone, Default)]
pub struct StaticRoleDirectory {
    roles: HashMap<(String, String), String>,
}

impl StaticRoleDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_role(
        mut self,
        cloud_context: impl Into<String>,
        role_id: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        self.roles
            .insert((cloud_context.into(), role_id.into()), name.into());
        self
    }
}

impl RoleDirectory for StaticRoleDirectory {
    fn role_name(&self, cloud_context: &str, role_id: &str) -> Result<Option<String>, ResolveError> {
        Ok(self
            .roles
            .get(&(cloud_context.to_string(), role_id.to_string()))
            .cloned())
    }
}

/// Replaces the stored `iam_role` identifier with the role's name from the
/// record's cloud context. Unknown roles keep the raw identifier.
#[derive(Clone)]
pub struct IamRoleResolver {
    directory: Arc<dyn RoleDirectory>,
}

impl IamRoleResolver {
    pub const FIELD: &'static str = "iam_role";

    pub fn new(directory: Arc<dyn RoleDirectory>) -> Self {
        Self { directory }
    }
}

impl ValueResolver for IamRoleResolver {
    fn field_name(&self) -> &str {
        Self::FIELD
    }

    fn resolve(&self, record: &Record, value: &FieldValue) -> Result<FieldValue, ResolveError> {
        let cloud_context = record
            .cloud_context()
            .ok_or_else(|| ResolveError::new("record has no cloud context"))?;
        let role_id = value
            .as_text()
            .ok_or_else(|| ResolveError::new("role identifier is not text"))?;
        match self.directory.role_name(&cloud_context, &role_id)? {
            Some(name) => Ok(FieldValue::from(name)),
            None => Err(ResolveError::new(format!(
                "no role '{role_id}' in '{cloud_context}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aws::instance;

    fn instance_with_role(context: &str, role: &str) -> Record {
        Record::new(Arc::new(instance::schema()))
            .with("cloud_context", context)
            .unwrap()
            .with("iam_role", role)
            .unwrap()
    }

    fn resolver() -> IamRoleResolver {
        IamRoleResolver::new(Arc::new(
            StaticRoleDirectory::new().with_role("aws-east", "abc123", "web-server-role"),
        ))
    }

    #[test]
    fn role_name_from_same_context() {
        let record = instance_with_role("aws-east", "abc123");
        let value = record.value("iam_role").unwrap();
        assert_eq!(
            resolver().resolve(&record, value).unwrap(),
            FieldValue::from("web-server-role")
        );
    }

    #[test]
    fn other_context_does_not_resolve() {
        let record = instance_with_role("aws-west", "abc123");
        let value = record.value("iam_role").unwrap();
        assert!(resolver().resolve(&record, value).is_err());
        assert_eq!(resolver().fallback(&record, value), FieldValue::from("abc123"));
    }
}

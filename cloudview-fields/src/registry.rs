//! In-memory index of resource schemas.

use std::sync::Arc;

use indexmap::IndexMap;

use crate::error::{FieldsError, Result};
use crate::types::{FieldDef, ResourceSchema};

/// Validated resource schemas keyed by entity type, in registration order.
///
/// Schemas are shared as `Arc` so records and views can hold on to the schema
/// they were built against without borrowing the registry.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: IndexMap<String, Arc<ResourceSchema>>,
}

impl SchemaRegistry {
    /// Build a registry, validating every schema and rejecting duplicate names.
    pub fn new(schemas: impl IntoIterator<Item = ResourceSchema>) -> Result<Self> {
        let mut registry = Self::default();
        for schema in schemas {
            if registry.schemas.contains_key(&schema.name) {
                return Err(FieldsError::DuplicateSchema { name: schema.name });
            }
            registry.insert(schema)?;
        }
        Ok(registry)
    }

    /// Insert or replace a schema after validating it.
    pub fn insert(&mut self, schema: ResourceSchema) -> Result<Arc<ResourceSchema>> {
        schema.validate()?;
        let schema = Arc::new(schema);
        self.schemas.insert(schema.name.clone(), Arc::clone(&schema));
        Ok(schema)
    }

    pub fn remove(&mut self, name: &str) -> Option<Arc<ResourceSchema>> {
        self.schemas.shift_remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&Arc<ResourceSchema>> {
        self.schemas.get(name)
    }

    /// Get a schema or fail with `SchemaNotFound`.
    pub fn require(&self, name: &str) -> Result<Arc<ResourceSchema>> {
        self.schemas
            .get(name)
            .cloned()
            .ok_or_else(|| FieldsError::SchemaNotFound {
                name: name.to_string(),
            })
    }

    /// Resolve one field of one resource type.
    pub fn field(&self, entity_type: &str, field_name: &str) -> Result<&FieldDef> {
        let schema = self
            .schemas
            .get(entity_type)
            .ok_or_else(|| FieldsError::SchemaNotFound {
                name: entity_type.to_string(),
            })?;
        schema.require_field(field_name)
    }

    pub fn all(&self) -> impl Iterator<Item = &Arc<ResourceSchema>> {
        self.schemas.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.schemas.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FieldDef;

    fn schema(name: &str) -> ResourceSchema {
        ResourceSchema::new(name, name, "name")
            .field(FieldDef::string("name", "Name"))
            .field(FieldDef::string("cloud_context", "Cloud service provider ID"))
    }

    #[test]
    fn new_indexes_in_order() {
        let registry =
            SchemaRegistry::new([schema("aws_cloud_vpc"), schema("aws_cloud_subnet")]).unwrap();
        assert_eq!(registry.len(), 2);
        let names: Vec<&str> = registry.names().collect();
        assert_eq!(names, vec!["aws_cloud_vpc", "aws_cloud_subnet"]);
    }

    #[test]
    fn duplicate_schema_rejected() {
        let result = SchemaRegistry::new([schema("aws_cloud_vpc"), schema("aws_cloud_vpc")]);
        assert!(matches!(result, Err(FieldsError::DuplicateSchema { .. })));
    }

    #[test]
    fn invalid_schema_rejected() {
        let broken = ResourceSchema::new("k8s_pod", "Pod", "name")
            .field(FieldDef::string("namespace", "Namespace"));
        assert!(SchemaRegistry::new([broken]).is_err());
    }

    #[test]
    fn field_lookup_errors() {
        let registry = SchemaRegistry::new([schema("aws_cloud_vpc")]).unwrap();
        assert_eq!(
            registry.field("aws_cloud_vpc", "cloud_context").unwrap().name,
            "cloud_context"
        );
        assert!(matches!(
            registry.field("aws_cloud_vpc", "cidr_block"),
            Err(FieldsError::FieldNotFound { .. })
        ));
        assert!(matches!(
            registry.field("aws_cloud_subnet", "name"),
            Err(FieldsError::SchemaNotFound { .. })
        ));
    }

    #[test]
    fn insert_replaces_and_remove_drops() {
        let mut registry = SchemaRegistry::new([schema("aws_cloud_vpc")]).unwrap();
        let replaced = schema("aws_cloud_vpc").field(FieldDef::string("vpc_id", "VPC ID"));
        registry.insert(replaced).unwrap();
        assert_eq!(registry.len(), 1);
        assert!(registry.require("aws_cloud_vpc").unwrap().contains("vpc_id"));

        assert!(registry.remove("aws_cloud_vpc").is_some());
        assert!(registry.is_empty());
        assert!(registry.require("aws_cloud_vpc").is_err());
    }
}

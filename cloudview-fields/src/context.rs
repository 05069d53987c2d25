//! SchemaContext: disk-backed API surface for the schema registry.
//!
//! Manages resource schemas as YAML files under a `schemas/` directory and
//! keeps a [`SchemaRegistry`] in memory for lookup.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::fs;
use tracing::debug;
use ulid::Ulid;

use crate::error::{FieldsError, Result};
use crate::registry::SchemaRegistry;
use crate::types::ResourceSchema;

/// A collection of default resource schemas.
///
/// Consumers build this to pass to `SchemaContextBuilder::with_defaults()`.
/// On open, defaults that don't already exist on disk are written.
#[derive(Debug, Clone, Default)]
pub struct SchemaDefaults {
    schemas: Vec<ResourceSchema>,
}

impl SchemaDefaults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a default resource schema.
    pub fn schema(mut self, def: ResourceSchema) -> Self {
        self.schemas.push(def);
        self
    }

    /// Access the schemas.
    pub fn schemas(&self) -> &[ResourceSchema] {
        &self.schemas
    }

    /// Build an in-memory registry straight from the defaults, skipping disk.
    pub fn into_registry(self) -> Result<SchemaRegistry> {
        SchemaRegistry::new(self.schemas)
    }
}

/// Builder for `SchemaContext`. Created by `SchemaContext::open()`.
pub struct SchemaContextBuilder {
    root: PathBuf,
    defaults: Option<SchemaDefaults>,
}

impl SchemaContextBuilder {
    /// Provide default schemas. Defaults are seeded on first open; existing
    /// files are preserved.
    pub fn with_defaults(mut self, defaults: SchemaDefaults) -> Self {
        self.defaults = Some(defaults);
        self
    }

    /// Build the context: create directories, seed defaults, load from disk.
    pub async fn build(self) -> Result<SchemaContext> {
        let root = self.root;
        fs::create_dir_all(root.join("schemas")).await?;

        if let Some(defaults) = self.defaults {
            seed_defaults(&root, &defaults).await?;
        }

        let mut ctx = SchemaContext {
            root,
            registry: SchemaRegistry::default(),
        };
        ctx.load_schemas().await?;

        debug!(schemas = ctx.registry.len(), "schema context opened");

        Ok(ctx)
    }
}

/// Seed default schemas that don't already exist on disk (name-matched).
async fn seed_defaults(root: &Path, defaults: &SchemaDefaults) -> Result<()> {
    let schemas_dir = root.join("schemas");
    for def in defaults.schemas() {
        let path = schemas_dir.join(format!("{}.yaml", def.name));
        if !path.exists() {
            let yaml = serde_yaml_ng::to_string(def)?;
            atomic_write(&path, yaml.as_bytes()).await?;
            debug!(name = %def.name, "seeded default resource schema");
        }
    }
    Ok(())
}

/// Context for resource schemas.
///
/// Owns a directory on disk with the structure:
/// ```text
/// registry/
///   schemas/    ← one .yaml per resource type
/// ```
pub struct SchemaContext {
    root: PathBuf,
    registry: SchemaRegistry,
}

impl SchemaContext {
    /// Open or create a registry directory. Returns a builder for optional configuration.
    ///
    /// ```rust,ignore
    /// let ctx = SchemaContext::open(path)
    ///     .with_defaults(cloud_schema_defaults())
    ///     .build()
    ///     .await?;
    /// ```
    pub fn open(root: impl Into<PathBuf>) -> SchemaContextBuilder {
        SchemaContextBuilder {
            root: root.into(),
            defaults: None,
        }
    }

    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    /// Consume the context, keeping only the in-memory registry.
    pub fn into_registry(self) -> SchemaRegistry {
        self.registry
    }

    pub fn get_schema(&self, name: &str) -> Option<&Arc<ResourceSchema>> {
        self.registry.get(name)
    }

    /// Write (create or update) a schema. Validates, then persists to YAML immediately.
    pub async fn write_schema(&mut self, def: &ResourceSchema) -> Result<()> {
        def.validate()?;
        let yaml = serde_yaml_ng::to_string(def)?;
        atomic_write(&self.schema_path(&def.name), yaml.as_bytes()).await?;
        self.registry.insert(def.clone())?;
        Ok(())
    }

    /// Delete a schema by entity type name.
    pub async fn delete_schema(&mut self, name: &str) -> Result<()> {
        if self.registry.remove(name).is_none() {
            return Err(FieldsError::SchemaNotFound {
                name: name.to_string(),
            });
        }
        let _ = fs::remove_file(self.schema_path(name)).await;
        Ok(())
    }

    /// The root directory path.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn schema_path(&self, name: &str) -> PathBuf {
        self.root.join("schemas").join(format!("{name}.yaml"))
    }

    async fn load_schemas(&mut self) -> Result<()> {
        let schemas_dir = self.root.join("schemas");
        let mut paths = Vec::new();
        let mut entries = fs::read_dir(&schemas_dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) == Some("yaml") {
                paths.push(path);
            }
        }
        // read_dir order is platform dependent
        paths.sort();

        for path in paths {
            let content = fs::read_to_string(&path).await?;
            let parsed = serde_yaml_ng::from_str::<ResourceSchema>(&content)
                .map_err(FieldsError::from)
                .and_then(|def| self.registry.insert(def));
            if let Err(e) = parsed {
                tracing::warn!(?path, %e, "skipping invalid resource schema");
            }
        }
        Ok(())
    }
}

/// Write to a temp file then rename for atomic persistence.
pub async fn atomic_write(path: &Path, data: &[u8]) -> Result<()> {
    let dir = path
        .parent()
        .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::InvalidInput, "no parent dir"))?;
    let tmp = dir.join(format!(".tmp_{}", Ulid::new()));
    fs::write(&tmp, data).await?;
    fs::rename(&tmp, path).await?;
    Ok(())
}

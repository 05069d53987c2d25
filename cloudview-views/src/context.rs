//! ViewsContext: disk-backed view definitions.
//!
//! One YAML file per resource type under `views/`, named after the entity
//! type it presents.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use cloudview_config::ValidationMode;
use cloudview_fields::{atomic_write, SchemaRegistry};
use indexmap::IndexMap;
use tokio::fs;
use tracing::{debug, warn};

use crate::error::{Result, ViewsError};
use crate::fieldset::ViewDef;

/// Compiled-in view definitions, seeded on open.
#[derive(Debug, Clone, Default)]
pub struct ViewDefaults {
    views: Vec<ViewDef>,
}

impl ViewDefaults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(mut self, def: ViewDef) -> Self {
        self.views.push(def);
        self
    }

    pub fn views(&self) -> &[ViewDef] {
        &self.views
    }
}

/// Builder for `ViewsContext`. Created by `ViewsContext::open()`.
pub struct ViewsContextBuilder {
    root: PathBuf,
    defaults: Option<ViewDefaults>,
}

impl ViewsContextBuilder {
    pub fn with_defaults(mut self, defaults: ViewDefaults) -> Self {
        self.defaults = Some(defaults);
        self
    }

    /// Create `views/`, seed missing defaults and load every file.
    pub async fn build(self) -> Result<ViewsContext> {
        let root = self.root;
        fs::create_dir_all(root.join("views")).await?;

        if let Some(defaults) = &self.defaults {
            for def in defaults.views() {
                let path = view_path(&root, &def.entity_type);
                if !path.exists() {
                    atomic_write(&path, serde_yaml_ng::to_string(def)?.as_bytes()).await?;
                    debug!(entity_type = %def.entity_type, "seeded default view");
                }
            }
        }

        let mut ctx = ViewsContext {
            root,
            views: IndexMap::new(),
        };
        ctx.load_views().await?;
        debug!(views = ctx.views.len(), "views context opened");
        Ok(ctx)
    }
}

/// View definitions keyed by entity type.
pub struct ViewsContext {
    root: PathBuf,
    views: IndexMap<String, Arc<ViewDef>>,
}

impl ViewsContext {
    pub fn open(root: impl Into<PathBuf>) -> ViewsContextBuilder {
        ViewsContextBuilder {
            root: root.into(),
            defaults: None,
        }
    }

    /// Views kept only in memory, e.g. straight from compiled defaults.
    pub fn in_memory(defaults: ViewDefaults) -> Self {
        Self {
            root: PathBuf::new(),
            views: defaults
                .views
                .into_iter()
                .map(|v| (v.entity_type.clone(), Arc::new(v)))
                .collect(),
        }
    }

    pub fn get_view(&self, entity_type: &str) -> Option<&Arc<ViewDef>> {
        self.views.get(entity_type)
    }

    pub fn require_view(&self, entity_type: &str) -> Result<Arc<ViewDef>> {
        self.views
            .get(entity_type)
            .cloned()
            .ok_or_else(|| ViewsError::ViewNotFound {
                entity_type: entity_type.to_string(),
            })
    }

    pub fn all_views(&self) -> impl Iterator<Item = &Arc<ViewDef>> {
        self.views.values()
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Check every view against its schema.
    ///
    /// A view without a schema is always an error. Otherwise strict mode
    /// fails on the first inconsistent view and lenient mode logs.
    pub fn check_all(&self, schemas: &SchemaRegistry, mode: ValidationMode) -> Result<()> {
        for view in self.views.values() {
            let schema = schemas.require(&view.entity_type)?;
            view.check(&schema, mode)?;
        }
        Ok(())
    }

    /// Create or replace a view and persist it.
    pub async fn write_view(&mut self, def: ViewDef) -> Result<()> {
        let yaml = serde_yaml_ng::to_string(&def)?;
        atomic_write(&view_path(&self.root, &def.entity_type), yaml.as_bytes()).await?;
        self.views.insert(def.entity_type.clone(), Arc::new(def));
        Ok(())
    }

    pub async fn delete_view(&mut self, entity_type: &str) -> Result<()> {
        if self.views.shift_remove(entity_type).is_none() {
            return Err(ViewsError::ViewNotFound {
                entity_type: entity_type.to_string(),
            });
        }
        let _ = fs::remove_file(view_path(&self.root, entity_type)).await;
        Ok(())
    }

    async fn load_views(&mut self) -> Result<()> {
        let mut paths = Vec::new();
        let mut entries = fs::read_dir(self.root.join("views")).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) == Some("yaml") {
                paths.push(path);
            }
        }
        paths.sort();

        for path in paths {
            let content = fs::read_to_string(&path).await?;
            match serde_yaml_ng::from_str::<ViewDef>(&content) {
                Ok(def) => {
                    self.views.insert(def.entity_type.clone(), Arc::new(def));
                }
                Err(e) => warn!(?path, %e, "skipping invalid view"),
            }
        }
        Ok(())
    }
}

fn view_path(root: &Path, entity_type: &str) -> PathBuf {
    root.join("views").join(format!("{entity_type}.yaml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fieldset::FieldsetDef;
    use cloudview_fields::{FieldDef, ResourceSchema};
    use tempfile::TempDir;

    fn subnet_view() -> ViewDef {
        ViewDef::new("aws_cloud_subnet")
            .fieldset(FieldsetDef::new("subnet", "Subnet", &["name", "subnet_id"]))
            .selectable(&["state"])
    }

    fn defaults() -> ViewDefaults {
        ViewDefaults::new().view(subnet_view())
    }

    #[tokio::test]
    async fn first_open_seeds_defaults() {
        let tmp = TempDir::new().unwrap();
        let ctx = ViewsContext::open(tmp.path())
            .with_defaults(defaults())
            .build()
            .await
            .unwrap();
        assert_eq!(ctx.len(), 1);
        assert!(tmp.path().join("views/aws_cloud_subnet.yaml").exists());
        assert_eq!(**ctx.get_view("aws_cloud_subnet").unwrap(), subnet_view());
    }

    #[tokio::test]
    async fn customised_view_survives_reopen() {
        let tmp = TempDir::new().unwrap();
        let mut ctx = ViewsContext::open(tmp.path())
            .with_defaults(defaults())
            .build()
            .await
            .unwrap();
        ctx.write_view(subnet_view().selectable(&["state", "vpc_id"]))
            .await
            .unwrap();
        drop(ctx);

        let ctx = ViewsContext::open(tmp.path())
            .with_defaults(defaults())
            .build()
            .await
            .unwrap();
        assert_eq!(ctx.get_view("aws_cloud_subnet").unwrap().selectable.len(), 2);
    }

    #[tokio::test]
    async fn invalid_file_skipped_and_delete_works() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir_all(tmp.path().join("views")).unwrap();
        std::fs::write(tmp.path().join("views/broken.yaml"), "fieldsets: 7").unwrap();

        let mut ctx = ViewsContext::open(tmp.path())
            .with_defaults(defaults())
            .build()
            .await
            .unwrap();
        assert_eq!(ctx.len(), 1);

        ctx.delete_view("aws_cloud_subnet").await.unwrap();
        assert!(ctx.is_empty());
        assert!(matches!(
            ctx.delete_view("aws_cloud_subnet").await,
            Err(ViewsError::ViewNotFound { .. })
        ));
    }

    #[test]
    fn check_all_honours_mode() {
        let schemas = SchemaRegistry::new([ResourceSchema::new(
            "aws_cloud_subnet",
            "Subnet",
            "name",
        )
        .fields([
            FieldDef::string("name", "Name"),
            FieldDef::string("subnet_id", "Subnet ID"),
        ])])
        .unwrap();
        // `state` is not a subnet field here
        let ctx = ViewsContext::in_memory(defaults());
        assert!(ctx.check_all(&schemas, ValidationMode::Strict).is_err());
        ctx.check_all(&schemas, ValidationMode::Lenient).unwrap();

        let empty = SchemaRegistry::default();
        assert!(matches!(
            ctx.check_all(&empty, ValidationMode::Lenient),
            Err(ViewsError::Fields(_))
        ));
    }
}

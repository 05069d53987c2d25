//! The catalog: registries, record store and composers in one place.

use std::sync::Arc;

use cloudview_common::Pretty;
use cloudview_config::CloudviewConfig;
use cloudview_entity::{CacheInvalidator, NoopInvalidator, Reconciler, Record, RecordStore};
use cloudview_fields::{ResourceSchema, SchemaContext, SchemaRegistry};
use cloudview_views::{
    FilterTable, ListQuery, ListView, RenderCache, RenderContext, RenderTree, ViewComposer,
    ViewsContext,
};
use tracing::debug;

use crate::aws::iam_role::{IamRoleResolver, RoleDirectory};
use crate::aws::security_group::{self, rules_fallback, LinkBuilder};
use crate::aws::instance;
use crate::defaults::{cloud_schema_defaults, cloud_view_defaults};
use crate::error::Result;

/// Every resource schema and view, the record store, and the collaborators
/// used while rendering.
///
/// With `registry_root` set, schemas and views are read from YAML under that
/// directory (seeded from the compiled defaults); otherwise the defaults are
/// used directly. Views are checked against their schemas on open according
/// to the configured validation mode.
pub struct CloudCatalog {
    config: CloudviewConfig,
    schemas: SchemaRegistry,
    views: ViewsContext,
    cache: Arc<RenderCache>,
    store: Arc<RecordStore>,
    roles: Option<Arc<dyn RoleDirectory>>,
    links: Option<Arc<dyn LinkBuilder>>,
}

impl CloudCatalog {
    pub async fn open(config: CloudviewConfig) -> Result<Self> {
        config.validate()?;

        let (schemas, views) = match &config.registry_root {
            Some(root) => {
                let schemas = SchemaContext::open(root)
                    .with_defaults(cloud_schema_defaults())
                    .build()
                    .await?
                    .into_registry();
                let views = ViewsContext::open(root)
                    .with_defaults(cloud_view_defaults())
                    .build()
                    .await?;
                (schemas, views)
            }
            None => (
                cloud_schema_defaults().into_registry()?,
                ViewsContext::in_memory(cloud_view_defaults()),
            ),
        };
        views.check_all(&schemas, config.validation)?;

        let cache = Arc::new(RenderCache::new());
        let invalidator: Arc<dyn CacheInvalidator> = if config.render_cache {
            cache.clone()
        } else {
            Arc::new(NoopInvalidator)
        };
        let store = Arc::new(RecordStore::new(invalidator));

        debug!(
            schemas = schemas.len(),
            views = views.len(),
            "catalog opened with {}",
            Pretty(&config)
        );
        Ok(Self {
            config,
            schemas,
            views,
            cache,
            store,
            roles: None,
            links: None,
        })
    }

    /// Resolve instance IAM roles to names through `roles`.
    ///
    /// Pages cached under the previous directory are dropped.
    pub fn with_role_directory(mut self, roles: Arc<dyn RoleDirectory>) -> Self {
        self.roles = Some(roles);
        self.cache.invalidate_all();
        self
    }

    /// Link the empty security-group rules message to the rule editor.
    pub fn with_link_builder(mut self, links: Arc<dyn LinkBuilder>) -> Self {
        self.links = Some(links);
        self.cache.invalidate_all();
        self
    }

    pub fn config(&self) -> &CloudviewConfig {
        &self.config
    }

    pub fn schemas(&self) -> &SchemaRegistry {
        &self.schemas
    }

    pub fn views(&self) -> &ViewsContext {
        &self.views
    }

    pub fn store(&self) -> &Arc<RecordStore> {
        &self.store
    }

    pub fn cache(&self) -> &Arc<RenderCache> {
        &self.cache
    }

    pub fn reconciler(&self) -> Reconciler {
        Reconciler::new(self.store.clone())
    }

    pub fn schema(&self, entity_type: &str) -> Result<Arc<ResourceSchema>> {
        Ok(self.schemas.require(entity_type)?)
    }

    /// An empty record of `entity_type`.
    pub fn new_record(&self, entity_type: &str) -> Result<Record> {
        Ok(Record::new(self.schema(entity_type)?))
    }

    pub fn render_context(&self) -> RenderContext {
        RenderContext {
            view_mode: self.config.view_mode.clone(),
            langcode: self.config.langcode.clone(),
        }
    }

    /// A composer with the resolvers and transforms `entity_type` uses.
    pub fn composer(&self, entity_type: &str) -> ViewComposer {
        let mut composer =
            ViewComposer::default().with_weight_start(self.config.fieldset_weight_start);
        if self.config.render_cache {
            composer = composer.with_cache(self.cache.clone());
        }
        match entity_type {
            instance::ENTITY_TYPE => {
                if let Some(roles) = &self.roles {
                    composer = composer.with_resolver(Arc::new(IamRoleResolver::new(roles.clone())));
                }
            }
            security_group::ENTITY_TYPE => {
                composer = composer.with_transform(rules_fallback(self.links.clone()));
            }
            _ => {}
        }
        composer
    }

    /// The detail page of `record`.
    pub fn render_detail(&self, record: &Record) -> Result<RenderTree> {
        let view = self.views.require_view(record.entity_type())?;
        let tree = self
            .composer(record.entity_type())
            .render_detail(record, &view, &self.render_context())?;
        Ok(tree)
    }

    pub fn list_view(&self, entity_type: &str) -> Result<ListView> {
        let schema = self.schema(entity_type)?;
        let view = self.views.require_view(entity_type)?;
        Ok(ListView::new(schema, view.selectable.clone()))
    }

    /// The list page of `entity_type`: its filter row and the matching
    /// stored records.
    pub async fn list(
        &self,
        entity_type: &str,
        query: &ListQuery,
    ) -> Result<(FilterTable, Vec<Record>)> {
        let list_view = self.list_view(entity_type)?;
        let records = self.store.list(entity_type).await;
        Ok(list_view.query(records, query))
    }
}

//! Detail page composition.
//!
//! [`ViewComposer::render_detail`] turns one record and its view definition
//! into a tree of collapsible `details` containers:
//!
//! 1. Give each fieldset a weight, counting up from the configured start in
//!    declaration order.
//! 2. Render a reduced copy of the record per fieldset, holding only the
//!    fields that fieldset claims, and wrap the body in a container.
//! 3. Render the full record and overlay the containers on it.
//! 4. Keep only meta keys, container keys and the label field.
//!
//! Cached trees are reused only for the same record values and view, so an
//! edited copy that was never saved is composed afresh.
//!
//! A field the view does not claim never reaches the output, even after the
//! schema gains it.

use std::collections::HashSet;
use std::sync::Arc;

use cloudview_entity::{FieldValue, Record};
use tracing::{debug, warn};

use crate::cache::{CacheKey, RenderCache};
use crate::error::Result;
use crate::fieldset::{FieldsetDef, ViewDef};
use crate::render::{is_meta_key, RenderNode, RenderTree};
use crate::renderer::{EntityRenderer, FieldListRenderer, RenderContext};
use crate::resolve::ValueResolver;
use crate::transform::TransformPipeline;

/// Builds detail render trees.
#[derive(Clone)]
pub struct ViewComposer {
    renderer: Arc<dyn EntityRenderer>,
    resolvers: Vec<Arc<dyn ValueResolver>>,
    transforms: TransformPipeline,
    weight_start: i32,
    cache: Option<Arc<RenderCache>>,
}

impl Default for ViewComposer {
    fn default() -> Self {
        Self::new(Arc::new(FieldListRenderer))
    }
}

impl ViewComposer {
    pub fn new(renderer: Arc<dyn EntityRenderer>) -> Self {
        Self {
            renderer,
            resolvers: Vec::new(),
            transforms: TransformPipeline::new(),
            weight_start: 0,
            cache: None,
        }
    }

    /// Weight of the first container; later ones count up by one.
    pub fn with_weight_start(mut self, weight_start: i32) -> Self {
        self.weight_start = weight_start;
        self
    }

    pub fn with_resolver(mut self, resolver: Arc<dyn ValueResolver>) -> Self {
        self.resolvers.push(resolver);
        self
    }

    pub fn with_transform<F>(mut self, step: F) -> Self
    where
        F: Fn(RenderTree) -> RenderTree + Send + Sync + 'static,
    {
        self.transforms.push(step);
        self
    }

    pub fn with_transforms(mut self, transforms: TransformPipeline) -> Self {
        self.transforms = transforms;
        self
    }

    pub fn with_cache(mut self, cache: Arc<RenderCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Render `record` as `view`'s fieldset containers.
    pub fn render_detail(
        &self,
        record: &Record,
        view: &ViewDef,
        ctx: &RenderContext,
    ) -> Result<RenderTree> {
        let key = self
            .cache
            .as_ref()
            .map(|_| CacheKey::new(record.entity_type(), record.id(), ctx));
        if let (Some(cache), Some(key)) = (&self.cache, &key) {
            if let Some(tree) = cache.get(key, record, view) {
                debug!(entity_type = %key.entity_type, id = %key.id, "render cache hit");
                return Ok(tree);
            }
        }

        let tree = self.compose(record, view, ctx)?;

        if let (Some(cache), Some(key)) = (&self.cache, key) {
            cache.insert(key, record, view, tree.clone());
        }
        Ok(tree)
    }

    fn compose(&self, record: &Record, view: &ViewDef, ctx: &RenderContext) -> Result<RenderTree> {
        let record = self.resolve_values(record)?;

        let mut sections = RenderTree::new();
        for (weight, fieldset) in (self.weight_start..).zip(view.fieldset_definitions()) {
            let reduced = record.with_only(fieldset.fields.as_slice());
            let body = self.renderer.render(&reduced, ctx)?;
            sections.insert_element(fieldset.name.clone(), container(fieldset, weight, body));
        }

        let mut tree = self.renderer.render(&record, ctx)?;
        tree.merge(sections);

        let container_keys: HashSet<&str> = view
            .fieldset_definitions()
            .iter()
            .map(|fs| fs.name.as_str())
            .collect();
        let label_field = record.schema().label_field.as_str();
        tree.retain(|key, _| {
            is_meta_key(key) || container_keys.contains(key) || key == label_field
        });

        Ok(self.transforms.apply(tree))
    }

    /// Apply resolvers to a transient copy of the record.
    fn resolve_values(&self, record: &Record) -> Result<Record> {
        if self.resolvers.is_empty() {
            return Ok(record.clone());
        }
        let mut overrides: Vec<(String, FieldValue)> = Vec::new();
        for resolver in &self.resolvers {
            let field = resolver.field_name();
            let Ok(value) = record.value(field) else {
                // resolvers are shared across resource types
                continue;
            };
            if value.is_empty() {
                continue;
            }
            let resolved = match resolver.resolve(record, value) {
                Ok(resolved) => resolved,
                Err(e) => {
                    warn!(entity_type = %record.entity_type(), field, error = %e, "value lookup failed, using fallback");
                    resolver.fallback(record, value)
                }
            };
            overrides.push((field.to_string(), resolved));
        }
        Ok(record.with_overrides(overrides)?)
    }
}

/// Wrap a rendered body in a collapsible container. The body's own meta keys
/// are dropped.
fn container(fieldset: &FieldsetDef, weight: i32, body: RenderTree) -> RenderTree {
    let mut details = RenderTree::new()
        .with_property("#type", "details")
        .with_property("#title", fieldset.title.as_str())
        .with_property("#open", fieldset.open)
        .with_property("#weight", weight);
    for (key, node) in body.into_entries() {
        if let RenderNode::Element(child) = node {
            if !is_meta_key(&key) {
                details.insert_element(key, child);
            }
        }
    }
    details
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::ResolveError;
    use cloudview_fields::{FieldDef, ResourceSchema};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn schema() -> Arc<ResourceSchema> {
        Arc::new(ResourceSchema::new("aws_cloud_instance", "Instance", "name").fields([
            FieldDef::string("cloud_context", "Cloud service provider ID"),
            FieldDef::string("name", "Name"),
            FieldDef::string("instance_id", "Instance ID"),
            FieldDef::string("instance_state", "Instance state"),
            FieldDef::string("private_ip", "Private IP"),
            FieldDef::string("iam_role", "IAM role"),
            FieldDef::string("login_username", "Login username"),
        ]))
    }

    fn instance() -> Record {
        Record::new(schema())
            .with("cloud_context", "aws-east")
            .unwrap()
            .with("name", "web-1")
            .unwrap()
            .with("instance_id", "i-0abc")
            .unwrap()
            .with("instance_state", "running")
            .unwrap()
            .with("private_ip", "10.0.0.5")
            .unwrap()
            .with("iam_role", "arn:aws:iam::1:instance-profile/web")
            .unwrap()
            .with("login_username", "ec2-user")
            .unwrap()
    }

    fn view() -> ViewDef {
        ViewDef::new("aws_cloud_instance")
            .fieldset(FieldsetDef::new(
                "instance",
                "Instance",
                &["name", "instance_id", "instance_state", "iam_role"],
            ))
            .fieldset(FieldsetDef::new("network", "Network", &["private_ip"]))
            .fieldset(FieldsetDef::new("others", "Others", &["cloud_context"]).collapsed())
    }

    #[test]
    fn sections_in_declared_order() {
        let tree = ViewComposer::default()
            .with_weight_start(-100)
            .render_detail(&instance(), &view(), &RenderContext::default())
            .unwrap();

        assert_eq!(tree.child_keys(), vec!["name", "instance", "network", "others"]);
        let weights: Vec<i64> = ["instance", "network", "others"]
            .iter()
            .map(|k| tree.element(k).unwrap().weight().unwrap())
            .collect();
        assert_eq!(weights, vec![-100, -99, -98]);
        assert_eq!(tree.element("others").unwrap().property("#open"), Some(&json!(false)));
        assert_eq!(
            tree.element("instance").unwrap().property("#title"),
            Some(&json!("Instance"))
        );
    }

    #[test]
    fn unclaimed_fields_are_hidden() {
        let tree = ViewComposer::default()
            .render_detail(&instance(), &view(), &RenderContext::default())
            .unwrap();
        assert!(!tree.contains_key("login_username"));
        for (_, section) in tree.children() {
            assert!(section.element("login_username").is_none());
        }
        assert_eq!(
            tree.element("network").unwrap().child_keys(),
            vec!["private_ip"]
        );
    }

    #[test]
    fn meta_keys_survive() {
        let record = instance();
        let tree = ViewComposer::default()
            .render_detail(&record, &view(), &RenderContext::default())
            .unwrap();
        assert_eq!(tree.property("#entity_id"), Some(&json!(record.id().to_string())));
        assert!(tree.property("#cache").is_some());
    }

    struct RoleName;

    impl ValueResolver for RoleName {
        fn field_name(&self) -> &str {
            "iam_role"
        }

        fn resolve(&self, _: &Record, value: &FieldValue) -> std::result::Result<FieldValue, ResolveError> {
            let arn = value.as_text().unwrap_or_default();
            arn.rsplit('/')
                .next()
                .map(FieldValue::from)
                .ok_or_else(|| ResolveError::new("no role"))
        }
    }

    struct Broken;

    impl ValueResolver for Broken {
        fn field_name(&self) -> &str {
            "instance_state"
        }

        fn resolve(&self, _: &Record, _: &FieldValue) -> std::result::Result<FieldValue, ResolveError> {
            Err(ResolveError::new("directory unavailable"))
        }

        fn fallback(&self, _: &Record, _: &FieldValue) -> FieldValue {
            FieldValue::from("unknown")
        }
    }

    #[test]
    fn resolvers_change_display_only() {
        let record = instance();
        let tree = ViewComposer::default()
            .with_resolver(Arc::new(RoleName))
            .with_resolver(Arc::new(Broken))
            .render_detail(&record, &view(), &RenderContext::default())
            .unwrap();
        let section = tree.element("instance").unwrap();
        assert_eq!(
            section.element("iam_role").unwrap().property("#items"),
            Some(&json!(["web"]))
        );
        assert_eq!(
            section.element("instance_state").unwrap().property("#items"),
            Some(&json!(["unknown"]))
        );
        assert_eq!(
            record.get::<String>("iam_role").unwrap().as_deref(),
            Some("arn:aws:iam::1:instance-profile/web")
        );
    }

    #[test]
    fn transforms_run_last() {
        let tree = ViewComposer::default()
            .with_transform(|mut tree| {
                tree.remove("network");
                tree
            })
            .render_detail(&instance(), &view(), &RenderContext::default())
            .unwrap();
        assert!(!tree.contains_key("network"));
    }

    struct CountingRenderer(AtomicUsize);

    impl EntityRenderer for CountingRenderer {
        fn render(&self, record: &Record, ctx: &RenderContext) -> Result<RenderTree> {
            self.0.fetch_add(1, Ordering::SeqCst);
            FieldListRenderer.render(record, ctx)
        }
    }

    #[test]
    fn cache_skips_second_render() {
        use cloudview_entity::CacheInvalidator;

        let renderer = Arc::new(CountingRenderer(AtomicUsize::new(0)));
        let cache = Arc::new(RenderCache::new());
        let composer = ViewComposer::new(renderer.clone()).with_cache(cache.clone());
        let record = instance();

        let first = composer
            .render_detail(&record, &view(), &RenderContext::default())
            .unwrap();
        // one reduced render per fieldset plus the full render
        assert_eq!(renderer.0.load(Ordering::SeqCst), 4);
        let second = composer
            .render_detail(&record, &view(), &RenderContext::default())
            .unwrap();
        assert_eq!(first, second);
        assert_eq!(renderer.0.load(Ordering::SeqCst), 4);

        cache.invalidate_all();
        composer
            .render_detail(&record, &view(), &RenderContext::default())
            .unwrap();
        assert_eq!(renderer.0.load(Ordering::SeqCst), 8);
    }

    #[test]
    fn cache_misses_after_unsaved_edit() {
        let cache = Arc::new(RenderCache::new());
        let composer = ViewComposer::default().with_cache(cache.clone());
        let mut record = instance();
        let ctx = RenderContext::default();

        composer.render_detail(&record, &view(), &ctx).unwrap();
        record.set("private_ip", "10.0.0.9").unwrap();
        let tree = composer.render_detail(&record, &view(), &ctx).unwrap();

        assert_eq!(
            tree.element("network")
                .and_then(|s| s.element("private_ip"))
                .and_then(|f| f.property("#items")),
            Some(&json!(["10.0.0.9"]))
        );
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn cache_misses_for_a_different_view() {
        let composer = ViewComposer::default().with_cache(Arc::new(RenderCache::new()));
        let record = instance();
        let ctx = RenderContext::default();

        composer.render_detail(&record, &view(), &ctx).unwrap();
        let narrow = ViewDef::new("aws_cloud_instance")
            .fieldset(FieldsetDef::new("instance", "Instance", &["name", "instance_id"]));
        let tree = composer.render_detail(&record, &narrow, &ctx).unwrap();

        assert!(!tree.contains_key("network"));
        assert_eq!(tree.child_keys(), vec!["name", "instance"]);
    }
}

//! Post-render tree rewrites.

use std::fmt;
use std::sync::Arc;

use crate::render::RenderTree;

/// A pure rewrite of a composed detail tree.
pub type RenderTransform = Arc<dyn Fn(RenderTree) -> RenderTree + Send + Sync>;

/// Transforms applied in registration order after composition.
#[derive(Clone, Default)]
pub struct TransformPipeline {
    steps: Vec<RenderTransform>,
}

impl TransformPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push<F>(&mut self, step: F)
    where
        F: Fn(RenderTree) -> RenderTree + Send + Sync + 'static,
    {
        self.steps.push(Arc::new(step));
    }

    pub fn push_shared(&mut self, step: RenderTransform) {
        self.steps.push(step);
    }

    pub fn apply(&self, tree: RenderTree) -> RenderTree {
        self.steps.iter().fold(tree, |tree, step| step(tree))
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl fmt::Debug for TransformPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformPipeline")
            .field("steps", &self.steps.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn steps_run_in_order() {
        let mut pipeline = TransformPipeline::new();
        pipeline.push(|tree| tree.with_property("#trail", "a"));
        pipeline.push(|tree| {
            let trail = tree
                .property("#trail")
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string();
            tree.with_property("#trail", format!("{trail}b"))
        });
        assert_eq!(pipeline.len(), 2);
        let out = pipeline.apply(RenderTree::new());
        assert_eq!(out.property("#trail"), Some(&json!("ab")));
    }

    #[test]
    fn empty_pipeline_is_identity() {
        let tree = RenderTree::new().with_property("#x", 1);
        assert_eq!(TransformPipeline::new().apply(tree.clone()), tree);
    }
}

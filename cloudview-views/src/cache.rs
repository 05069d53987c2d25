//! Cache of composed detail trees.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use cloudview_entity::{CacheInvalidator, Record};
use tracing::debug;
use ulid::Ulid;

use crate::fieldset::ViewDef;
use crate::render::RenderTree;
use crate::renderer::RenderContext;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub entity_type: String,
    pub id: Ulid,
    pub view_mode: String,
    pub langcode: Option<String>,
}

impl CacheKey {
    pub fn new(entity_type: impl Into<String>, id: Ulid, ctx: &RenderContext) -> Self {
        Self {
            entity_type: entity_type.into(),
            id,
            view_mode: ctx.view_mode.clone(),
            langcode: ctx.langcode.clone(),
        }
    }
}

/// A composed tree together with the inputs it was composed from.
#[derive(Debug, Clone)]
struct CachedRender {
    record: Record,
    view: ViewDef,
    tree: RenderTree,
}

/// Composed trees keyed by record and render variant.
///
/// An entry only answers for the exact record values and view it was built
/// from; an edited copy with the same id misses. Registered with the record
/// store as its [`CacheInvalidator`], so any write empties it.
#[derive(Debug, Default)]
pub struct RenderCache {
    entries: RwLock<HashMap<CacheKey, CachedRender>>,
}

impl RenderCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The tree cached under `key`, if it was composed from `record` and `view`.
    pub fn get(&self, key: &CacheKey, record: &Record, view: &ViewDef) -> Option<RenderTree> {
        self.read()
            .get(key)
            .filter(|hit| hit.record == *record && hit.view == *view)
            .map(|hit| hit.tree.clone())
    }

    pub fn insert(&self, key: CacheKey, record: &Record, view: &ViewDef, tree: RenderTree) {
        self.write().insert(
            key,
            CachedRender {
                record: record.clone(),
                view: view.clone(),
                tree,
            },
        );
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    // a poisoned lock still guards a usable map
    fn read(&self) -> RwLockReadGuard<'_, HashMap<CacheKey, CachedRender>> {
        self.entries.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<CacheKey, CachedRender>> {
        self.entries.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl CacheInvalidator for RenderCache {
    fn invalidate_all(&self) {
        let mut entries = self.write();
        let dropped = entries.len();
        entries.clear();
        debug!(dropped, "render cache cleared");
    }
}

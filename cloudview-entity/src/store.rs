//! In-memory record storage.

use std::sync::Arc;

use indexmap::IndexMap;
use tokio::sync::RwLock;
use tracing::debug;
use ulid::Ulid;

use crate::capability::CacheInvalidator;
use crate::error::{EntityError, Result};
use crate::record::Record;
use crate::value::FieldValue;

/// Records keyed by id, in insertion order.
///
/// Every mutation calls the injected [`CacheInvalidator`] once.
pub struct RecordStore {
    records: RwLock<IndexMap<Ulid, Record>>,
    invalidator: Arc<dyn CacheInvalidator>,
}

impl RecordStore {
    pub fn new(invalidator: Arc<dyn CacheInvalidator>) -> Self {
        Self {
            records: RwLock::new(IndexMap::new()),
            invalidator,
        }
    }

    /// Insert or replace a record by id.
    pub async fn save(&self, record: Record) -> Ulid {
        let id = record.id();
        self.records.write().await.insert(id, record);
        self.invalidator.invalidate_all();
        id
    }

    /// Replace an existing record; fails if the id is unknown.
    pub async fn update(&self, record: Record) -> Result<()> {
        {
            let mut records = self.records.write().await;
            let slot = records
                .get_mut(&record.id())
                .ok_or_else(|| EntityError::RecordNotFound {
                    id: record.id().to_string(),
                })?;
            *slot = record;
        }
        self.invalidator.invalidate_all();
        Ok(())
    }

    pub async fn delete(&self, id: &Ulid) -> Result<Record> {
        let removed = self
            .records
            .write()
            .await
            .shift_remove(id)
            .ok_or_else(|| EntityError::RecordNotFound { id: id.to_string() })?;
        self.invalidator.invalidate_all();
        Ok(removed)
    }

    /// Upsert and delete in one step, invalidating once if anything happened.
    pub async fn apply_batch(&self, upserts: Vec<Record>, deletes: Vec<Ulid>) -> usize {
        let touched = upserts.len() + deletes.len();
        if touched == 0 {
            return 0;
        }
        {
            let mut records = self.records.write().await;
            for record in upserts {
                records.insert(record.id(), record);
            }
            for id in &deletes {
                records.shift_remove(id);
            }
        }
        self.invalidator.invalidate_all();
        debug!(touched, "applied record batch");
        touched
    }

    pub async fn get(&self, id: &Ulid) -> Option<Record> {
        self.records.read().await.get(id).cloned()
    }

    /// All records of one resource type.
    pub async fn list(&self, entity_type: &str) -> Vec<Record> {
        self.records
            .read()
            .await
            .values()
            .filter(|r| r.entity_type() == entity_type)
            .cloned()
            .collect()
    }

    /// Records of one resource type belonging to one cloud context.
    pub async fn list_in_context(&self, entity_type: &str, cloud_context: &str) -> Vec<Record> {
        self.records
            .read()
            .await
            .values()
            .filter(|r| {
                r.entity_type() == entity_type && r.cloud_context().as_deref() == Some(cloud_context)
            })
            .cloned()
            .collect()
    }

    /// First record of a type whose `field` equals `value`.
    pub async fn find_by(
        &self,
        entity_type: &str,
        field: &str,
        value: &FieldValue,
    ) -> Option<Record> {
        self.records
            .read()
            .await
            .values()
            .find(|r| r.entity_type() == entity_type && r.value(field).ok() == Some(value))
            .cloned()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cloudview_fields::{FieldDef, ResourceSchema};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingInvalidator(AtomicUsize);

    impl CacheInvalidator for CountingInvalidator {
        fn invalidate_all(&self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn schema() -> Arc<ResourceSchema> {
        Arc::new(ResourceSchema::new("aws_cloud_key_pair", "Key Pair", "key_pair_name").fields([
            FieldDef::string("cloud_context", "Cloud service provider ID"),
            FieldDef::string("key_pair_name", "Key Pair Name"),
        ]))
    }

    fn key_pair(context: &str, name: &str) -> Record {
        Record::new(schema())
            .with("cloud_context", context)
            .unwrap()
            .with("key_pair_name", name)
            .unwrap()
    }

    #[tokio::test]
    async fn save_get_delete_invalidate() {
        let invalidator = Arc::new(CountingInvalidator::default());
        let store = RecordStore::new(invalidator.clone());

        let id = store.save(key_pair("east", "deploy")).await;
        assert_eq!(store.get(&id).await.unwrap().label().as_deref(), Some("deploy"));

        store.delete(&id).await.unwrap();
        assert!(store.is_empty().await);
        assert_eq!(invalidator.0.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn update_unknown_fails() {
        let store = RecordStore::new(Arc::new(crate::NoopInvalidator));
        let result = store.update(key_pair("east", "deploy")).await;
        assert!(matches!(result, Err(EntityError::RecordNotFound { .. })));
    }

    #[tokio::test]
    async fn list_in_context_filters() {
        let store = RecordStore::new(Arc::new(crate::NoopInvalidator));
        store.save(key_pair("east", "a")).await;
        store.save(key_pair("west", "b")).await;
        store.save(key_pair("east", "c")).await;

        assert_eq!(store.list("aws_cloud_key_pair").await.len(), 3);
        let east: Vec<String> = store
            .list_in_context("aws_cloud_key_pair", "east")
            .await
            .iter()
            .filter_map(Record::label)
            .collect();
        assert_eq!(east, vec!["a", "c"]);

        let found = store
            .find_by("aws_cloud_key_pair", "key_pair_name", &"b".into())
            .await
            .unwrap();
        assert_eq!(found.cloud_context().as_deref(), Some("west"));
    }

    #[tokio::test]
    async fn empty_batch_does_not_invalidate() {
        let invalidator = Arc::new(CountingInvalidator::default());
        let store = RecordStore::new(invalidator.clone());
        assert_eq!(store.apply_batch(vec![], vec![]).await, 0);
        assert_eq!(invalidator.0.load(Ordering::SeqCst), 0);

        let record = key_pair("east", "a");
        let id = record.id();
        assert_eq!(store.apply_batch(vec![record], vec![]).await, 1);
        assert_eq!(store.apply_batch(vec![], vec![id]).await, 1);
        assert_eq!(invalidator.0.load(Ordering::SeqCst), 2);
        assert!(store.is_empty().await);
    }
}

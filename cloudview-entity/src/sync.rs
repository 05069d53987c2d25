//! Fold remote provider state into the record store.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use cloudview_common::Pretty;
use cloudview_fields::ResourceSchema;
use indexmap::IndexMap;
use serde::Serialize;
use ulid::Ulid;
use tracing::{debug, warn};

use crate::error::{EntityError, Result};
use crate::record::Record;
use crate::store::RecordStore;

/// Bookkeeping fields the reconciler owns; they never count as drift.
const STAMP_FIELDS: [&str; 3] = ["created", "changed", "refreshed"];

/// What one reconciliation pass did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    pub entity_type: String,
    pub cloud_context: String,
    pub created: usize,
    pub updated: usize,
    pub unchanged: usize,
    pub deleted: usize,
    /// Remote records without a value in the key field, or superseded by a
    /// later remote record with the same key.
    pub skipped: usize,
}

impl SyncReport {
    pub fn changed(&self) -> bool {
        self.created + self.updated + self.deleted > 0
    }
}

/// Matches remote records to stored ones by a key field (`instance_id`,
/// `vpc_id`, ...), upserts them and deletes stored records the provider no
/// longer reports.
pub struct Reconciler {
    store: Arc<RecordStore>,
}

impl Reconciler {
    pub fn new(store: Arc<RecordStore>) -> Self {
        Self { store }
    }

    /// Reconcile one resource type within one cloud context.
    ///
    /// Matched records keep their local id and `created` stamp. `changed` is
    /// bumped only when a value other than the stamps differs. `refreshed` is
    /// set on every record seen in `remote`.
    ///
    /// Each key ends up with one stored record: when `remote` repeats a key
    /// the last record wins, and stored copies beyond the first are deleted.
    pub async fn reconcile(
        &self,
        schema: &Arc<ResourceSchema>,
        cloud_context: &str,
        key_field: &str,
        remote: Vec<Record>,
        now: DateTime<Utc>,
    ) -> Result<SyncReport> {
        schema.require_field(key_field)?;

        let mut report = SyncReport {
            entity_type: schema.name.clone(),
            cloud_context: cloud_context.to_string(),
            ..Default::default()
        };

        // one stored record per key; any further copy is removed
        let mut local: HashMap<String, Record> = HashMap::new();
        let mut duplicates: Vec<Ulid> = Vec::new();
        for record in self.store.list_in_context(&schema.name, cloud_context).await {
            if let Some(key) = record.value(key_field)?.as_text() {
                if local.contains_key(&key) {
                    warn!(entity_type = %schema.name, key_field, %key, id = %record.id(), "duplicate stored record, deleting");
                    duplicates.push(record.id());
                } else {
                    local.insert(key, record);
                }
            }
        }

        // last remote record per key wins
        let mut incoming: IndexMap<String, Record> = IndexMap::new();
        for record in remote {
            if record.entity_type() != schema.name {
                return Err(EntityError::EntityTypeMismatch {
                    expected: schema.name.clone(),
                    actual: record.entity_type().to_string(),
                });
            }
            let record = if schema.contains("cloud_context") {
                record.with("cloud_context", cloud_context)?
            } else {
                record
            };
            let Some(key) = record.value(key_field)?.as_text() else {
                warn!(entity_type = %schema.name, key_field, "remote record has no key, skipping");
                report.skipped += 1;
                continue;
            };
            if incoming.insert(key.clone(), record).is_some() {
                warn!(entity_type = %schema.name, key_field, %key, "remote reported the key twice, keeping the last");
                report.skipped += 1;
            }
        }

        let mut upserts = Vec::with_capacity(incoming.len());
        for (key, mut record) in incoming {
            match local.remove(&key) {
                Some(existing) => {
                    record = record.with_id(existing.id());
                    stamp(&mut record, "created", existing.value("created").ok().cloned())?;
                    if record.same_values_except(&existing, &STAMP_FIELDS) {
                        stamp(&mut record, "changed", existing.value("changed").ok().cloned())?;
                        report.unchanged += 1;
                    } else {
                        stamp(&mut record, "changed", Some(now.into()))?;
                        report.updated += 1;
                    }
                }
                None => {
                    if record.value("created").map_or(true, |v| v.is_absent()) {
                        stamp(&mut record, "created", Some(now.into()))?;
                    }
                    stamp(&mut record, "changed", Some(now.into()))?;
                    report.created += 1;
                }
            }
            stamp(&mut record, "refreshed", Some(now.into()))?;
            upserts.push(record);
        }

        let mut deletes = duplicates;
        deletes.extend(local.values().map(Record::id));
        report.deleted = deletes.len();

        self.store.apply_batch(upserts, deletes).await;
        debug!("reconciled {}", Pretty(&report));
        Ok(report)
    }
}

/// Set a bookkeeping field if the schema declares it.
fn stamp(
    record: &mut Record,
    field: &str,
    value: Option<crate::value::FieldValue>,
) -> Result<()> {
    if record.schema().contains(field) {
        if let Some(value) = value {
            record.set(field, value)?;
        }
    }
    Ok(())
}

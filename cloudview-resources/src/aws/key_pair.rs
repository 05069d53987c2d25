//! EC2 key pairs and the one-time private key download.

use std::sync::Arc;

use cloudview_entity::{EntityError, Record, TempResourceStore};
use cloudview_fields::{FieldDef, ResourceSchema};
use cloudview_views::{FieldsetDef, ViewDef};
use tracing::debug;

use crate::common::{cloud_resource, others, view};
use crate::error::Result;

pub const ENTITY_TYPE: &str = "aws_cloud_key_pair";

pub const SELECTABLE: [&str; 1] = ["key_type"];

pub fn schema() -> ResourceSchema {
    cloud_resource(
        ENTITY_TYPE,
        "Key pair",
        FieldDef::string("key_pair_name", "Key pair name"),
        [
            FieldDef::string("key_pair_id", "Key pair ID").read_only(),
            FieldDef::string("key_fingerprint", "Fingerprint").read_only(),
            FieldDef::string("key_type", "Key type").read_only(),
        ],
    )
}

pub fn fieldset_definitions() -> Vec<FieldsetDef> {
    vec![
        FieldsetDef::new(
            "key_pair",
            "Key pair",
            &["key_pair_name", "key_pair_id", "key_fingerprint", "key_type", "created"],
        ),
        others(),
    ]
}

pub fn view_def() -> ViewDef {
    view(ENTITY_TYPE, fieldset_definitions(), &SELECTABLE)
}

/// Holds a newly created key pair's private key until its owner downloads it.
///
/// The provider returns the private key only at creation, so it is never
/// stored on the record. [`take`](Self::take) hands it out once.
#[derive(Clone)]
pub struct PrivateKeyStash {
    store: Arc<dyn TempResourceStore>,
}

impl PrivateKeyStash {
    pub fn new(store: Arc<dyn TempResourceStore>) -> Self {
        Self { store }
    }

    pub fn stash(&self, key_pair: &Record, private_key: &[u8]) -> Result<()> {
        let key = stash_key(key_pair)?;
        self.store.put(&key, private_key)?;
        debug!(key_pair = ?key_pair.label(), "stashed private key");
        Ok(())
    }

    /// The private key, or `None` once it has been taken.
    pub fn take(&self, key_pair: &Record) -> Result<Option<Vec<u8>>> {
        let key = stash_key(key_pair)?;
        Ok(self.store.take(&key)?)
    }
}

fn stash_key(record: &Record) -> Result<String> {
    if record.entity_type() != ENTITY_TYPE {
        return Err(EntityError::EntityTypeMismatch {
            expected: ENTITY_TYPE.to_string(),
            actual: record.entity_type().to_string(),
        }
        .into());
    }
    Ok(format!("{ENTITY_TYPE}_{}.pem", record.id()))
}

//! Schema-backed cloud resource records
//!
//! A [`Record`] is one stored cloud resource (an instance, a VPC, a pod, ...)
//! whose values are keyed by the field names of its [`ResourceSchema`].
//! Reads are typed ([`Record::get`]) and unknown names fail with
//! [`EntityError::FieldNotFound`] instead of quietly yielding nothing.
//!
//! The crate also carries the in-memory [`RecordStore`], the
//! [`Reconciler`] that folds remote provider state into it, and the two
//! capabilities injected into components that mutate state or need scratch
//! storage: [`CacheInvalidator`] and [`TempResourceStore`].
//!
//! [`ResourceSchema`]: cloudview_fields::ResourceSchema

pub mod capability;
pub mod error;
pub mod record;
pub mod store;
pub mod sync;
pub mod value;

pub use capability::{
    CacheInvalidator, DirTempStore, MemoryTempStore, NoopInvalidator, TempResourceStore,
};
pub use error::{EntityError, Result};
pub use record::Record;
pub use store::RecordStore;
pub use sync::{Reconciler, SyncReport};
pub use value::{FieldValue, FromFieldValue, Item};

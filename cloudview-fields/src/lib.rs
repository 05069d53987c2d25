//! Field schema registry for cloud resource types
//!
//! `cloudview-fields` is a schema-only crate: it describes which named, typed
//! attributes each resource type (an EC2 instance, a VPC, a K8s pod, ...)
//! carries and how each attribute is presented. It knows nothing about field
//! values or rendering; consumers provide their own built-in schemas via
//! `with_defaults()`.
//!
//! # Architecture
//!
//! - **Schema-only**: Owns field descriptors, not field values
//! - **Compiled defaults**: Built-in schemas are plain Rust values ([`SchemaDefaults`])
//! - **YAML on disk**: One `.yaml` file per resource schema under `schemas/`
//! - **Default seeding**: `with_defaults()` writes defaults that don't exist, preserves customizations

pub mod context;
pub mod error;
pub mod registry;
pub mod types;

pub use context::{atomic_write, SchemaContext, SchemaContextBuilder, SchemaDefaults};
pub use error::{FieldsError, Result};
pub use registry::SchemaRegistry;
pub use types::{Display, FieldDef, FieldType, PrimitiveType, ResourceSchema, SortKind};

//! Compiled-in schemas and views for every supported resource.

use cloudview_fields::SchemaDefaults;
use cloudview_views::ViewDefaults;

use crate::{aws, k8s};

/// Schemas seeded into a registry directory on first open.
pub fn cloud_schema_defaults() -> SchemaDefaults {
    aws::schemas()
        .into_iter()
        .chain(k8s::schemas())
        .fold(SchemaDefaults::new(), SchemaDefaults::schema)
}

/// Views seeded into a registry directory on first open.
pub fn cloud_view_defaults() -> ViewDefaults {
    aws::views()
        .into_iter()
        .chain(k8s::views())
        .fold(ViewDefaults::new(), ViewDefaults::view)
}

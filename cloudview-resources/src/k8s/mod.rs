//! Kubernetes resources.

pub mod deployment;
pub mod namespace;
pub mod node;
pub mod pod;
pub mod service;

use cloudview_fields::{FieldDef, ResourceSchema};
use cloudview_views::{FieldsetDef, ViewDef};

use crate::common::{key_values, single_field_fieldset};

pub fn schemas() -> Vec<ResourceSchema> {
    vec![
        node::schema(),
        namespace::schema(),
        pod::schema(),
        deployment::schema(),
        service::schema(),
    ]
}

pub fn views() -> Vec<ViewDef> {
    vec![
        node::view_def(),
        namespace::view_def(),
        pod::view_def(),
        deployment::view_def(),
        service::view_def(),
    ]
}

pub(crate) fn labels() -> FieldDef {
    key_values("labels", "Labels")
}

pub(crate) fn annotations() -> FieldDef {
    key_values("annotations", "Annotations")
}

/// The object's manifest as YAML.
pub(crate) fn detail() -> FieldDef {
    FieldDef::string("detail", "Detail").read_only()
}

pub(crate) fn detail_fieldset() -> FieldsetDef {
    single_field_fieldset("detail", "Detail").collapsed()
}

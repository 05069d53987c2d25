//! Namespaces.

use cloudview_fields::{FieldDef, ResourceSchema};
use cloudview_views::{FieldsetDef, ViewDef};

use super::{annotations, detail, detail_fieldset, labels};
use crate::common::{cloud_resource, name, others, view};

pub const ENTITY_TYPE: &str = "k8s_namespace";

pub const SELECTABLE: [&str; 1] = ["status"];

pub fn schema() -> ResourceSchema {
    cloud_resource(
        ENTITY_TYPE,
        "Namespace",
        name(),
        [
            FieldDef::string("status", "Status").read_only(),
            labels(),
            annotations(),
            detail(),
        ],
    )
}

pub fn fieldset_definitions() -> Vec<FieldsetDef> {
    vec![
        FieldsetDef::new(
            "namespace",
            "Namespace",
            &["name", "status", "labels", "annotations", "created"],
        ),
        detail_fieldset(),
        others(),
    ]
}

pub fn view_def() -> ViewDef {
    view(ENTITY_TYPE, fieldset_definitions(), &SELECTABLE)
}

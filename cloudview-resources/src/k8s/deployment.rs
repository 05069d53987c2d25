//! Deployments.

use cloudview_fields::{FieldDef, ResourceSchema};
use cloudview_views::{FieldsetDef, ViewDef};

use super::{annotations, detail, detail_fieldset, labels};
use crate::common::{cloud_resource, name, others, view};

pub const ENTITY_TYPE: &str = "k8s_deployment";

pub const SELECTABLE: [&str; 2] = ["namespace", "strategy"];

pub fn schema() -> ResourceSchema {
    cloud_resource(
        ENTITY_TYPE,
        "Deployment",
        name(),
        [
            FieldDef::string("namespace", "Namespace"),
            FieldDef::string("strategy", "Strategy"),
            FieldDef::integer("min_ready_seconds", "Min ready seconds"),
            FieldDef::integer("revision_history_limit", "Revision history limit"),
            FieldDef::boolean("paused", "Paused"),
            labels(),
            annotations(),
            FieldDef::integer("replicas", "Replicas"),
            FieldDef::integer("available_replicas", "Available replicas").read_only(),
            FieldDef::integer("updated_replicas", "Updated replicas").read_only(),
            FieldDef::integer("ready_replicas", "Ready replicas").read_only(),
            FieldDef::integer("unavailable_replicas", "Unavailable replicas").read_only(),
            detail(),
        ],
    )
}

pub fn fieldset_definitions() -> Vec<FieldsetDef> {
    vec![
        FieldsetDef::new(
            "deployment",
            "Deployment",
            &[
                "name",
                "namespace",
                "strategy",
                "min_ready_seconds",
                "revision_history_limit",
                "paused",
                "labels",
                "annotations",
                "created",
            ],
        ),
        FieldsetDef::new(
            "rollout",
            "Rollout status",
            &[
                "replicas",
                "available_replicas",
                "updated_replicas",
                "ready_replicas",
                "unavailable_replicas",
            ],
        ),
        detail_fieldset(),
        others(),
    ]
}

pub fn view_def() -> ViewDef {
    view(ENTITY_TYPE, fieldset_definitions(), &SELECTABLE)
}

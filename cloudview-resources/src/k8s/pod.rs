//! Pods.

use cloudview_fields::{FieldDef, ResourceSchema};
use cloudview_views::{FieldsetDef, ViewDef};

use super::{annotations, detail, detail_fieldset, labels};
use crate::common::{cloud_resource, name, others, single_field_fieldset, view};

pub const ENTITY_TYPE: &str = "k8s_pod";

pub const SELECTABLE: [&str; 3] = ["namespace", "status", "node_name"];

pub fn schema() -> ResourceSchema {
    cloud_resource(
        ENTITY_TYPE,
        "Pod",
        name(),
        [
            FieldDef::string("namespace", "Namespace"),
            FieldDef::string("status", "Status").read_only(),
            FieldDef::string("qos_class", "QoS class").read_only(),
            FieldDef::string("node_name", "Node").read_only(),
            FieldDef::string("pod_ip", "Pod IP").read_only(),
            FieldDef::string("host_ip", "Host IP").read_only(),
            FieldDef::integer("restarts", "Restarts").read_only(),
            labels(),
            annotations(),
            FieldDef::composite("containers", "Containers", &["container_name", "image", "state"])
                .read_only(),
            detail(),
        ],
    )
}

pub fn fieldset_definitions() -> Vec<FieldsetDef> {
    vec![
        FieldsetDef::new(
            "pod",
            "Pod",
            &[
                "name",
                "namespace",
                "status",
                "qos_class",
                "node_name",
                "pod_ip",
                "host_ip",
                "restarts",
                "labels",
                "annotations",
                "created",
            ],
        ),
        single_field_fieldset("containers", "Containers"),
        detail_fieldset(),
        others(),
    ]
}

pub fn view_def() -> ViewDef {
    view(ENTITY_TYPE, fieldset_definitions(), &SELECTABLE)
}

//! Services.

use cloudview_fields::{FieldDef, ResourceSchema};
use cloudview_views::{FieldsetDef, ViewDef};

use super::{annotations, detail, detail_fieldset, labels};
use crate::common::{cloud_resource, key_values, name, others, single_field_fieldset, view};

pub const ENTITY_TYPE: &str = "k8s_service";

pub const SELECTABLE: [&str; 2] = ["namespace", "service_type"];

pub fn schema() -> ResourceSchema {
    cloud_resource(
        ENTITY_TYPE,
        "Service",
        name(),
        [
            FieldDef::string("namespace", "Namespace"),
            labels(),
            annotations(),
            key_values("selector", "Selector"),
            FieldDef::string("session_affinity", "Session affinity"),
            FieldDef::string("cluster_ip", "Cluster IP").read_only(),
            FieldDef::string("service_type", "Type"),
            FieldDef::string("external_name", "External name"),
            FieldDef::composite(
                "ports",
                "Ports",
                &["port_name", "protocol", "port", "target_port", "node_port"],
            ),
            detail(),
        ],
    )
}

pub fn fieldset_definitions() -> Vec<FieldsetDef> {
    vec![
        FieldsetDef::new(
            "service",
            "Service",
            &[
                "name",
                "namespace",
                "labels",
                "annotations",
                "selector",
                "session_affinity",
                "cluster_ip",
                "service_type",
                "external_name",
                "created",
            ],
        ),
        single_field_fieldset("ports", "Ports"),
        detail_fieldset(),
        others(),
    ]
}

pub fn view_def() -> ViewDef {
    view(ENTITY_TYPE, fieldset_definitions(), &SELECTABLE)
}

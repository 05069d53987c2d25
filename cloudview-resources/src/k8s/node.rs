//! Cluster nodes.

use cloudview_fields::{FieldDef, ResourceSchema};
use cloudview_views::{FieldsetDef, ViewDef};

use super::{annotations, detail, detail_fieldset, labels};
use crate::common::{cloud_resource, name, others, single_field_fieldset, view};

pub const ENTITY_TYPE: &str = "k8s_node";

pub const SELECTABLE: [&str; 2] = ["status", "operating_system"];

pub fn schema() -> ResourceSchema {
    cloud_resource(
        ENTITY_TYPE,
        "Node",
        name(),
        [
            FieldDef::string("status", "Status").read_only(),
            labels(),
            annotations(),
            FieldDef::composite("addresses", "Addresses", &["type", "address"]).read_only(),
            FieldDef::string("pod_cidr", "Pod CIDR").read_only(),
            FieldDef::string("provider_id", "Provider ID").read_only(),
            FieldDef::boolean("unschedulable", "Unschedulable"),
            FieldDef::string("cpu_capacity", "CPU capacity").read_only(),
            FieldDef::string("memory_capacity", "Memory capacity").read_only(),
            FieldDef::integer("pods_capacity", "Pods capacity").read_only(),
            FieldDef::string("machine_id", "Machine ID").read_only(),
            FieldDef::string("kernel_version", "Kernel version").read_only(),
            FieldDef::string("os_image", "OS image").read_only(),
            FieldDef::string("container_runtime_version", "Container runtime version").read_only(),
            FieldDef::string("kubelet_version", "Kubelet version").read_only(),
            FieldDef::string("operating_system", "Operating system").read_only(),
            FieldDef::string("architecture", "Architecture").read_only(),
            detail(),
        ],
    )
}

pub fn fieldset_definitions() -> Vec<FieldsetDef> {
    vec![
        FieldsetDef::new(
            "node",
            "Node",
            &[
                "name",
                "status",
                "labels",
                "annotations",
                "pod_cidr",
                "provider_id",
                "unschedulable",
                "created",
            ],
        ),
        FieldsetDef::new(
            "capacity",
            "Capacity",
            &["cpu_capacity", "memory_capacity", "pods_capacity"],
        ),
        single_field_fieldset("addresses", "Addresses"),
        FieldsetDef::new(
            "system_info",
            "System info",
            &[
                "machine_id",
                "kernel_version",
                "os_image",
                "container_runtime_version",
                "kubelet_version",
                "operating_system",
                "architecture",
            ],
        ),
        detail_fieldset(),
        others(),
    ]
}

pub fn view_def() -> ViewDef {
    view(ENTITY_TYPE, fieldset_definitions(), &SELECTABLE)
}

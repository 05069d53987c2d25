//! Elastic IP addresses.

use cloudview_fields::{FieldDef, ResourceSchema};
use cloudview_views::{FieldsetDef, ViewDef};

use crate::common::{cloud_resource, name, others, tags, tags_fieldset, view};

pub const ENTITY_TYPE: &str = "aws_cloud_elastic_ip";

pub const SELECTABLE: [&str; 2] = ["domain", "scope"];

pub fn schema() -> ResourceSchema {
    cloud_resource(
        ENTITY_TYPE,
        "Elastic IP",
        name(),
        [
            FieldDef::string("public_ip", "Elastic IP").read_only(),
            FieldDef::string("private_ip_address", "Private IP address").read_only(),
            FieldDef::string("allocation_id", "Allocation ID").read_only(),
            FieldDef::string("association_id", "Association ID").read_only(),
            FieldDef::string("domain", "Domain (standard | vpc)").read_only(),
            FieldDef::string("scope", "Scope").read_only(),
            FieldDef::string("network_border_group", "Network border group").read_only(),
            FieldDef::string("public_ipv4_pool", "Public IPv4 pool").read_only(),
            FieldDef::string("instance_id", "Instance ID"),
            FieldDef::string("network_interface_id", "Network interface ID"),
            FieldDef::string("network_interface_owner", "Network interface owner").read_only(),
            tags(),
        ],
    )
}

pub fn fieldset_definitions() -> Vec<FieldsetDef> {
    vec![
        FieldsetDef::new(
            "ip_address",
            "IP address",
            &[
                "name",
                "public_ip",
                "private_ip_address",
                "allocation_id",
                "association_id",
                "domain",
                "scope",
                "network_border_group",
                "public_ipv4_pool",
                "created",
            ],
        ),
        FieldsetDef::new(
            "assign",
            "Assign",
            &["instance_id", "network_interface_id", "network_interface_owner"],
        ),
        tags_fieldset(),
        others(),
    ]
}

pub fn view_def() -> ViewDef {
    view(ENTITY_TYPE, fieldset_definitions(), &SELECTABLE)
}

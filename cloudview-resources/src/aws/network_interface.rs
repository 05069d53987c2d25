//! Elastic network interfaces.

use cloudview_fields::{FieldDef, ResourceSchema};
use cloudview_views::{FieldsetDef, ViewDef};

use crate::common::{cloud_resource, name, others, tags, tags_fieldset, view};

pub const ENTITY_TYPE: &str = "aws_cloud_network_interface";

pub const SELECTABLE: [&str; 2] = ["status", "vpc_id"];

pub fn schema() -> ResourceSchema {
    cloud_resource(
        ENTITY_TYPE,
        "Network interface",
        name(),
        [
            FieldDef::string("network_interface_id", "Network interface ID").read_only(),
            FieldDef::string("instance_id", "Instance ID").read_only(),
            FieldDef::string("allocation_id", "Allocation ID").read_only(),
            FieldDef::string("mac_address", "MAC address").read_only(),
            FieldDef::integer("device_index", "Device index"),
            FieldDef::string("status", "Status").read_only(),
            FieldDef::boolean("delete_on_termination", "Delete on termination"),
            FieldDef::string("description", "Description"),
            FieldDef::string("security_groups", "Security groups"),
            FieldDef::string("vpc_id", "VPC ID").read_only(),
            FieldDef::string("subnet_id", "Subnet ID"),
            FieldDef::string("public_ips", "Public IPs").read_only(),
            FieldDef::string("primary_private_ip", "Primary private IP"),
            FieldDef::string("secondary_private_ips", "Secondary private IPs"),
            FieldDef::string("private_dns", "Private DNS").read_only(),
            FieldDef::boolean("source_dest_check", "Source/dest check"),
            FieldDef::string("attachment_id", "Attachment ID").read_only(),
            FieldDef::string("attachment_owner", "Attachment owner").read_only(),
            FieldDef::string("attachment_status", "Attachment status").read_only(),
            FieldDef::string("owner_id", "Owner").read_only(),
            tags(),
        ],
    )
}

pub fn fieldset_definitions() -> Vec<FieldsetDef> {
    vec![
        FieldsetDef::new(
            "network_interface",
            "Network interface",
            &[
                "name",
                "network_interface_id",
                "description",
                "instance_id",
                "allocation_id",
                "mac_address",
                "device_index",
                "status",
                "delete_on_termination",
                "owner_id",
                "created",
            ],
        ),
        FieldsetDef::new(
            "network",
            "Network",
            &[
                "security_groups",
                "vpc_id",
                "subnet_id",
                "public_ips",
                "primary_private_ip",
                "secondary_private_ips",
                "private_dns",
                "source_dest_check",
            ],
        ),
        FieldsetDef::new(
            "attachment",
            "Attachment",
            &["attachment_id", "attachment_owner", "attachment_status"],
        ),
        tags_fieldset(),
        others(),
    ]
}

pub fn view_def() -> ViewDef {
    view(ENTITY_TYPE, fieldset_definitions(), &SELECTABLE)
}

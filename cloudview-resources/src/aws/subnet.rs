//! VPC subnets.

use cloudview_fields::{FieldDef, ResourceSchema};
use cloudview_views::{FieldsetDef, ViewDef};

use crate::common::{cloud_resource, name, others, tags, tags_fieldset, view};

pub const ENTITY_TYPE: &str = "aws_cloud_subnet";

pub const SELECTABLE: [&str; 3] = ["state", "vpc_id", "availability_zone"];

pub fn schema() -> ResourceSchema {
    cloud_resource(
        ENTITY_TYPE,
        "Subnet",
        name(),
        [
            FieldDef::string("subnet_id", "Subnet ID").read_only(),
            FieldDef::string("vpc_id", "VPC ID"),
            FieldDef::string("owner_id", "Owner").read_only(),
            FieldDef::string("state", "State").read_only(),
            FieldDef::string("cidr_block", "IPv4 CIDR"),
            FieldDef::string("availability_zone", "Availability zone"),
            FieldDef::integer("available_ip_address_count", "Available IPv4 addresses").read_only(),
            FieldDef::boolean("default_for_az", "Default subnet").read_only(),
            FieldDef::boolean("map_public_ip_on_launch", "Auto-assign public IPv4"),
            tags(),
        ],
    )
}

pub fn fieldset_definitions() -> Vec<FieldsetDef> {
    vec![
        FieldsetDef::new(
            "subnet",
            "Subnet",
            &[
                "name",
                "subnet_id",
                "vpc_id",
                "owner_id",
                "state",
                "cidr_block",
                "availability_zone",
                "available_ip_address_count",
                "default_for_az",
                "map_public_ip_on_launch",
                "created",
            ],
        ),
        tags_fieldset(),
        others(),
    ]
}

pub fn view_def() -> ViewDef {
    view(ENTITY_TYPE, fieldset_definitions(), &SELECTABLE)
}

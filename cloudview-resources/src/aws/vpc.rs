//! VPCs.

use cloudview_fields::{FieldDef, ResourceSchema};
use cloudview_views::{FieldsetDef, ViewDef};

use crate::common::{
    cloud_resource, name, others, single_field_fieldset, tags, tags_fieldset, view,
};

pub const ENTITY_TYPE: &str = "aws_cloud_vpc";

pub const SELECTABLE: [&str; 2] = ["state", "instance_tenancy"];

const CIDR_PROPERTIES: [&str; 3] = ["cidr", "state", "association_id"];

pub fn schema() -> ResourceSchema {
    cloud_resource(
        ENTITY_TYPE,
        "VPC",
        name(),
        [
            FieldDef::string("vpc_id", "VPC ID").read_only(),
            FieldDef::string("owner_id", "Owner").read_only(),
            FieldDef::string("state", "State").read_only(),
            FieldDef::boolean("is_default", "Default VPC").read_only(),
            FieldDef::string("instance_tenancy", "Instance tenancy"),
            FieldDef::string("dhcp_options_id", "DHCP options ID").read_only(),
            FieldDef::string("cidr_block", "IPv4 CIDR").describe("The primary IPv4 CIDR block."),
            FieldDef::composite("cidr_blocks", "IPv4 CIDR blocks", &CIDR_PROPERTIES).read_only(),
            FieldDef::composite("ipv6_cidr_blocks", "IPv6 CIDR blocks", &CIDR_PROPERTIES)
                .read_only(),
            tags(),
        ],
    )
}

pub fn fieldset_definitions() -> Vec<FieldsetDef> {
    vec![
        FieldsetDef::new(
            "vpc",
            "VPC",
            &[
                "name",
                "vpc_id",
                "owner_id",
                "state",
                "is_default",
                "instance_tenancy",
                "dhcp_options_id",
                "cidr_block",
                "created",
            ],
        ),
        single_field_fieldset("cidr_blocks", "IPv4 CIDR"),
        single_field_fieldset("ipv6_cidr_blocks", "IPv6 CIDR"),
        tags_fieldset(),
        others(),
    ]
}

pub fn view_def() -> ViewDef {
    view(ENTITY_TYPE, fieldset_definitions(), &SELECTABLE)
}

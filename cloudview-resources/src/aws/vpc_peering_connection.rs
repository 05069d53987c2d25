//! VPC peering connections.

use cloudview_fields::{FieldDef, ResourceSchema};
use cloudview_views::{FieldsetDef, ViewDef};

use crate::common::{cloud_resource, name, others, tags, tags_fieldset, view};

pub const ENTITY_TYPE: &str = "aws_cloud_vpc_peering_connection";

pub const SELECTABLE: [&str; 1] = ["status_code"];

pub fn schema() -> ResourceSchema {
    cloud_resource(
        ENTITY_TYPE,
        "VPC peering connection",
        name(),
        [
            FieldDef::string("vpc_peering_connection_id", "VPC peering connection ID").read_only(),
            FieldDef::string("status_code", "Status").read_only(),
            FieldDef::string("status_message", "Status message").read_only(),
            FieldDef::timestamp("expiration_time", "Expiration time").read_only(),
            FieldDef::string("requester_vpc_id", "Requester VPC ID"),
            FieldDef::string("requester_cidr_block", "Requester CIDR").read_only(),
            FieldDef::string("requester_account_id", "Requester account").read_only(),
            FieldDef::string("requester_region", "Requester region").read_only(),
            FieldDef::string("accepter_vpc_id", "Accepter VPC ID"),
            FieldDef::string("accepter_cidr_block", "Accepter CIDR").read_only(),
            FieldDef::string("accepter_account_id", "Accepter account"),
            FieldDef::string("accepter_region", "Accepter region"),
            tags(),
        ],
    )
}

pub fn fieldset_definitions() -> Vec<FieldsetDef> {
    vec![
        FieldsetDef::new(
            "vpc_peering_connection",
            "VPC peering connection",
            &[
                "name",
                "vpc_peering_connection_id",
                "status_code",
                "status_message",
                "expiration_time",
                "created",
            ],
        ),
        FieldsetDef::new(
            "requester",
            "Requester",
            &[
                "requester_vpc_id",
                "requester_cidr_block",
                "requester_account_id",
                "requester_region",
            ],
        ),
        FieldsetDef::new(
            "accepter",
            "Accepter",
            &[
                "accepter_vpc_id",
                "accepter_cidr_block",
                "accepter_account_id",
                "accepter_region",
            ],
        ),
        tags_fieldset(),
        others(),
    ]
}

pub fn view_def() -> ViewDef {
    view(ENTITY_TYPE, fieldset_definitions(), &SELECTABLE)
}

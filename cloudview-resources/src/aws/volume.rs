//! EBS volumes.

use cloudview_fields::{FieldDef, ResourceSchema};
use cloudview_views::{FieldsetDef, ViewDef};

use crate::common::{cloud_resource, name, others, view};

pub const ENTITY_TYPE: &str = "aws_cloud_volume";

pub const SELECTABLE: [&str; 3] = ["volume_type", "state", "availability_zone"];

pub fn schema() -> ResourceSchema {
    cloud_resource(
        ENTITY_TYPE,
        "Volume",
        name(),
        [
            FieldDef::string("volume_id", "Volume ID").read_only(),
            FieldDef::string("attachment_information", "Attachment information")
                .describe("The instance the volume is attached to.")
                .read_only(),
            FieldDef::string("snapshot_id", "Snapshot ID"),
            FieldDef::string("snapshot_name", "Snapshot name").read_only(),
            FieldDef::integer("size", "Size (GiB)"),
            FieldDef::string("availability_zone", "Availability zone"),
            FieldDef::string("volume_type", "Volume type"),
            FieldDef::integer("iops", "IOPS"),
            FieldDef::boolean("encrypted", "Encrypted"),
            FieldDef::string("state", "State").read_only(),
        ],
    )
}

pub fn fieldset_definitions() -> Vec<FieldsetDef> {
    vec![
        FieldsetDef::new(
            "volume",
            "Volume",
            &[
                "attachment_information",
                "volume_id",
                "snapshot_id",
                "snapshot_name",
                "size",
                "availability_zone",
                "volume_type",
                "iops",
                "encrypted",
                "state",
                "created",
            ],
        ),
        others(),
    ]
}

pub fn view_def() -> ViewDef {
    view(ENTITY_TYPE, fieldset_definitions(), &SELECTABLE)
}


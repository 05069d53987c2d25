//! EBS snapshots.

use cloudview_fields::{FieldDef, ResourceSchema};
use cloudview_views::{FieldsetDef, ViewDef};

use crate::common::{cloud_resource, name, others, tags, tags_fieldset, view};

pub const ENTITY_TYPE: &str = "aws_cloud_snapshot";

pub const SELECTABLE: [&str; 1] = ["status"];

pub fn schema() -> ResourceSchema {
    cloud_resource(
        ENTITY_TYPE,
        "Snapshot",
        name(),
        [
            FieldDef::string("snapshot_id", "Snapshot ID").read_only(),
            FieldDef::string("volume_id", "Volume ID"),
            FieldDef::integer("size", "Size (GiB)").read_only(),
            FieldDef::string("description", "Description"),
            FieldDef::string("status", "Status").read_only(),
            FieldDef::string("progress", "Progress").read_only(),
            FieldDef::boolean("encrypted", "Encrypted").read_only(),
            FieldDef::string("owner_id", "Owner").read_only(),
            FieldDef::timestamp("started", "Started").read_only(),
            tags(),
        ],
    )
}

pub fn fieldset_definitions() -> Vec<FieldsetDef> {
    vec![
        FieldsetDef::new(
            "snapshot",
            "Snapshot",
            &[
                "name",
                "snapshot_id",
                "volume_id",
                "size",
                "description",
                "status",
                "progress",
                "encrypted",
                "owner_id",
                "started",
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

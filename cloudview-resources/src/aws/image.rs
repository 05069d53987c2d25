//! AMIs.

use cloudview_fields::{FieldDef, ResourceSchema};
use cloudview_views::{FieldsetDef, ViewDef};

use crate::common::{
    cloud_resource, name, others, single_field_fieldset, tags, tags_fieldset, view,
};

pub const ENTITY_TYPE: &str = "aws_cloud_image";

pub const SELECTABLE: [&str; 4] = ["architecture", "virtualization_type", "root_device_type", "status"];

pub fn schema() -> ResourceSchema {
    cloud_resource(
        ENTITY_TYPE,
        "Image",
        name(),
        [
            FieldDef::string("image_id", "AMI ID").read_only(),
            FieldDef::string("description", "Description"),
            FieldDef::string("account_id", "Owner account").read_only(),
            FieldDef::string("source", "Source").read_only(),
            FieldDef::string("status", "Status").read_only(),
            FieldDef::string("state_reason", "State reason").read_only(),
            FieldDef::boolean("visibility", "Public").describe("Whether the image is publicly launchable."),
            FieldDef::string("platform", "Platform").read_only(),
            FieldDef::string("architecture", "Architecture").read_only(),
            FieldDef::string("virtualization_type", "Virtualization type").read_only(),
            FieldDef::string("image_type", "Image type").read_only(),
            FieldDef::string("root_device_type", "Root device type").read_only(),
            FieldDef::string("root_device_name", "Root device name").read_only(),
            FieldDef::string("kernel_id", "Kernel ID").read_only(),
            FieldDef::string("ramdisk_id", "Ramdisk ID").read_only(),
            FieldDef::string("product_code", "Product code").read_only(),
            FieldDef::composite(
                "block_device_mappings",
                "Block device mappings",
                &["device_name", "snapshot_id", "volume_size", "volume_type", "delete_on_termination"],
            )
            .read_only(),
            tags(),
        ],
    )
}

pub fn fieldset_definitions() -> Vec<FieldsetDef> {
    vec![
        FieldsetDef::new(
            "image",
            "Image",
            &[
                "name",
                "image_id",
                "description",
                "account_id",
                "source",
                "status",
                "state_reason",
                "visibility",
                "created",
            ],
        ),
        FieldsetDef::new(
            "type",
            "Type",
            &[
                "platform",
                "architecture",
                "virtualization_type",
                "image_type",
                "product_code",
                "kernel_id",
                "ramdisk_id",
            ],
        ),
        FieldsetDef::new("device", "Device", &["root_device_type", "root_device_name"]),
        single_field_fieldset("block_device_mappings", "Block device mappings"),
        tags_fieldset(),
        others(),
    ]
}

pub fn view_def() -> ViewDef {
    view(ENTITY_TYPE, fieldset_definitions(), &SELECTABLE)
}

//! EC2 instances.

use cloudview_fields::{FieldDef, ResourceSchema};
use cloudview_views::{FieldsetDef, ViewDef};

use crate::common::{cloud_resource, name, others, tags, tags_fieldset, view};

pub const ENTITY_TYPE: &str = "aws_cloud_instance";

pub const SELECTABLE: [&str; 3] = ["instance_state", "instance_type", "availability_zone"];

pub fn schema() -> ResourceSchema {
    cloud_resource(
        ENTITY_TYPE,
        "Instance",
        name(),
        [
            FieldDef::string("instance_id", "Instance ID").read_only(),
            FieldDef::string("instance_state", "Instance state").read_only(),
            FieldDef::string("instance_type", "Instance type"),
            FieldDef::string("iam_role", "IAM role")
                .describe("The IAM instance profile attached to the instance."),
            FieldDef::string("image_id", "AMI image").read_only(),
            FieldDef::string("kernel_id", "Kernel image").read_only(),
            FieldDef::string("ramdisk_id", "Ramdisk image").read_only(),
            FieldDef::string("availability_zone", "Availability zone").read_only(),
            FieldDef::timestamp("launch_time", "Launch time").read_only(),
            FieldDef::integer("ami_launch_index", "AMI launch index").read_only(),
            FieldDef::string("public_ip", "Public IP").read_only(),
            FieldDef::string("private_ips", "Private IPs").read_only(),
            FieldDef::string("public_dns", "Public DNS").read_only(),
            FieldDef::string("private_dns", "Private DNS").read_only(),
            FieldDef::string("security_groups", "Security groups"),
            FieldDef::string("key_pair_name", "Key pair name").read_only(),
            FieldDef::string("vpc_id", "VPC ID").read_only(),
            FieldDef::string("subnet_id", "Subnet ID").read_only(),
            FieldDef::string("network_interfaces", "Network interfaces").read_only(),
            FieldDef::string("root_device_type", "Root device type").read_only(),
            FieldDef::string("root_device", "Root device").read_only(),
            FieldDef::boolean("ebs_optimized", "EBS optimized").read_only(),
            FieldDef::string("block_devices", "Block devices").read_only(),
            FieldDef::boolean("termination_protection", "Termination protection")
                .describe("Prevents the instance from being terminated through the API."),
            FieldDef::string("login_username", "Login username"),
            FieldDef::boolean("monitoring", "Detailed monitoring"),
            tags(),
        ],
    )
}

pub fn fieldset_definitions() -> Vec<FieldsetDef> {
    vec![
        FieldsetDef::new(
            "instance",
            "Instance",
            &[
                "name",
                "instance_id",
                "instance_state",
                "instance_type",
                "iam_role",
                "image_id",
                "kernel_id",
                "ramdisk_id",
                "availability_zone",
                "launch_time",
                "ami_launch_index",
            ],
        ),
        FieldsetDef::new(
            "network",
            "Network",
            &[
                "public_ip",
                "private_ips",
                "public_dns",
                "private_dns",
                "security_groups",
                "key_pair_name",
                "vpc_id",
                "subnet_id",
                "network_interfaces",
            ],
        ),
        FieldsetDef::new(
            "storage",
            "Storage",
            &["root_device_type", "root_device", "ebs_optimized", "block_devices"],
        ),
        tags_fieldset(),
        FieldsetDef::new(
            "options",
            "Options",
            &["termination_protection", "login_username", "monitoring"],
        ),
        others(),
    ]
}

pub fn view_def() -> ViewDef {
    view(ENTITY_TYPE, fieldset_definitions(), &SELECTABLE)
}

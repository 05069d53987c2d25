//! Amazon EC2 and VPC resources.

pub mod elastic_ip;
pub mod iam_role;
pub mod image;
pub mod instance;
pub mod key_pair;
pub mod network_interface;
pub mod security_group;
pub mod snapshot;
pub mod subnet;
pub mod volume;
pub mod vpc;
pub mod vpc_peering_connection;

use cloudview_fields::ResourceSchema;
use cloudview_views::ViewDef;

pub fn schemas() -> Vec<ResourceSchema> {
    vec![
        instance::schema(),
        image::schema(),
        key_pair::schema(),
        security_group::schema(),
        volume::schema(),
        snapshot::schema(),
        network_interface::schema(),
        elastic_ip::schema(),
        vpc::schema(),
        subnet::schema(),
        vpc_peering_connection::schema(),
    ]
}

pub fn views() -> Vec<ViewDef> {
    vec![
        instance::view_def(),
        image::view_def(),
        key_pair::view_def(),
        security_group::view_def(),
        volume::view_def(),
        snapshot::view_def(),
        network_interface::view_def(),
        elastic_ip::view_def(),
        vpc::view_def(),
        subnet::view_def(),
        vpc_peering_connection::view_def(),
    ]
}

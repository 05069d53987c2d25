//! Security groups and the empty-rules message.

use std::sync::Arc;

use cloudview_fields::{FieldDef, ResourceSchema};
use cloudview_views::{FieldsetDef, RenderTree, ResolveError, ViewDef};
use serde_json::Value;
use tracing::warn;

use crate::common::{cloud_resource, name, others, tags, tags_fieldset, view};

pub const ENTITY_TYPE: &str = "aws_cloud_security_group";

pub const SELECTABLE: [&str; 1] = ["vpc_id"];

/// Shown in the rules container when a group has no rules in either direction.
pub const NO_PERMISSIONS_MESSAGE: &str = "No permissions configured.";

pub const RULES_FIELDSET: &str = "rules";

const PERMISSION_FIELDS: [&str; 2] = ["ip_permission", "outbound_permission"];

const PERMISSION_PROPERTIES: [&str; 8] = [
    "ip_protocol",
    "from_port",
    "to_port",
    "source",
    "cidr_ip",
    "cidr_ip_v6",
    "prefix_list_id",
    "group_id",
];

pub fn schema() -> ResourceSchema {
    cloud_resource(
        ENTITY_TYPE,
        "Security group",
        name(),
        [
            FieldDef::string("group_name", "Security group name"),
            FieldDef::string("group_id", "ID").read_only(),
            FieldDef::string("description", "Description"),
            FieldDef::string("vpc_id", "VPC ID"),
            FieldDef::boolean("default_vpc", "Default VPC").read_only(),
            FieldDef::string("owner_id", "Owner").read_only(),
            FieldDef::composite("ip_permission", "Inbound rules", &PERMISSION_PROPERTIES),
            FieldDef::composite("outbound_permission", "Outbound rules", &PERMISSION_PROPERTIES),
            tags(),
        ],
    )
}

pub fn fieldset_definitions() -> Vec<FieldsetDef> {
    vec![
        FieldsetDef::new(
            "security_group",
            "Security group",
            &[
                "name",
                "group_name",
                "group_id",
                "description",
                "vpc_id",
                "default_vpc",
                "owner_id",
                "created",
            ],
        ),
        FieldsetDef::new(RULES_FIELDSET, "Rules", &PERMISSION_FIELDS),
        tags_fieldset(),
        others(),
    ]
}

pub fn view_def() -> ViewDef {
    view(ENTITY_TYPE, fieldset_definitions(), &SELECTABLE)
}

/// Builds URLs to other pages of the same resource.
pub trait LinkBuilder: Send + Sync {
    fn edit_rules_url(&self, entity_type: &str, entity_id: &str) -> Result<String, ResolveError>;
}

/// Render transform filling an empty rules container with a single message.
///
/// The message links to the rule editor when `links` can build the URL and
/// is plain text otherwise.
pub fn rules_fallback(
    links: Option<Arc<dyn LinkBuilder>>,
) -> impl Fn(RenderTree) -> RenderTree + Send + Sync + 'static {
    move |mut tree| {
        let entity_type = text_property(&tree, "#entity_type");
        let entity_id = text_property(&tree, "#entity_id");
        let Some(rules) = tree.element_mut(RULES_FIELDSET) else {
            return tree;
        };
        if PERMISSION_FIELDS.iter().any(|f| rules.contains_key(f)) {
            return tree;
        }

        let link = links
            .as_ref()
            .map(|links| links.edit_rules_url(&entity_type, &entity_id));
        let message = match link {
            Some(Ok(url)) => RenderTree::new()
                .with_property("#type", "link")
                .with_property("#title", NO_PERMISSIONS_MESSAGE)
                .with_property("#url", url),
            Some(Err(e)) => {
                warn!(%entity_type, %entity_id, error = %e, "cannot link to rule editor");
                plain_message()
            }
            None => plain_message(),
        };
        rules.insert_element("permissions_message", message);
        tree
    }
}

fn plain_message() -> RenderTree {
    RenderTree::new()
        .with_property("#type", "markup")
        .with_property("#markup", NO_PERMISSIONS_MESSAGE)
}

fn text_property(tree: &RenderTree, key: &str) -> String {
    tree.property(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn empty_rules_tree() -> RenderTree {
        let mut tree = RenderTree::new()
            .with_property("#entity_type", ENTITY_TYPE)
            .with_property("#entity_id", "01HZX");
        tree.insert_element(
            RULES_FIELDSET,
            RenderTree::new().with_property("#type", "details"),
        );
        tree
    }

    struct Links;

    impl LinkBuilder for Links {
        fn edit_rules_url(&self, entity_type: &str, entity_id: &str) -> Result<String, ResolveError> {
            Ok(format!("/clouds/{entity_type}/{entity_id}/edit#rules"))
        }
    }

    #[test]
    fn link_when_builder_succeeds() {
        let tree = rules_fallback(Some(Arc::new(Links)))(empty_rules_tree());
        let rules = tree.element(RULES_FIELDSET).unwrap();
        assert_eq!(rules.child_keys(), vec!["permissions_message"]);
        let message = rules.element("permissions_message").unwrap();
        assert_eq!(message.element_type(), Some("link"));
        assert_eq!(
            message.property("#url"),
            Some(&json!("/clouds/aws_cloud_security_group/01HZX/edit#rules"))
        );
    }

    #[test]
    fn rules_present_left_alone() {
        let mut tree = empty_rules_tree();
        tree.element_mut(RULES_FIELDSET)
            .unwrap()
            .insert_element("ip_permission", RenderTree::new());
        let out = rules_fallback(None)(tree.clone());
        assert_eq!(out, tree);
    }

    #[test]
    fn no_rules_container_left_alone() {
        let tree = RenderTree::new().with_property("#entity_type", ENTITY_TYPE);
        assert_eq!(rules_fallback(None)(tree.clone()), tree);
    }
}

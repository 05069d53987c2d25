//! Fields and fieldsets shared by every cloud resource.

use cloudview_fields::{FieldDef, ResourceSchema};
use cloudview_views::{FieldsetDef, ViewDef};

/// A resource schema with the standard bookkeeping fields around `fields`:
/// `cloud_context` and the label field first, then `uid`, `created`,
/// `changed` and `refreshed` last.
pub fn cloud_resource(
    entity_type: &str,
    label: &str,
    label_field: FieldDef,
    fields: impl IntoIterator<Item = FieldDef>,
) -> ResourceSchema {
    let label_name = label_field.name.clone();
    ResourceSchema::new(entity_type, label, label_name)
        .field(
            FieldDef::string("cloud_context", "Cloud service provider ID")
                .describe("A unique ID for the cloud service provider.")
                .read_only(),
        )
        .field(label_field)
        .fields(fields)
        .field(FieldDef::integer("uid", "Owner").describe("The user ID of the resource owner."))
        .field(FieldDef::timestamp("created", "Created").read_only())
        .field(FieldDef::timestamp("changed", "Changed").read_only())
        .field(FieldDef::timestamp("refreshed", "Refreshed").read_only())
}

/// The usual `name` label field.
pub fn name() -> FieldDef {
    FieldDef::string("name", "Name")
}

/// Repeated key/value pairs such as tags or labels.
pub fn key_values(name: &str, label: &str) -> FieldDef {
    FieldDef::composite(name, label, &["item_key", "item_value"])
}

pub fn tags() -> FieldDef {
    key_values("tags", "Tags")
}

pub fn tags_fieldset() -> FieldsetDef {
    single_field_fieldset("tags", "Tags")
}

/// A container for a single composite field, keyed `fieldset_<field>` so it
/// never shadows the field itself.
pub fn single_field_fieldset(field: &str, title: &str) -> FieldsetDef {
    FieldsetDef::new(format!("fieldset_{field}"), title, &[field])
}

/// The collapsed trailing container every resource has.
pub fn others() -> FieldsetDef {
    FieldsetDef::new("others", "Others", &["cloud_context", "uid"]).collapsed()
}

pub fn view(entity_type: &str, fieldsets: Vec<FieldsetDef>, selectable: &[&str]) -> ViewDef {
    fieldsets
        .into_iter()
        .fold(ViewDef::new(entity_type), ViewDef::fieldset)
        .selectable(selectable)
}

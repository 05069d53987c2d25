//! Property tests for detail composition

use std::collections::HashSet;
use std::sync::Arc;

use cloudview_entity::Record;
use cloudview_fields::{FieldDef, ResourceSchema};
use cloudview_views::{is_meta_key, FieldsetDef, RenderContext, ViewComposer, ViewDef};
use proptest::prelude::*;

const FIELDS: [&str; 8] = [
    "name",
    "vpc_id",
    "cidr_block",
    "state",
    "owner_id",
    "dhcp_options_id",
    "instance_tenancy",
    "cloud_context",
];

fn schema() -> Arc<ResourceSchema> {
    Arc::new(
        ResourceSchema::new("aws_cloud_vpc", "VPC", "name")
            .fields(FIELDS.iter().map(|f| FieldDef::string(*f, f.replace('_', " ")))),
    )
}

/// Record with the fields selected by `mask` set.
fn record(mask: &[bool]) -> Record {
    let mut record = Record::new(schema());
    for (field, set) in FIELDS.iter().zip(mask) {
        if *set {
            record.set(field, format!("{field}-value")).unwrap();
        }
    }
    record
}

/// Partition a random subset of the fields into up to four fieldsets.
fn view(assignment: &[Option<usize>]) -> ViewDef {
    let mut groups: Vec<Vec<&str>> = vec![Vec::new(); 4];
    for (field, group) in FIELDS.iter().zip(assignment) {
        if let Some(g) = group {
            groups[*g].push(*field);
        }
    }
    groups
        .into_iter()
        .enumerate()
        .filter(|(_, fields)| !fields.is_empty())
        .fold(ViewDef::new("aws_cloud_vpc"), |view, (i, fields)| {
            view.fieldset(FieldsetDef::new(format!("group_{i}"), format!("Group {i}"), &fields))
        })
}

fn strategy() -> impl Strategy<Value = (Vec<bool>, Vec<Option<usize>>, i32)> {
    (
        prop::collection::vec(any::<bool>(), FIELDS.len()),
        prop::collection::vec(prop::option::of(0usize..4), FIELDS.len()),
        -1000i32..1000,
    )
}

proptest! {
    #[test]
    fn top_level_keys_are_meta_containers_or_label((mask, assignment, start) in strategy()) {
        let view = view(&assignment);
        let tree = ViewComposer::default()
            .with_weight_start(start)
            .render_detail(&record(&mask), &view, &RenderContext::default())
            .unwrap();

        let containers: HashSet<&str> = view.fieldsets.iter().map(|fs| fs.name.as_str()).collect();
        for key in tree.keys() {
            prop_assert!(is_meta_key(key) || containers.contains(key) || key == "name");
        }
    }

    #[test]
    fn container_weights_follow_declaration((mask, assignment, start) in strategy()) {
        let view = view(&assignment);
        let tree = ViewComposer::default()
            .with_weight_start(start)
            .render_detail(&record(&mask), &view, &RenderContext::default())
            .unwrap();

        let weights: Vec<i64> = view
            .fieldsets
            .iter()
            .map(|fs| tree.element(&fs.name).and_then(|c| c.weight()).unwrap())
            .collect();
        prop_assert!(weights.windows(2).all(|w| w[0] < w[1]));
        if let Some(first) = weights.first() {
            prop_assert_eq!(*first, i64::from(start));
        }
    }

    #[test]
    fn sections_hold_only_their_own_fields((mask, assignment, start) in strategy()) {
        let view = view(&assignment);
        let tree = ViewComposer::default()
            .with_weight_start(start)
            .render_detail(&record(&mask), &view, &RenderContext::default())
            .unwrap();

        for fs in &view.fieldsets {
            let section = tree.element(&fs.name).unwrap();
            for key in section.child_keys() {
                prop_assert!(fs.fields.iter().any(|f| f == key));
            }
        }
    }

    #[test]
    fn rendering_is_idempotent((mask, assignment, start) in strategy()) {
        let view = view(&assignment);
        let record = record(&mask);
        let composer = ViewComposer::default().with_weight_start(start);
        let ctx = RenderContext::default();
        let first = composer.render_detail(&record, &view, &ctx).unwrap();
        let second = composer.render_detail(&record, &view, &ctx).unwrap();
        prop_assert_eq!(first, second);
    }
}

//! View definitions: fieldset grouping for detail pages and selectable list
//! columns.

use std::collections::{HashMap, HashSet};

use cloudview_config::ValidationMode;
use cloudview_fields::ResourceSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::error::{Result, ViewsError};

/// One titled group of fields on a detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldsetDef {
    /// Container key in the render tree; must not equal a field name.
    pub name: String,
    pub title: String,
    #[serde(default = "default_open")]
    pub open: bool,
    pub fields: Vec<String>,
}

fn default_open() -> bool {
    true
}

impl FieldsetDef {
    pub fn new<S: AsRef<str>>(name: impl Into<String>, title: impl Into<String>, fields: &[S]) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            open: true,
            fields: fields.iter().map(|f| f.as_ref().to_string()).collect(),
        }
    }

    /// Render the container collapsed.
    pub fn collapsed(mut self) -> Self {
        self.open = false;
        self
    }
}

/// How one resource type is presented.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewDef {
    pub entity_type: String,
    /// Detail page containers, in display order.
    #[serde(default)]
    pub fieldsets: Vec<FieldsetDef>,
    /// List columns filtered by a select of stored values.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub selectable: Vec<String>,
}

/// One way a view definition disagrees with its schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyProblem {
    #[error("fieldset '{fieldset}' lists unknown field '{field}'")]
    DanglingField { fieldset: String, field: String },

    #[error("field '{field}' is listed by both '{first}' and '{second}'")]
    DuplicateField {
        field: String,
        first: String,
        second: String,
    },

    #[error("fieldset '{fieldset}' has the same name as a field")]
    NameCollision { fieldset: String },

    #[error("fieldset '{fieldset}' is declared more than once")]
    DuplicateFieldset { fieldset: String },

    #[error("selectable column '{field}' is not a field")]
    UnknownSelectable { field: String },

    #[error("selectable column '{field}' is composite and cannot be filtered")]
    UnfilterableSelectable { field: String },

    #[error("view is for '{actual}', schema is '{expected}'")]
    EntityTypeMismatch { expected: String, actual: String },
}

impl ViewDef {
    pub fn new(entity_type: impl Into<String>) -> Self {
        Self {
            entity_type: entity_type.into(),
            fieldsets: Vec::new(),
            selectable: Vec::new(),
        }
    }

    pub fn fieldset(mut self, fieldset: FieldsetDef) -> Self {
        self.fieldsets.push(fieldset);
        self
    }

    pub fn selectable<S: AsRef<str>>(mut self, names: &[S]) -> Self {
        self.selectable = names.iter().map(|n| n.as_ref().to_string()).collect();
        self
    }

    /// The detail page grouping, in display order.
    pub fn fieldset_definitions(&self) -> &[FieldsetDef] {
        &self.fieldsets
    }

    /// Every field some fieldset lists, first occurrence order.
    pub fn claimed_fields(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.fieldsets
            .iter()
            .flat_map(|fs| fs.fields.iter())
            .filter(|f| seen.insert(f.as_str()))
            .map(String::as_str)
            .collect()
    }

    /// Collect every disagreement with `schema`.
    pub fn problems(&self, schema: &ResourceSchema) -> Vec<PolicyProblem> {
        let mut problems = Vec::new();
        if self.entity_type != schema.name {
            problems.push(PolicyProblem::EntityTypeMismatch {
                expected: schema.name.clone(),
                actual: self.entity_type.clone(),
            });
        }

        let mut fieldset_names = HashSet::new();
        let mut owner: HashMap<&str, &str> = HashMap::new();
        for fs in &self.fieldsets {
            if !fieldset_names.insert(fs.name.as_str()) {
                problems.push(PolicyProblem::DuplicateFieldset {
                    fieldset: fs.name.clone(),
                });
            }
            if schema.contains(&fs.name) {
                problems.push(PolicyProblem::NameCollision {
                    fieldset: fs.name.clone(),
                });
            }
            for field in &fs.fields {
                if !schema.contains(field) {
                    problems.push(PolicyProblem::DanglingField {
                        fieldset: fs.name.clone(),
                        field: field.clone(),
                    });
                    continue;
                }
                if let Some(first) = owner.insert(field.as_str(), fs.name.as_str()) {
                    problems.push(PolicyProblem::DuplicateField {
                        field: field.clone(),
                        first: first.to_string(),
                        second: fs.name.clone(),
                    });
                }
            }
        }

        for name in &self.selectable {
            match schema.get_field(name) {
                None => problems.push(PolicyProblem::UnknownSelectable { field: name.clone() }),
                Some(def) if !def.is_filterable() => {
                    problems.push(PolicyProblem::UnfilterableSelectable { field: name.clone() })
                }
                Some(_) => {}
            }
        }
        problems
    }

    /// Check against `schema`.
    ///
    /// Strict mode fails on any problem. Lenient mode logs each one and
    /// succeeds; rendering then drops the bad references.
    pub fn check(&self, schema: &ResourceSchema, mode: ValidationMode) -> Result<()> {
        let problems = self.problems(schema);
        if problems.is_empty() {
            return Ok(());
        }
        if mode.is_strict() {
            return Err(ViewsError::InvalidView {
                entity_type: self.entity_type.clone(),
                problems,
            });
        }
        for problem in &problems {
            warn!(entity_type = %self.entity_type, %problem, "ignoring view problem");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cloudview_fields::FieldDef;

    fn volume_schema() -> ResourceSchema {
        ResourceSchema::new("aws_cloud_volume", "Volume", "name").fields([
            FieldDef::string("cloud_context", "Cloud service provider ID"),
            FieldDef::string("name", "Name"),
            FieldDef::string("volume_id", "Volume ID"),
            FieldDef::string("state", "State"),
            FieldDef::composite("tags", "Tags", &["item_key", "item_value"]),
        ])
    }

    fn volume_view() -> ViewDef {
        ViewDef::new("aws_cloud_volume")
            .fieldset(FieldsetDef::new("volume", "Volume", &["name", "volume_id", "state"]))
            .fieldset(FieldsetDef::new("others", "Others", &["cloud_context"]).collapsed())
            .selectable(&["state"])
    }

    #[test]
    fn clean_view_has_no_problems() {
        assert!(volume_view().problems(&volume_schema()).is_empty());
        volume_view()
            .check(&volume_schema(), ValidationMode::Strict)
            .unwrap();
    }

    #[test]
    fn claimed_fields_in_order() {
        assert_eq!(
            volume_view().claimed_fields(),
            vec!["name", "volume_id", "state", "cloud_context"]
        );
    }

    #[test]
    fn dangling_field_detected() {
        let view = volume_view().fieldset(FieldsetDef::new("extra", "Extra", &["iops"]));
        assert_eq!(
            view.problems(&volume_schema()),
            vec![PolicyProblem::DanglingField {
                fieldset: "extra".into(),
                field: "iops".into()
            }]
        );
    }

    #[test]
    fn duplicate_membership_detected() {
        let view = volume_view().fieldset(FieldsetDef::new("again", "Again", &["state"]));
        assert!(matches!(
            view.problems(&volume_schema()).as_slice(),
            [PolicyProblem::DuplicateField { field, first, second }]
                if field == "state" && first == "volume" && second == "again"
        ));
    }

    #[test]
    fn fieldset_named_like_field_detected() {
        let view = ViewDef::new("aws_cloud_volume")
            .fieldset(FieldsetDef::new("tags", "Tags", &["tags"]));
        assert_eq!(
            view.problems(&volume_schema()),
            vec![PolicyProblem::NameCollision {
                fieldset: "tags".into()
            }]
        );
    }

    #[test]
    fn bad_selectable_detected() {
        let view = volume_view().selectable(&["state", "tags", "kms_key"]);
        let problems = view.problems(&volume_schema());
        assert_eq!(problems.len(), 2);
        assert!(problems.contains(&PolicyProblem::UnfilterableSelectable { field: "tags".into() }));
        assert!(problems.contains(&PolicyProblem::UnknownSelectable { field: "kms_key".into() }));
    }

    #[test]
    fn strict_rejects_lenient_accepts() {
        let view = volume_view().fieldset(FieldsetDef::new("extra", "Extra", &["iops"]));
        let err = view
            .check(&volume_schema(), ValidationMode::Strict)
            .unwrap_err();
        assert!(matches!(err, ViewsError::InvalidView { ref problems, .. } if problems.len() == 1));
        view.check(&volume_schema(), ValidationMode::Lenient).unwrap();
    }

    #[test]
    fn yaml_defaults_open_and_selectable() {
        let yaml = "entity_type: aws_cloud_volume\nfieldsets:\n  - name: volume\n    title: Volume\n    fields: [name]\n";
        let view: ViewDef = serde_yaml_ng::from_str(yaml).unwrap();
        assert!(view.fieldsets[0].open);
        assert!(view.selectable.is_empty());
    }
}

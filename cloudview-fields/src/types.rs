//! Core field and resource schema types.
//!
//! All types serialize to/from YAML via serde. A [`FieldDef`] describes one
//! named, typed attribute; a [`ResourceSchema`] lists every attribute of one
//! resource type together with the field used as the record's label.

use serde::{Deserialize, Serialize};

use crate::error::{FieldsError, Result};

/// Scalar value types a primitive field can hold.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum PrimitiveType {
    String,
    Boolean,
    Integer,
    Timestamp,
}

/// The type of a field: determines what shape the value takes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum FieldType {
    /// A single scalar value.
    Primitive { primitive: PrimitiveType },
    /// Zero or more structured items (tags, IP permission rules, ...).
    /// `properties` lists the item keys in display order.
    CompositeRepeated {
        #[serde(default)]
        properties: Vec<String>,
    },
}

impl FieldType {
    pub fn primitive(&self) -> Option<PrimitiveType> {
        match self {
            FieldType::Primitive { primitive } => Some(*primitive),
            FieldType::CompositeRepeated { .. } => None,
        }
    }

    pub fn is_composite(&self) -> bool {
        matches!(self, FieldType::CompositeRepeated { .. })
    }
}

/// How a field value is displayed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Display {
    Text,
    Boolean,
    Number,
    Timestamp,
    Table,
}

/// How a field sorts.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum SortKind {
    Alphanumeric,
    Numeric,
    Datetime,
}

/// A field definition: the complete schema for a single named attribute.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldDef {
    pub name: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub type_: FieldType,
    #[serde(default)]
    pub read_only: bool,
    #[serde(default)]
    pub weight: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<Display>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortKind>,
}

impl FieldDef {
    pub fn new(name: impl Into<String>, label: impl Into<String>, type_: FieldType) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            description: None,
            type_,
            read_only: false,
            weight: 0,
            display: None,
            sort: None,
        }
    }

    pub fn string(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::primitive(name, label, PrimitiveType::String)
    }

    pub fn boolean(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::primitive(name, label, PrimitiveType::Boolean)
    }

    pub fn integer(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::primitive(name, label, PrimitiveType::Integer)
    }

    pub fn timestamp(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::primitive(name, label, PrimitiveType::Timestamp)
    }

    /// A repeated composite field whose items carry `properties`.
    pub fn composite(
        name: impl Into<String>,
        label: impl Into<String>,
        properties: &[&str],
    ) -> Self {
        Self::new(
            name,
            label,
            FieldType::CompositeRepeated {
                properties: properties.iter().map(|p| p.to_string()).collect(),
            },
        )
    }

    fn primitive(name: impl Into<String>, label: impl Into<String>, primitive: PrimitiveType) -> Self {
        Self::new(name, label, FieldType::Primitive { primitive })
    }

    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    pub fn weight(mut self, weight: i32) -> Self {
        self.weight = weight;
        self
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_display(mut self, display: Display) -> Self {
        self.display = Some(display);
        self
    }

    pub fn with_sort(mut self, sort: SortKind) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Only scalar columns can back a list filter.
    pub fn is_filterable(&self) -> bool {
        !self.type_.is_composite()
    }

    /// Infer display from field type if not explicitly set.
    pub fn effective_display(&self) -> Display {
        if let Some(d) = self.display {
            return d;
        }
        match self.type_ {
            FieldType::Primitive {
                primitive: PrimitiveType::String,
            } => Display::Text,
            FieldType::Primitive {
                primitive: PrimitiveType::Boolean,
            } => Display::Boolean,
            FieldType::Primitive {
                primitive: PrimitiveType::Integer,
            } => Display::Number,
            FieldType::Primitive {
                primitive: PrimitiveType::Timestamp,
            } => Display::Timestamp,
            FieldType::CompositeRepeated { .. } => Display::Table,
        }
    }

    /// Infer sort from field type if not explicitly set. Composite fields don't sort.
    pub fn effective_sort(&self) -> Option<SortKind> {
        if self.sort.is_some() {
            return self.sort;
        }
        match self.type_.primitive()? {
            PrimitiveType::String | PrimitiveType::Boolean => Some(SortKind::Alphanumeric),
            PrimitiveType::Integer => Some(SortKind::Numeric),
            PrimitiveType::Timestamp => Some(SortKind::Datetime),
        }
    }
}

/// A resource schema: every field of one resource type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResourceSchema {
    /// Entity type identifier, e.g. `aws_cloud_instance`.
    pub name: String,
    /// Human readable resource name, e.g. `Instance`.
    pub label: String,
    /// Field whose value labels a record (usually `name`).
    pub label_field: String,
    #[serde(default)]
    pub fields: Vec<FieldDef>,
}

impl ResourceSchema {
    pub fn new(
        name: impl Into<String>,
        label: impl Into<String>,
        label_field: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            label_field: label_field.into(),
            fields: Vec::new(),
        }
    }

    /// Append a field. Weights left at zero take the declaration position.
    pub fn field(mut self, mut def: FieldDef) -> Self {
        if def.weight == 0 {
            def.weight = self.fields.len() as i32;
        }
        self.fields.push(def);
        self
    }

    /// Append several fields in order.
    pub fn fields(self, defs: impl IntoIterator<Item = FieldDef>) -> Self {
        defs.into_iter().fold(self, ResourceSchema::field)
    }

    pub fn get_field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Like [`get_field`](Self::get_field) but fails with `FieldNotFound`.
    pub fn require_field(&self, name: &str) -> Result<&FieldDef> {
        self.get_field(name).ok_or_else(|| FieldsError::FieldNotFound {
            entity_type: self.name.clone(),
            name: name.to_string(),
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get_field(name).is_some()
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Check name uniqueness and that the label field exists.
    pub fn validate(&self) -> Result<()> {
        let mut seen = std::collections::HashSet::new();
        for field in &self.fields {
            if !seen.insert(field.name.as_str()) {
                return Err(FieldsError::DuplicateFieldName {
                    entity_type: self.name.clone(),
                    name: field.name.clone(),
                });
            }
        }
        if !self.contains(&self.label_field) {
            return Err(FieldsError::LabelFieldMissing {
                entity_type: self.name.clone(),
                field: self.label_field.clone(),
            });
        }
        Ok(())
    }
}

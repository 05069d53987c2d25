//! Records: schema-backed field values for one cloud resource.

use std::sync::Arc;

use cloudview_fields::ResourceSchema;
use indexmap::IndexMap;
use ulid::Ulid;

use crate::error::{EntityError, Result};
use crate::value::{FieldValue, FromFieldValue};

/// One stored cloud resource.
///
/// Every field declared by the schema has a slot, initially
/// [`FieldValue::Absent`], kept in schema order.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    id: Ulid,
    schema: Arc<ResourceSchema>,
    values: IndexMap<String, FieldValue>,
}

impl Record {
    /// A new record with a fresh id and every field absent.
    pub fn new(schema: Arc<ResourceSchema>) -> Self {
        let values = schema
            .fields
            .iter()
            .map(|f| (f.name.clone(), FieldValue::Absent))
            .collect();
        Self {
            id: Ulid::new(),
            schema,
            values,
        }
    }

    pub fn with_id(mut self, id: Ulid) -> Self {
        self.id = id;
        self
    }

    pub fn id(&self) -> Ulid {
        self.id
    }

    pub fn entity_type(&self) -> &str {
        &self.schema.name
    }

    pub fn schema(&self) -> &Arc<ResourceSchema> {
        &self.schema
    }

    /// Set a field, checking that it exists and that the value fits its type.
    pub fn set(&mut self, name: &str, value: impl Into<FieldValue>) -> Result<()> {
        let value = value.into();
        let field = self
            .schema
            .get_field(name)
            .ok_or_else(|| EntityError::field_not_found(&self.schema.name, name))?;
        if !value.conforms_to(&field.type_) {
            return Err(EntityError::TypeMismatch {
                entity_type: self.schema.name.clone(),
                field: name.to_string(),
                expected: expected_name(&field.type_).to_string(),
            });
        }
        self.values.insert(name.to_string(), value);
        Ok(())
    }

    /// Builder form of [`set`](Self::set).
    pub fn with(mut self, name: &str, value: impl Into<FieldValue>) -> Result<Self> {
        self.set(name, value)?;
        Ok(self)
    }

    /// Raw value of a field.
    pub fn value(&self, name: &str) -> Result<&FieldValue> {
        self.values
            .get(name)
            .ok_or_else(|| EntityError::field_not_found(&self.schema.name, name))
    }

    /// Typed value of a field: `Ok(None)` when absent, `FieldNotFound` for
    /// names outside the schema, `TypeMismatch` when `T` is the wrong type.
    pub fn get<T: FromFieldValue>(&self, name: &str) -> Result<Option<T>> {
        let value = self.value(name)?;
        if value.is_absent() {
            return Ok(None);
        }
        T::from_field_value(value)
            .map(Some)
            .ok_or_else(|| EntityError::TypeMismatch {
                entity_type: self.schema.name.clone(),
                field: name.to_string(),
                expected: T::EXPECTED.to_string(),
            })
    }

    /// Value of the schema's label field as text.
    pub fn label(&self) -> Option<String> {
        self.values
            .get(&self.schema.label_field)
            .and_then(FieldValue::as_text)
    }

    /// The `cloud_context` field, when the schema has one and it is set.
    pub fn cloud_context(&self) -> Option<String> {
        self.get::<String>("cloud_context").ok().flatten()
    }

    /// All fields in schema order.
    pub fn values(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// A transient copy keeping only `names`; every other field is absent.
    /// Names the schema does not declare are ignored.
    pub fn with_only<S: AsRef<str>>(&self, names: &[S]) -> Record {
        let values = self
            .values
            .iter()
            .map(|(name, value)| {
                let keep = names.iter().any(|n| n.as_ref() == name);
                let value = if keep {
                    value.clone()
                } else {
                    FieldValue::Absent
                };
                (name.clone(), value)
            })
            .collect();
        Record {
            id: self.id,
            schema: Arc::clone(&self.schema),
            values,
        }
    }

    /// A transient copy with some values replaced. Not persisted anywhere.
    pub fn with_overrides<I, S>(&self, overrides: I) -> Result<Record>
    where
        I: IntoIterator<Item = (S, FieldValue)>,
        S: AsRef<str>,
    {
        let mut record = self.clone();
        for (name, value) in overrides {
            record.set(name.as_ref(), value)?;
        }
        Ok(record)
    }

    /// Whether two records hold equal values, ignoring the named fields.
    pub fn same_values_except(&self, other: &Record, ignored: &[&str]) -> bool {
        self.schema.name == other.schema.name
            && self
                .values
                .iter()
                .filter(|(name, _)| !ignored.contains(&name.as_str()))
                .all(|(name, value)| other.values.get(name) == Some(value))
    }
}

fn expected_name(field_type: &cloudview_fields::FieldType) -> &'static str {
    use cloudview_fields::{FieldType, PrimitiveType};
    match field_type {
        FieldType::Primitive { primitive } => match primitive {
            PrimitiveType::String => "string",
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::Integer => "integer",
            PrimitiveType::Timestamp => "timestamp",
        },
        FieldType::CompositeRepeated { .. } => "composite-repeated",
    }
}

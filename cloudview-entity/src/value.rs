//! Field values stored on records.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use cloudview_fields::{FieldType, PrimitiveType, SortKind};
use indexmap::IndexMap;
use serde::Serialize;

/// One item of a composite-repeated field, property name → value.
pub type Item = IndexMap<String, String>;

/// A stored field value. `Absent` is the explicit "no value" marker.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    #[default]
    Absent,
    String(String),
    Boolean(bool),
    Integer(i64),
    Timestamp(DateTime<Utc>),
    Items(Vec<Item>),
}

impl FieldValue {
    pub fn is_absent(&self) -> bool {
        matches!(self, FieldValue::Absent)
    }

    /// Absent, or a composite with no items.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Absent => true,
            FieldValue::Items(items) => items.is_empty(),
            _ => false,
        }
    }

    /// Whether this value may be stored in a field of `field_type`.
    /// `Absent` conforms to every type.
    pub fn conforms_to(&self, field_type: &FieldType) -> bool {
        match (self, field_type) {
            (FieldValue::Absent, _) => true,
            (FieldValue::Items(_), FieldType::CompositeRepeated { .. }) => true,
            (value, FieldType::Primitive { primitive }) => value.primitive() == Some(*primitive),
            _ => false,
        }
    }

    fn primitive(&self) -> Option<PrimitiveType> {
        match self {
            FieldValue::String(_) => Some(PrimitiveType::String),
            FieldValue::Boolean(_) => Some(PrimitiveType::Boolean),
            FieldValue::Integer(_) => Some(PrimitiveType::Integer),
            FieldValue::Timestamp(_) => Some(PrimitiveType::Timestamp),
            FieldValue::Absent | FieldValue::Items(_) => None,
        }
    }

    /// Scalar value as text, the way list filters and select options see it.
    pub fn as_text(&self) -> Option<String> {
        match self {
            FieldValue::String(s) => Some(s.clone()),
            FieldValue::Boolean(b) => Some(b.to_string()),
            FieldValue::Integer(i) => Some(i.to_string()),
            FieldValue::Timestamp(t) => Some(t.to_rfc3339()),
            FieldValue::Absent | FieldValue::Items(_) => None,
        }
    }

    /// Order two values of one column. Absent values sort first.
    pub fn compare(&self, other: &FieldValue, sort: SortKind) -> Ordering {
        match (self, other) {
            (FieldValue::Absent, FieldValue::Absent) => Ordering::Equal,
            (FieldValue::Absent, _) => Ordering::Less,
            (_, FieldValue::Absent) => Ordering::Greater,
            (FieldValue::Integer(a), FieldValue::Integer(b)) => a.cmp(b),
            (FieldValue::Timestamp(a), FieldValue::Timestamp(b)) => a.cmp(b),
            (FieldValue::Boolean(a), FieldValue::Boolean(b)) => a.cmp(b),
            (a, b) => {
                let (a, b) = (a.as_text().unwrap_or_default(), b.as_text().unwrap_or_default());
                match sort {
                    SortKind::Numeric => match (a.parse::<f64>(), b.parse::<f64>()) {
                        (Ok(x), Ok(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
                        _ => a.cmp(&b),
                    },
                    SortKind::Alphanumeric | SortKind::Datetime => {
                        a.to_lowercase().cmp(&b.to_lowercase())
                    }
                }
            }
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::String(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Boolean(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        FieldValue::Timestamp(value)
    }
}

impl From<Vec<Item>> for FieldValue {
    fn from(value: Vec<Item>) -> Self {
        FieldValue::Items(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Absent, Into::into)
    }
}

/// Typed extraction from a [`FieldValue`], used by `Record::get`.
pub trait FromFieldValue: Sized {
    /// Type name reported in mismatch errors.
    const EXPECTED: &'static str;

    /// `None` when the value holds another type.
    fn from_field_value(value: &FieldValue) -> Option<Self>;
}

impl FromFieldValue for String {
    const EXPECTED: &'static str = "string";

    fn from_field_value(value: &FieldValue) -> Option<Self> {
        match value {
            FieldValue::String(s) => Some(s.clone()),
            _ => None,
        }
    }
}

impl FromFieldValue for bool {
    const EXPECTED: &'static str = "boolean";

    fn from_field_value(value: &FieldValue) -> Option<Self> {
        match value {
            FieldValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

impl FromFieldValue for i64 {
    const EXPECTED: &'static str = "integer";

    fn from_field_value(value: &FieldValue) -> Option<Self> {
        match value {
            FieldValue::Integer(i) => Some(*i),
            _ => None,
        }
    }
}

impl FromFieldValue for DateTime<Utc> {
    const EXPECTED: &'static str = "timestamp";

    fn from_field_value(value: &FieldValue) -> Option<Self> {
        match value {
            FieldValue::Timestamp(t) => Some(*t),
            _ => None,
        }
    }
}

impl FromFieldValue for Vec<Item> {
    const EXPECTED: &'static str = "composite-repeated";

    fn from_field_value(value: &FieldValue) -> Option<Self> {
        match value {
            FieldValue::Items(items) => Some(items.clone()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn tag(key: &str, value: &str) -> Item {
        let mut item = Item::new();
        item.insert("item_key".into(), key.into());
        item.insert("item_value".into(), value.into());
        item
    }

    #[test]
    fn absent_conforms_to_everything() {
        let string = FieldType::Primitive {
            primitive: PrimitiveType::String,
        };
        let composite = FieldType::CompositeRepeated { properties: vec![] };
        assert!(FieldValue::Absent.conforms_to(&string));
        assert!(FieldValue::Absent.conforms_to(&composite));
    }

    #[test]
    fn conforms_to_checks_primitive() {
        let integer = FieldType::Primitive {
            primitive: PrimitiveType::Integer,
        };
        assert!(FieldValue::from(8_i64).conforms_to(&integer));
        assert!(!FieldValue::from("8").conforms_to(&integer));
        assert!(!FieldValue::Items(vec![]).conforms_to(&integer));
    }

    #[test]
    fn empty_items_is_empty() {
        assert!(FieldValue::Items(vec![]).is_empty());
        assert!(!FieldValue::Items(vec![tag("Name", "web")]).is_empty());
        assert!(!FieldValue::from("").is_empty());
    }

    #[test]
    fn option_converts_to_absent() {
        let none: Option<&str> = None;
        assert_eq!(FieldValue::from(none), FieldValue::Absent);
        assert_eq!(FieldValue::from(Some(true)), FieldValue::Boolean(true));
    }

    #[test]
    fn compare_numeric_and_text() {
        assert_eq!(
            FieldValue::from(2_i64).compare(&FieldValue::from(10_i64), SortKind::Numeric),
            Ordering::Less
        );
        assert_eq!(
            FieldValue::from("10").compare(&FieldValue::from("9"), SortKind::Numeric),
            Ordering::Greater
        );
        assert_eq!(
            FieldValue::from("b").compare(&FieldValue::from("A"), SortKind::Alphanumeric),
            Ordering::Greater
        );
        assert_eq!(
            FieldValue::Absent.compare(&FieldValue::from("a"), SortKind::Alphanumeric),
            Ordering::Less
        );
    }

    #[test]
    fn serializes_untagged() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(serde_json::to_value(FieldValue::Absent).unwrap(), serde_json::Value::Null);
        assert_eq!(
            serde_json::to_value(FieldValue::from(ts)).unwrap(),
            serde_json::json!("2024-01-02T03:04:05Z")
        );
        assert_eq!(
            serde_json::to_value(FieldValue::Items(vec![tag("Name", "web")])).unwrap(),
            serde_json::json!([{"item_key": "Name", "item_value": "web"}])
        );
    }

    #[test]
    fn typed_extraction() {
        assert_eq!(String::from_field_value(&"x".into()), Some("x".to_string()));
        assert_eq!(i64::from_field_value(&"x".into()), None);
        assert_eq!(bool::from_field_value(&true.into()), Some(true));
    }
}

//! Single-record rendering.

use cloudview_entity::{FieldValue, Record};
use cloudview_fields::{Display, FieldDef, FieldType};
use serde_json::{json, Map, Value};

use crate::error::Result;
use crate::render::RenderTree;

/// Which variant of a record's rendering is requested.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RenderContext {
    pub view_mode: String,
    pub langcode: Option<String>,
}

impl RenderContext {
    pub fn new(view_mode: impl Into<String>) -> Self {
        Self {
            view_mode: view_mode.into(),
            langcode: None,
        }
    }

    pub fn with_langcode(mut self, langcode: impl Into<String>) -> Self {
        self.langcode = Some(langcode.into());
        self
    }
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::new("full")
    }
}

/// Turns one record into a render tree with one child per displayed field.
pub trait EntityRenderer: Send + Sync {
    fn render(&self, record: &Record, ctx: &RenderContext) -> Result<RenderTree>;
}

/// Renders every non-empty field in weight order.
///
/// Each field becomes an element with `#type: field`, `#field_name`,
/// `#label`, `#weight`, `#display` and `#items`. Absent fields and
/// composites without items produce no element.
#[derive(Debug, Default, Clone, Copy)]
pub struct FieldListRenderer;

impl EntityRenderer for FieldListRenderer {
    fn render(&self, record: &Record, ctx: &RenderContext) -> Result<RenderTree> {
        let schema = record.schema();
        let mut tree = RenderTree::new()
            .with_property("#entity_type", schema.name.as_str())
            .with_property("#entity_id", record.id().to_string())
            .with_property("#view_mode", ctx.view_mode.as_str())
            .with_property(
                "#cache",
                json!({ "tags": [format!("{}:{}", schema.name, record.id())] }),
            );
        if let Some(langcode) = &ctx.langcode {
            tree.set_property("#langcode", langcode.as_str());
        }

        let mut fields: Vec<&FieldDef> = schema.fields.iter().collect();
        fields.sort_by_key(|f| f.weight);
        for field in fields {
            let value = record.value(&field.name)?;
            if value.is_empty() {
                continue;
            }
            tree.insert_element(field.name.clone(), field_element(field, value));
        }
        Ok(tree)
    }
}

fn field_element(field: &FieldDef, value: &FieldValue) -> RenderTree {
    let display = field.effective_display();
    RenderTree::new()
        .with_property("#type", "field")
        .with_property("#field_name", field.name.as_str())
        .with_property("#label", field.label.as_str())
        .with_property("#weight", field.weight)
        .with_property("#display", display_name(display))
        .with_property("#items", items(field, value))
}

fn display_name(display: Display) -> &'static str {
    match display {
        Display::Text => "text",
        Display::Boolean => "boolean",
        Display::Number => "number",
        Display::Timestamp => "timestamp",
        Display::Table => "table",
    }
}

fn items(field: &FieldDef, value: &FieldValue) -> Value {
    match value {
        FieldValue::Absent => json!([]),
        FieldValue::String(s) => json!([s]),
        FieldValue::Boolean(b) => json!([if *b { "On" } else { "Off" }]),
        FieldValue::Integer(i) => json!([i]),
        FieldValue::Timestamp(t) => json!([t.format("%Y-%m-%d %H:%M:%S UTC").to_string()]),
        FieldValue::Items(rows) => {
            let properties: &[String] = match &field.type_ {
                FieldType::CompositeRepeated { properties } => properties,
                FieldType::Primitive { .. } => &[],
            };
            let rows = rows
                .iter()
                .map(|row| {
                    // declared properties first, then anything extra the provider sent
                    let mut cells = Map::new();
                    for property in properties {
                        if let Some(cell) = row.get(property) {
                            cells.insert(property.clone(), Value::from(cell.as_str()));
                        }
                    }
                    for (key, cell) in row {
                        if !cells.contains_key(key) {
                            cells.insert(key.clone(), Value::from(cell.as_str()));
                        }
                    }
                    Value::Object(cells)
                })
                .collect();
            Value::Array(rows)
        }
    }
}

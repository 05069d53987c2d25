//! List page filters and querying.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::sync::Arc;

use cloudview_entity::Record;
use cloudview_fields::{ResourceSchema, SortKind};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// How one filter-row column accepts input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "widget", rename_all = "lowercase")]
pub enum FilterWidget {
    /// Free-text substring search.
    Text,
    /// A choice among the distinct stored values.
    Select { options: Vec<String> },
}

impl FilterWidget {
    pub fn kind(&self) -> &'static str {
        match self {
            FilterWidget::Text => "text",
            FilterWidget::Select { .. } => "select",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterDefinition {
    pub field: String,
    pub label: String,
    #[serde(flatten)]
    pub widget: FilterWidget,
}

/// The filter row of one resource's list page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FilterTable {
    filters: IndexMap<String, FilterDefinition>,
}

impl FilterTable {
    /// A text filter for every filterable field, in schema order.
    pub fn for_schema(schema: &ResourceSchema) -> Self {
        let filters = schema
            .fields
            .iter()
            .filter(|f| f.is_filterable())
            .map(|f| {
                (
                    f.name.clone(),
                    FilterDefinition {
                        field: f.name.clone(),
                        label: f.label.clone(),
                        widget: FilterWidget::Text,
                    },
                )
            })
            .collect();
        Self { filters }
    }

    pub fn get(&self, field: &str) -> Option<&FilterDefinition> {
        self.filters.get(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FilterDefinition> {
        self.filters.values()
    }

    /// Field name to widget kind, `"select"` or `"text"`.
    pub fn widget_kinds(&self) -> IndexMap<String, &'static str> {
        self.filters
            .iter()
            .map(|(name, def)| (name.clone(), def.widget.kind()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

/// Switch the named columns to select widgets whose options are the distinct
/// values stored in `records`, sorted.
///
/// Names without a filter are logged and returned; the table is otherwise
/// untouched by them.
pub fn mark_selectable<S: AsRef<str>>(
    table: &mut FilterTable,
    selectable: &[S],
    records: &[Record],
) -> Vec<String> {
    let mut ignored = Vec::new();
    for name in selectable.iter().map(AsRef::as_ref) {
        let Some(def) = table.filters.get_mut(name) else {
            warn!(field = name, "selectable column has no filter, ignoring");
            ignored.push(name.to_string());
            continue;
        };
        let options: BTreeSet<String> = records
            .iter()
            .filter_map(|r| r.value(name).ok().and_then(|v| v.as_text()))
            .filter(|text| !text.is_empty())
            .collect();
        def.widget = FilterWidget::Select {
            options: options.into_iter().collect(),
        };
    }
    ignored
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Filter values and sort order submitted from a list page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub filters: IndexMap<String, String>,
    #[serde(default)]
    pub sort: Option<(String, SortDirection)>,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.insert(field.into(), value.into());
        self
    }

    pub fn sort_by(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.sort = Some((field.into(), direction));
        self
    }

    /// Filter and sort `records`.
    ///
    /// Text widgets match a case-insensitive substring, select widgets an
    /// exact value. Blank filter values and fields without a filter are
    /// ignored. Sorting is stable and follows the field's sort kind.
    pub fn apply(&self, schema: &ResourceSchema, table: &FilterTable, records: Vec<Record>) -> Vec<Record> {
        let active: Vec<(&FilterDefinition, String)> = self
            .filters
            .iter()
            .filter(|(_, needle)| !needle.trim().is_empty())
            .filter_map(|(field, needle)| match table.get(field) {
                Some(def) => Some((def, needle.clone())),
                None => {
                    warn!(field = %field, "no filter for field, ignoring");
                    None
                }
            })
            .collect();

        let mut records: Vec<Record> = records
            .into_iter()
            .filter(|record| active.iter().all(|(def, needle)| matches(record, def, needle)))
            .collect();

        if let Some((field, direction)) = &self.sort {
            match schema.get_field(field).and_then(|f| f.effective_sort()) {
                Some(kind) => records.sort_by(|a, b| {
                    let ordering = compare(a, b, field, kind);
                    match direction {
                        SortDirection::Asc => ordering,
                        SortDirection::Desc => ordering.reverse(),
                    }
                }),
                None => warn!(field = %field, "field cannot be sorted, keeping order"),
            }
        }
        records
    }
}

fn matches(record: &Record, def: &FilterDefinition, needle: &str) -> bool {
    let Some(text) = record.value(&def.field).ok().and_then(|v| v.as_text()) else {
        return false;
    };
    match def.widget {
        FilterWidget::Text => text.to_lowercase().contains(&needle.to_lowercase()),
        FilterWidget::Select { .. } => text == needle,
    }
}

fn compare(a: &Record, b: &Record, field: &str, kind: SortKind) -> Ordering {
    match (a.value(field), b.value(field)) {
        (Ok(x), Ok(y)) => x.compare(y, kind),
        _ => Ordering::Equal,
    }
}

/// A resource's list page: its schema plus the columns offered as selects.
#[derive(Debug, Clone)]
pub struct ListView {
    schema: Arc<ResourceSchema>,
    selectable: Vec<String>,
}

impl ListView {
    pub fn new(schema: Arc<ResourceSchema>, selectable: Vec<String>) -> Self {
        Self { schema, selectable }
    }

    pub fn schema(&self) -> &Arc<ResourceSchema> {
        &self.schema
    }

    pub fn selectable(&self) -> &[String] {
        &self.selectable
    }

    /// The filter row for the given records.
    pub fn filter_table(&self, records: &[Record]) -> FilterTable {
        let mut table = FilterTable::for_schema(&self.schema);
        mark_selectable(&mut table, &self.selectable, records);
        table
    }

    /// Build the filter row, then filter and sort `records` through it.
    pub fn query(&self, records: Vec<Record>, query: &ListQuery) -> (FilterTable, Vec<Record>) {
        let table = self.filter_table(&records);
        let rows = query.apply(&self.schema, &table, records);
        (table, rows)
    }
}

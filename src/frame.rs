//! Row-oriented result sets
//!
//! A [`Table`] is a set of equally long [`Field`] columns. Link resolution
//! only ever reads from it, one row at a time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::{FieldConfig, LinkTemplate};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Field {field} has {got} rows, expected {expected}")]
    RowCountMismatch {
        field: String,
        expected: usize,
        got: usize,
    },
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Number,
    Time,
    Boolean,
    #[default]
    Other,
}

#[derive(Debug, Clone)]
pub struct Field {
    pub name: String,
    pub value_type: FieldType,
    pub values: Vec<serde_json::Value>,
    pub links: Vec<LinkTemplate>,
}

impl From<FieldConfig> for Field {
    fn from(config: FieldConfig) -> Self {
        let FieldConfig {
            name,
            value_type,
            values,
            links,
        } = config;
        Self {
            name,
            value_type,
            values,
            links,
        }
    }
}

impl Field {
    pub fn new(name: impl Into<String>, value_type: FieldType) -> Self {
        Self {
            name: name.into(),
            value_type,
            values: Vec::new(),
            links: Vec::new(),
        }
    }

    pub fn with_values<V: Into<serde_json::Value>>(
        mut self,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        self.values = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_links(mut self, links: impl IntoIterator<Item = LinkTemplate>) -> Self {
        self.links = links.into_iter().collect();
        self
    }

    /// Value at `row` rendered as text, or `None` when it is null or absent.
    pub fn display(&self, row: usize) -> Option<String> {
        self.values.get(row).and_then(render_value)
    }

    /// Whether the name can be referenced as `${name}` without the
    /// `__data.fields.` prefix.
    pub fn is_bare_identifier(&self) -> bool {
        let mut chars = self.name.chars();
        match chars.next() {
            Some(c) if c.is_ascii_alphabetic() || c == '_' => {
                chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
            }
            _ => false,
        }
    }
}

fn render_value(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}

#[derive(Debug, Clone)]
pub struct Table {
    fields: Vec<Field>,
    rows: usize,
}

impl Table {
    pub fn new(fields: Vec<Field>) -> Result<Self, Error> {
        let rows = fields.first().map(|field| field.values.len()).unwrap_or(0);
        if let Some(field) = fields.iter().find(|field| field.values.len() != rows) {
            return Err(Error::RowCountMismatch {
                field: field.name.clone(),
                expected: rows,
                got: field.values.len(),
            });
        }
        Ok(Self { fields, rows })
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn row_count(&self) -> usize {
        self.rows
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Identity check: `field` must be borrowed from this table.
    pub fn contains(&self, field: &Field) -> bool {
        self.fields.iter().any(|own| std::ptr::eq(own, field))
    }
}

/// The unparsed form of a time range, e.g. `now-1h` .. `now`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct RawTimeRange {
    pub from: String,
    pub to: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct TimeRange {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
    pub raw: RawTimeRange,
}

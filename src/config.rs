use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::frame::{self, FieldType, TimeRange};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to read document: {0}")]
    Read(std::io::Error),
    #[error("Failed to parse YAML document: {0}")]
    ParseYaml(serde_yaml::Error),
    #[error("Failed to parse JSON document: {0}")]
    ParseJson(serde_json::Error),
    #[error("Invalid frame: {0}")]
    Frame(frame::Error),
}

/// Extraction step run before an internal link is interpolated.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Transformation {
    Logfmt {
        #[serde(default)]
        field: Option<String>,
    },
    Regex {
        expression: String,
        #[serde(default)]
        field: Option<String>,
        #[serde(default, alias = "mapValue")]
        map_value: Option<String>,
    },
}

impl Transformation {
    /// Name of the field this step reads, if it overrides the link's own field.
    pub fn source_field(&self) -> Option<&str> {
        match self {
            Self::Logfmt { field } | Self::Regex { field, .. } => field.as_deref(),
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct InternalTarget {
    pub query: serde_json::Value,
    #[serde(alias = "datasourceUid")]
    pub datasource_uid: String,
    #[serde(alias = "datasourceName")]
    pub datasource_name: String,
    #[serde(default, alias = "panelsState")]
    pub panels_state: Option<serde_json::Value>,
    #[serde(default)]
    pub transformations: Vec<Transformation>,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
pub struct LinkTemplate {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub internal: Option<InternalTarget>,
}

impl LinkTemplate {
    pub fn external(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: Some(url.into()),
            internal: None,
        }
    }

    pub fn internal(title: impl Into<String>, target: InternalTarget) -> Self {
        Self {
            title: title.into(),
            url: None,
            internal: Some(target),
        }
    }

    /// The external URL, treating an empty string as unset.
    pub(crate) fn external_url(&self) -> Option<&str> {
        self.url.as_deref().filter(|url| !url.is_empty())
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct FieldConfig {
    pub name: String,
    #[serde(rename = "type", default)]
    pub value_type: FieldType,
    #[serde(default)]
    pub values: Vec<serde_json::Value>,
    #[serde(default)]
    pub links: Vec<LinkTemplate>,
}

fn default_explore_access() -> bool {
    true
}

/// A self-contained description of one result set and the context needed to
/// resolve its links.
#[derive(Deserialize, Debug, Clone)]
pub struct Document {
    pub range: TimeRange,
    #[serde(default = "default_explore_access")]
    pub explore_access: bool,
    #[serde(default)]
    pub variables: IndexMap<String, String>,
    pub fields: Vec<FieldConfig>,
}

impl Document {
    pub fn from_yaml(src: &str) -> Result<Self, Error> {
        serde_yaml::from_str(src).map_err(Error::ParseYaml)
    }

    pub fn from_json(src: &str) -> Result<Self, Error> {
        serde_json::from_str(src).map_err(Error::ParseJson)
    }

    /// Load a document, picking the syntax from the file extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let src = std::fs::read_to_string(path).map_err(Error::Read)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json(&src),
            _ => Self::from_yaml(&src),
        }
    }

    pub fn table(&self) -> Result<frame::Table, Error> {
        frame::Table::new(
            self.fields
                .iter()
                .cloned()
                .map(frame::Field::from)
                .collect(),
        )
        .map_err(Error::Frame)
    }
}

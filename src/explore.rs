//! Explore navigation payloads and their URL form.

use serde::Serialize;
use serde_json::{Map, Value, json};

use crate::frame::TimeRange;

/// Everything needed to open Explore on a data source, either by following
/// [`ExploreNavigation::url`] or by handing the payload to a navigator.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExploreNavigation {
    pub datasource_uid: String,
    pub query: Value,
    pub range: TimeRange,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub panels_state: Option<Value>,
}

impl ExploreNavigation {
    /// The `left` pane state as a JSON string, with keys in the order
    /// `range`, `datasource`, `queries`, `panelsState`.
    pub fn pane_state(&self) -> String {
        let mut state = Map::new();
        state.insert(
            "range".into(),
            json!({ "from": self.range.raw.from, "to": self.range.raw.to }),
        );
        state.insert("datasource".into(), self.datasource_uid.clone().into());
        state.insert("queries".into(), json!([self.query]));
        if let Some(panels_state) = &self.panels_state {
            state.insert("panelsState".into(), panels_state.clone());
        }
        Value::Object(state).to_string()
    }

    pub fn url(&self) -> String {
        format!("/explore?left={}", urlencoding::encode(&self.pane_state()))
    }
}

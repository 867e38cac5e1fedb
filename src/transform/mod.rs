//! Value extraction for internal links
//!
//! Each [`Transformation`] reads one field of the current row and produces
//! named bindings. Steps run in declaration order and a later step overwrites
//! any binding an earlier step produced under the same name.

pub mod logfmt;
pub mod pattern;

use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::{
    config::Transformation,
    frame::{Field, Table},
    scope::Binding,
};

pub fn run_pipeline(
    transformations: &[Transformation],
    table: &Table,
    target: &Field,
    row: usize,
) -> Result<IndexMap<String, Binding>, fancy_regex::Error> {
    let mut bindings = IndexMap::new();
    for transformation in transformations {
        let source = match transformation.source_field() {
            Some(name) => match table.field(name) {
                Some(field) => field,
                None => {
                    debug!(field = name, "transformation source field not found");
                    continue;
                }
            },
            None => target,
        };
        let Some(value) = source.display(row) else {
            trace!(field = %source.name, row, "transformation source value is null");
            continue;
        };
        match transformation {
            Transformation::Logfmt { .. } => {
                bindings.extend(
                    logfmt::parse(&value)
                        .into_iter()
                        .map(|(key, value)| (key, Binding::Value(value))),
                );
            }
            Transformation::Regex {
                expression,
                map_value,
                ..
            } => {
                let name = map_value.as_deref().unwrap_or(&source.name);
                bindings.extend(pattern::extract(expression, name, &value)?);
            }
        }
    }
    Ok(bindings)
}

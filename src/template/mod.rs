//! `${...}` template substitution
//!
//! Templates are plain strings with placeholders such as `${msg}` or
//! `${__data.fields.flux-dimensions:percentencode}`. A placeholder whose name
//! has no binding renders as the empty string; one whose binding is a
//! missing row value makes the whole interpolation fail with [`MissingValue`].

pub mod parser;

use parser::{Format, Segment};

use crate::scope::{Binding, Scope};

#[derive(Debug, thiserror::Error)]
#[error("Template variable {0} refers to a missing value")]
pub struct MissingValue(pub String);

fn apply_format(value: &str, format: Format, out: &mut String) {
    match format {
        Format::Raw => out.push_str(value),
        Format::PercentEncode => out.push_str(&urlencoding::encode(value)),
        Format::Json => out.push_str(&serde_json::Value::from(value).to_string()),
    }
}

pub fn interpolate_str(template: &str, scope: &Scope<'_>) -> Result<String, MissingValue> {
    let mut out = String::with_capacity(template.len());
    for segment in parser::parse(template) {
        match segment {
            Segment::Text(text) => out.push_str(text),
            Segment::Variable { name, format } => match scope.get(name) {
                Some(Binding::Value(value)) => apply_format(&value, format, &mut out),
                Some(Binding::Missing) => return Err(MissingValue(name.to_owned())),
                None => {}
            },
        }
    }
    Ok(out)
}

/// Interpolate every string inside a JSON-like payload. Object keys and
/// non-string scalars are left untouched.
pub fn interpolate_value(
    value: &serde_json::Value,
    scope: &Scope<'_>,
) -> Result<serde_json::Value, MissingValue> {
    use serde_json::Value;
    Ok(match value {
        Value::String(s) => Value::String(interpolate_str(s, scope)?),
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| interpolate_value(item, scope))
                .collect::<Result<_, _>>()?,
        ),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, item)| Ok((key.clone(), interpolate_value(item, scope)?)))
                .collect::<Result<_, MissingValue>>()?,
        ),
        other => other.clone(),
    })
}

use fancy_regex::Regex;
use indexmap::IndexMap;

use crate::scope::Binding;

/// Apply `expression` to `value`.
///
/// Named groups bind under their own names, and a named group that did not
/// take part in the match binds [`Binding::Missing`]. Without named groups the
/// first group (or the whole match) binds under `fallback_name`, and nothing
/// is bound when the expression does not match.
///
/// Look-around is supported, so one expression can pick named values out of
/// a line regardless of their order.
pub fn extract(
    expression: &str,
    fallback_name: &str,
    value: &str,
) -> Result<IndexMap<String, Binding>, fancy_regex::Error> {
    let regex = Regex::new(expression)?;
    let captures = regex.captures(value)?;
    let names = regex.capture_names().flatten().collect::<Vec<_>>();

    if !names.is_empty() {
        return Ok(names
            .into_iter()
            .map(|name| {
                let binding = captures
                    .as_ref()
                    .and_then(|captures| captures.name(name))
                    .map(|m| m.as_str().to_owned());
                (name.to_owned(), Binding::from(binding))
            })
            .collect());
    }

    let mut bindings = IndexMap::new();
    if let Some(m) = captures.and_then(|captures| captures.get(1).or_else(|| captures.get(0))) {
        bindings.insert(
            fallback_name.to_owned(),
            Binding::Value(m.as_str().to_owned()),
        );
    }
    Ok(bindings)
}

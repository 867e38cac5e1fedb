//! Substitution environment
//!
//! A [`Scope`] layers row-derived and extracted bindings over a read-only
//! [`VariableSource`] of global variables. Local bindings always win.

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::frame::{Field, Table};

/// Provider of variables that are not derived from row data, such as
/// dashboard-level variables.
pub trait VariableSource: Send + Sync {
    fn resolve(&self, name: &str) -> Option<String>;
}

/// A source with no variables at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoVariables;

impl VariableSource for NoVariables {
    fn resolve(&self, _: &str) -> Option<String> {
        None
    }
}

impl VariableSource for IndexMap<String, String> {
    fn resolve(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl VariableSource for HashMap<String, String> {
    fn resolve(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding {
    Value(String),
    /// The name is known but its row value is null, or a capture group that
    /// should have produced it did not participate in the match.
    Missing,
}

impl From<Option<String>> for Binding {
    fn from(value: Option<String>) -> Self {
        value.map_or(Self::Missing, Self::Value)
    }
}

pub struct Scope<'v> {
    bindings: IndexMap<String, Binding>,
    globals: &'v dyn VariableSource,
}

impl<'v> Scope<'v> {
    pub fn new(globals: &'v dyn VariableSource) -> Self {
        Self {
            bindings: IndexMap::new(),
            globals,
        }
    }

    /// Bind every field of `table` at `row`, plus `__targetField` for the
    /// field a link is declared on.
    pub fn for_row(
        globals: &'v dyn VariableSource,
        table: &Table,
        target: &Field,
        row: usize,
    ) -> Self {
        let mut scope = Self::new(globals);
        for field in table.fields() {
            let binding = Binding::from(field.display(row));
            if field.is_bare_identifier() {
                scope.bind(field.name.clone(), binding.clone());
            }
            scope.bind(format!("__data.fields.{}", field.name), binding);
        }
        scope.bind("__targetField", target.display(row).into());
        scope
    }

    pub fn bind(&mut self, name: impl Into<String>, binding: Binding) {
        self.bindings.insert(name.into(), binding);
    }

    pub fn extend(&mut self, bindings: impl IntoIterator<Item = (String, Binding)>) {
        self.bindings.extend(bindings);
    }

    pub fn get(&self, name: &str) -> Option<Binding> {
        self.bindings
            .get(name)
            .cloned()
            .or_else(|| self.globals.resolve(name).map(Binding::Value))
    }
}

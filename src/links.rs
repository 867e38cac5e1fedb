//! Link resolution
//!
//! Turns the link templates declared on a field into clickable links for one
//! row. External links pass through with a generated title; internal links
//! are interpolated against the row and point into Explore.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::{
    config::{InternalTarget, LinkTemplate},
    explore::ExploreNavigation,
    frame::{Field, Table, TimeRange},
    scope::{NoVariables, Scope, VariableSource},
    template::{self, MissingValue},
    transform,
};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Row {row} is out of range for a table with {rows} rows")]
    OutOfRange { row: usize, rows: usize },
    #[error("Field {0} does not belong to the table")]
    FieldNotInTable(String),
}

/// Failure of a single template. Never escapes a batch: the template just
/// contributes no link.
#[derive(Debug, thiserror::Error)]
pub enum LinkError {
    #[error("Malformed pattern: {0}")]
    MalformedPattern(#[from] fancy_regex::Error),
    #[error(transparent)]
    MissingBinding(#[from] MissingValue),
}

/// Decides whether the current user may open internal links.
pub trait AccessControl: Send + Sync {
    fn can_navigate_internally(&self) -> bool;
}

impl AccessControl for bool {
    fn can_navigate_internally(&self) -> bool {
        *self
    }
}

/// Receives internal navigation requests, e.g. to open a split view instead
/// of following the link's URL.
pub trait Navigator: Send + Sync {
    fn navigate(&self, navigation: &ExploreNavigation);
}

impl<F> Navigator for F
where
    F: Fn(&ExploreNavigation) + Send + Sync,
{
    fn navigate(&self, navigation: &ExploreNavigation) {
        self(navigation)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LinkTarget {
    #[serde(rename = "_blank")]
    Blank,
    #[serde(rename = "_self")]
    Current,
}

pub struct ResolvedLink<'a> {
    pub title: String,
    pub href: String,
    pub target: LinkTarget,
    pub origin: &'a Field,
    /// Payload of an internal link; `href` is derived from it.
    pub navigation: Option<ExploreNavigation>,
    navigator: Option<Arc<dyn Navigator>>,
}

impl std::fmt::Debug for ResolvedLink<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedLink")
            .field("title", &self.title)
            .field("href", &self.href)
            .field("target", &self.target)
            .field("origin", &self.origin.name)
            .field("navigation", &self.navigation)
            .finish_non_exhaustive()
    }
}

impl ResolvedLink<'_> {
    pub fn new_tab(&self) -> bool {
        self.target == LinkTarget::Blank
    }

    pub fn has_action(&self) -> bool {
        self.navigator.is_some() && self.navigation.is_some()
    }

    /// Hand the internal navigation payload to the navigator. Returns whether
    /// a navigator was called; callers follow `href` otherwise.
    pub fn activate(&self) -> bool {
        match (&self.navigator, &self.navigation) {
            (Some(navigator), Some(navigation)) => {
                navigator.navigate(navigation);
                true
            }
            _ => false,
        }
    }
}

fn hostname(url: &str) -> String {
    url::Url::parse(url)
        .ok()
        .and_then(|url| url.host_str().map(ToString::to_string))
        .unwrap_or_else(|| url.to_owned())
}

pub struct LinkResolver<'c> {
    access: &'c dyn AccessControl,
    variables: &'c dyn VariableSource,
    navigator: Option<Arc<dyn Navigator>>,
}

impl<'c> LinkResolver<'c> {
    pub fn new(access: &'c dyn AccessControl) -> Self {
        Self {
            access,
            variables: &NoVariables,
            navigator: None,
        }
    }

    pub fn with_variables(self, variables: &'c dyn VariableSource) -> Self {
        Self { variables, ..self }
    }

    pub fn with_navigator(self, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            navigator: Some(navigator),
            ..self
        }
    }

    /// Resolve every link template of `field` for `row`, in declaration order.
    pub fn resolve<'t>(
        &self,
        field: &'t Field,
        row: usize,
        table: &Table,
        range: &TimeRange,
    ) -> Result<Vec<ResolvedLink<'t>>, Error> {
        if !table.contains(field) {
            return Err(Error::FieldNotInTable(field.name.clone()));
        }
        if row >= table.row_count() {
            return Err(Error::OutOfRange {
                row,
                rows: table.row_count(),
            });
        }
        let internal_allowed = self.access.can_navigate_internally();

        let links = field
            .links
            .iter()
            .enumerate()
            .filter_map(|(index, link)| {
                let resolved =
                    self.resolve_template(link, internal_allowed, field, row, table, range);
                match resolved {
                    Ok(resolved) => resolved,
                    Err(LinkError::MalformedPattern(e)) => {
                        warn!(field = %field.name, index, %e, "malformed link pattern");
                        None
                    }
                    Err(LinkError::MissingBinding(e)) => {
                        debug!(field = %field.name, index, row, %e, "link suppressed");
                        None
                    }
                }
            })
            .inspect(|link| trace!(title = %link.title, href = %link.href, "resolved link"))
            .collect();
        Ok(links)
    }

    fn resolve_template<'t>(
        &self,
        link: &LinkTemplate,
        internal_allowed: bool,
        field: &'t Field,
        row: usize,
        table: &Table,
        range: &TimeRange,
    ) -> Result<Option<ResolvedLink<'t>>, LinkError> {
        if let Some(url) = link.external_url() {
            let title = if link.title.is_empty() {
                hostname(url)
            } else {
                link.title.clone()
            };
            return Ok(Some(ResolvedLink {
                title,
                href: url.to_owned(),
                target: LinkTarget::Blank,
                origin: field,
                navigation: None,
                navigator: None,
            }));
        }
        let Some(internal) = &link.internal else {
            return Ok(None);
        };
        if !internal_allowed {
            debug!(field = %field.name, "internal link skipped without explore access");
            return Ok(None);
        }
        let navigation = self.interpolate_internal(internal, field, row, table, range)?;
        let title = if link.title.is_empty() {
            internal.datasource_name.clone()
        } else {
            link.title.clone()
        };
        Ok(Some(ResolvedLink {
            title,
            href: navigation.url(),
            target: LinkTarget::Current,
            origin: field,
            navigation: Some(navigation),
            navigator: self.navigator.clone(),
        }))
    }

    fn interpolate_internal(
        &self,
        internal: &InternalTarget,
        field: &Field,
        row: usize,
        table: &Table,
        range: &TimeRange,
    ) -> Result<ExploreNavigation, LinkError> {
        let mut scope = Scope::for_row(self.variables, table, field, row);
        scope.extend(transform::run_pipeline(
            &internal.transformations,
            table,
            field,
            row,
        )?);
        let query = template::interpolate_value(&internal.query, &scope)?;
        let panels_state = internal
            .panels_state
            .as_ref()
            .map(|state| template::interpolate_value(state, &scope))
            .transpose()?;
        Ok(ExploreNavigation {
            datasource_uid: internal.datasource_uid.clone(),
            query,
            range: range.clone(),
            panels_state,
        })
    }
}

/// Resolve the links of `field` at `row` without global variables.
pub fn resolve_links<'t>(
    field: &'t Field,
    row: usize,
    table: &Table,
    range: &TimeRange,
    can_navigate_internally: bool,
    navigator: Option<Arc<dyn Navigator>>,
) -> Result<Vec<ResolvedLink<'t>>, Error> {
    let resolver = LinkResolver::new(&can_navigate_internally);
    let resolver = match navigator {
        Some(navigator) => resolver.with_navigator(navigator),
        None => resolver,
    };
    resolver.resolve(field, row, table, range)
}

pub mod config;
pub mod explore;
pub mod frame;
pub mod links;
pub mod scope;
pub mod template;
pub mod transform;

#[cfg(test)]
mod tests;

pub use explore::ExploreNavigation;
pub use frame::{Field, FieldType, Table, TimeRange};
pub use links::{AccessControl, Error, LinkResolver, Navigator, ResolvedLink, resolve_links};
pub use scope::VariableSource;

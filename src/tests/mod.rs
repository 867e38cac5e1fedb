use crate::{
    config::Document,
    frame::Table,
    links::{LinkResolver, ResolvedLink},
};

mod explore;
mod transformations;

fn load_document(path: &str) -> (Document, Table) {
    let document = Document::load(path).unwrap();
    let table = document.table().unwrap();
    (document, table)
}

fn resolve<'t>(
    document: &Document,
    table: &'t Table,
    field: &str,
    row: usize,
) -> Vec<ResolvedLink<'t>> {
    let field = table.field(field).unwrap();
    LinkResolver::new(&document.explore_access)
        .with_variables(&document.variables)
        .resolve(field, row, table, &document.range)
        .unwrap()
}

fn hrefs(links: &[ResolvedLink<'_>]) -> Vec<String> {
    links.iter().map(|link| link.href.clone()).collect()
}

/// The browser-side `/explore?left=` form of a pane state.
fn explore_href(state: &str) -> String {
    format!("/explore?left={}", urlencoding::encode(state))
}

fn query_href(query: &str) -> String {
    explore_href(&format!(
        r#"{{"range":{{"from":"now-1h","to":"now"}},"datasource":"uid_1","queries":[{{"query":"{query}"}}]}}"#
    ))
}

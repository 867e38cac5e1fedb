use serde_json::json;

use super::{explore_href, hrefs, load_document, query_href, resolve};
use crate::links::LinkResolver;

const DOCUMENT: &str = "src/tests/explore/links.yaml";

#[test]
fn external_and_internal_links() {
    let (document, table) = load_document(DOCUMENT);
    let links = resolve(&document, &table, "flux-dimensions", 0);
    assert_eq!(
        links.iter().map(|link| link.title.as_str()).collect::<Vec<_>>(),
        ["external", "regionalhost", "test_ds", "test_ds"]
    );
    assert_eq!(
        hrefs(&links),
        [
            "http://regionalhost".to_string(),
            "http://regionalhost".to_string(),
            query_href("query_1-foo"),
            query_href("query_1-foo"),
        ]
    );
    assert!(links[0].new_tab());
    assert!(!links[2].new_tab());
    assert!(links.iter().all(|link| link.origin.name == "flux-dimensions"));
}

#[test]
fn null_row_suppresses_only_internal_links() {
    let (document, table) = load_document(DOCUMENT);
    let links = resolve(&document, &table, "flux-dimensions", 1);
    assert_eq!(
        hrefs(&links),
        ["http://regionalhost".to_string(), "http://regionalhost".to_string()]
    );
}

#[test]
fn field_name_variables() {
    let (document, table) = load_document(DOCUMENT);
    let links = resolve(&document, &table, "fluxDimensions", 0);
    assert_eq!(hrefs(&links), [query_href("query_1-foo-foo2")]);
    assert!(resolve(&document, &table, "fluxDimensions", 1).is_empty());
}

#[test]
fn panels_state_and_global_variables() {
    let (document, table) = load_document(DOCUMENT);
    let links = resolve(&document, &table, "traceID", 1);
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].title, "Open trace");
    assert_eq!(
        links[0].href,
        explore_href(
            r#"{"range":{"from":"now-1h","to":"now"},"datasource":"uid_1","queries":[{"query":"0123","limit":20}],"panelsState":{"trace":{"spanId":"0123","origin":"foo"}}}"#
        )
    );
    let navigation = links[0].navigation.as_ref().unwrap();
    assert_eq!(navigation.query, json!({ "query": "0123", "limit": 20 }));
    assert_eq!(navigation.range, document.range);
}

#[test]
fn no_internal_links_without_access() {
    let (document, table) = load_document(DOCUMENT);
    let denied = false;
    let resolver = LinkResolver::new(&denied).with_variables(&document.variables);
    for name in ["fluxDimensions", "traceID"] {
        let links = resolver
            .resolve(table.field(name).unwrap(), 0, &table, &document.range)
            .unwrap();
        assert!(links.is_empty(), "{name} should have no links");
    }
    let links = resolver
        .resolve(table.field("flux-dimensions").unwrap(), 0, &table, &document.range)
        .unwrap();
    assert_eq!(links.len(), 2);
}

use super::{hrefs, load_document, query_href, resolve};

const DOCUMENT: &str = "src/tests/transformations/links.yaml";

#[test]
fn logfmt_then_regex() {
    let (document, table) = load_document(DOCUMENT);
    let rows = [0, 1].map(|row| resolve(&document, &table, "msg", row));
    assert_eq!(
        hrefs(&rows[0]),
        [
            query_href("http_requests{app=foo env=dev}"),
            query_href("http_requests{app=foo isOnline=true}"),
        ]
    );
    assert_eq!(
        hrefs(&rows[1]),
        [
            query_href("http_requests{app=bar env=prod}"),
            query_href("http_requests{app=bar isOnline=false}"),
        ]
    );
}

#[test]
fn last_unnamed_regex_wins() {
    let (document, table) = load_document(DOCUMENT);
    assert_eq!(
        hrefs(&resolve(&document, &table, "pairs", 0)),
        [query_href("http_requests{env=banana}")]
    );
    assert_eq!(
        hrefs(&resolve(&document, &table, "pairs", 1)),
        [query_href("http_requests{env=apple}")]
    );
}

#[test]
fn transformation_reads_named_field() {
    let (document, table) = load_document(DOCUMENT);
    assert_eq!(
        hrefs(&resolve(&document, &table, "fieldWithLink", 0)),
        [query_href("http_requests{app=transform}")]
    );
    assert_eq!(
        hrefs(&resolve(&document, &table, "fieldWithLink", 1)),
        [query_href("http_requests{app=transform2}")]
    );
}

#[test]
fn named_capture_groups() {
    let (document, table) = load_document(DOCUMENT);
    let links = resolve(&document, &table, "line", 0);
    assert_eq!(
        hrefs(&links),
        [
            query_href("http_requests{app=loki env=prod}"),
            query_href("http_requests{app=loki}"),
            "https://grafana.com/docs".to_string(),
        ]
    );
}

#[test]
fn unmatched_group_suppresses_only_links_that_use_it() {
    let (document, table) = load_document(DOCUMENT);
    let links = resolve(&document, &table, "line", 1);
    assert_eq!(
        hrefs(&links),
        [
            query_href("http_requests{app=grafana}"),
            "https://grafana.com/docs".to_string(),
        ]
    );
    assert_eq!(links[1].title, "docs");
}

#[test]
fn named_groups_in_any_order() {
    let (document, table) = load_document("src/tests/transformations/named_groups.yaml");
    let rows = [0, 1, 2].map(|row| hrefs(&resolve(&document, &table, "msg", row)));
    assert_eq!(
        rows,
        [
            vec![query_href("http_requests{app=loki env=prod}")],
            vec![query_href("http_requests{app=grafana env=dev}")],
            vec![query_href("http_requests{app=grafana env=prod}")],
        ]
    );
}

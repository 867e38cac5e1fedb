use std::{ops::Range, path::PathBuf};

use anyhow::{Context, bail};
use clap::Parser;
use explore_links::{ExploreNavigation, LinkResolver, ResolvedLink, config::Document};
use serde::Serialize;
use tracing::error;

#[derive(Parser)]
struct Opts {
    #[clap(short, long, env = "EXPLORE_LINKS_CONFIG")]
    config: PathBuf,
    /// Only resolve links declared on this field
    #[clap(short, long)]
    field: Option<String>,
    /// Only resolve links for this row
    #[clap(short, long)]
    row: Option<usize>,
}

#[derive(Serialize)]
struct LinkView<'a> {
    title: &'a str,
    href: &'a str,
    target: explore_links::links::LinkTarget,
    #[serde(skip_serializing_if = "Option::is_none")]
    navigation: Option<&'a ExploreNavigation>,
}

impl<'a> From<&'a ResolvedLink<'_>> for LinkView<'a> {
    fn from(link: &'a ResolvedLink<'_>) -> Self {
        Self {
            title: &link.title,
            href: &link.href,
            target: link.target,
            navigation: link.navigation.as_ref(),
        }
    }
}

#[derive(Serialize)]
struct RowLinks<'a> {
    field: &'a str,
    row: usize,
    links: Vec<LinkView<'a>>,
}

fn selected_rows(row: Option<usize>, rows: usize) -> anyhow::Result<Range<usize>> {
    match row {
        Some(row) if row < rows => Ok(row..row + 1),
        Some(row) => bail!("row {row} is out of range for a table with {rows} rows"),
        None => Ok(0..rows),
    }
}

fn run(opts: Opts) -> anyhow::Result<()> {
    let document = Document::load(&opts.config)
        .with_context(|| format!("load link document from {}", opts.config.display()))?;
    let table = document.table().with_context(|| "build table")?;
    if let Some(name) = &opts.field {
        if table.field(name).is_none() {
            bail!("no field named {name}");
        }
    }
    let rows = selected_rows(opts.row, table.row_count())?;
    let resolver = LinkResolver::new(&document.explore_access).with_variables(&document.variables);

    let fields = table
        .fields()
        .iter()
        .filter(|field| opts.field.as_ref().is_none_or(|name| name == &field.name))
        .filter(|field| !field.links.is_empty());
    for field in fields {
        for row in rows.clone() {
            let links = resolver
                .resolve(field, row, &table, &document.range)
                .with_context(|| format!("resolve links of {} at row {row}", field.name))?;
            let report = RowLinks {
                field: &field.name,
                row,
                links: links.iter().map(LinkView::from).collect(),
            };
            println!("{}", serde_json::to_string(&report)?);
        }
    }
    Ok(())
}

fn main() {
    let opts = Opts::parse();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
    if let Err(e) = run(opts) {
        error!(?e, "critical error");
        std::process::exit(1);
    }
}

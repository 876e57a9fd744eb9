//! Loading a corpus of HTML pages from a directory.

use crate::{LinkGraph, Result};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use tracing::{debug, info};
use walkdir::WalkDir;

lazy_static! {
    static ref HREF: Regex = Regex::new(r#"<a\s+(?:[^>]*?)href="([^"]*)""#).expect("Invalid regex");
}

/// Targets of every `<a ... href="...">` in `html`.
pub fn parse_links(html: &str) -> BTreeSet<String> {
    HREF.captures_iter(html)
        .filter_map(|cap| cap.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Builds the link graph of the `*.html` files directly inside `dir`.
///
/// A page is named after its file. Links to the page itself and links to
/// names outside the corpus are dropped.
pub fn crawl<P: AsRef<Path>>(dir: P) -> Result<LinkGraph> {
    let dir = dir.as_ref();
    let mut pages: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str() else {
            continue;
        };
        if !name.ends_with(".html") {
            continue;
        }
        let contents = std::fs::read_to_string(entry.path())?;
        let mut links = parse_links(&contents);
        links.remove(name);
        debug!(page = name, links = links.len(), "parsed");
        pages.insert(name.to_string(), links);
    }

    let names: BTreeSet<String> = pages.keys().cloned().collect();
    for links in pages.values_mut() {
        links.retain(|l| names.contains(l));
    }
    let graph = LinkGraph::new(pages)?;
    info!(
        dir = %dir.display(),
        pages = graph.page_count(),
        links = graph.link_count(),
        "loaded corpus"
    );
    Ok(graph)
}

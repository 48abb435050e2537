use crate::{Error, LinkGraph, Page, Result};
use regex::Regex;
use std::{collections::BTreeSet, path::Path, sync::OnceLock};
use tracing::{debug, instrument};

fn href() -> &'static Regex {
    static HREF: OnceLock<Regex> = OnceLock::new();
    HREF.get_or_init(|| {
        Regex::new(r#"<a\s+(?:[^>]*?)href="([^"]*)""#).expect("href pattern compiles")
    })
}

/// Targets of every `<a href="...">` in a page, unfiltered.
pub fn extract_links(html: &str) -> BTreeSet<Page> {
    href()
        .captures_iter(html)
        .map(|c| c[1].to_owned())
        .collect()
}

/// Builds the link graph of every `*.html` file directly inside `dir`.
///
/// Pages are named by file name. Links to anything that is not one of those
/// files are dropped, as are self-links.
#[instrument(skip_all, fields(dir = %dir.as_ref().display()))]
pub fn crawl(dir: impl AsRef<Path>) -> Result<LinkGraph> {
    let dir = dir.as_ref();
    let mut pages = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(|e| Error::io(dir, e))? {
        let entry = entry.map_err(|e| Error::io(dir, e))?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if !name.ends_with(".html") {
            continue;
        }
        let path = entry.path();
        let html = std::fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;
        let links = extract_links(&html);
        debug!(page = %name, links = links.len(), "parsed");
        pages.push((name, links));
    }
    LinkGraph::from_corpus_links(pages)
}

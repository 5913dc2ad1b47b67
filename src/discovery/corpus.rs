//! HTML corpus crawling.
//!
//! A corpus is a flat directory of `.html` pages. Each page's links are the
//! `href` targets of its anchor tags, kept only when they name another page
//! of the same corpus. Subdirectories and non-HTML files are ignored.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use ignore::WalkBuilder;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::error::DiscoveryError;
use crate::types::LinkGraph;

static ANCHOR_HREF: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<a\s+(?:[^>]*?)href="([^"]*)""#).expect("Invalid anchor regex")
});

/// Read every `.html` page in `directory` and build its link graph.
pub fn crawl(directory: &Path) -> Result<LinkGraph, DiscoveryError> {
    if !directory.is_dir() {
        return Err(DiscoveryError::MissingCorpus(directory.to_path_buf()));
    }

    let walker = WalkBuilder::new(directory)
        .standard_filters(false)
        .max_depth(Some(1))
        .follow_links(false)
        .build();

    let mut pages: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for entry in walker {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !is_html(name) {
            continue;
        }

        let contents = std::fs::read_to_string(path).map_err(|source| DiscoveryError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut links = extract_links(&contents);
        links.remove(name);
        debug!(page = name, links = links.len(), "parsed page");
        pages.insert(name.to_string(), links);
    }

    // Drop links that leave the corpus
    let known: BTreeSet<String> = pages.keys().cloned().collect();
    for links in pages.values_mut() {
        links.retain(|link| known.contains(link));
    }

    debug!(dir = %directory.display(), pages = pages.len(), "crawled corpus");
    Ok(LinkGraph::from_links(pages)?)
}

/// All `href` targets of anchor tags in `html`.
pub fn extract_links(html: &str) -> BTreeSet<String> {
    ANCHOR_HREF
        .captures_iter(html)
        .map(|cap| cap[1].to_string())
        .collect()
}

fn is_html(name: &str) -> bool {
    name.ends_with(".html")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn page(links: &[&str]) -> String {
        let anchors: String = links
            .iter()
            .map(|l| format!(r#"<li><a href="{l}">{l}</a></li>"#))
            .collect();
        format!("<!DOCTYPE html><html><body><ul>{anchors}</ul></body></html>")
    }

    #[test]
    fn test_extract_links() {
        let html = r#"<a href="1.html">one</a> <a class="x" href="2.html">two</a>
            <a href="1.html">again</a> <link href="style.css">"#;
        let links = extract_links(html);
        assert_eq!(
            links,
            BTreeSet::from(["1.html".to_string(), "2.html".to_string()])
        );
    }

    #[test]
    fn test_crawl_builds_graph() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("1.html"), page(&["2.html"])).unwrap();
        fs::write(dir.path().join("2.html"), page(&["1.html", "3.html"])).unwrap();
        fs::write(dir.path().join("3.html"), page(&[])).unwrap();

        let graph = crawl(dir.path()).unwrap();
        assert_eq!(graph.len(), 3);
        assert_eq!(graph.links("2.html").unwrap(), BTreeSet::from(["1.html", "3.html"]));
        assert!(graph.is_dangling(graph.index_of("3.html").unwrap()));
    }

    #[test]
    fn test_crawl_drops_self_and_outside_links() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("a.html"),
            page(&["a.html", "b.html", "https://example.com", "missing.html"]),
        )
        .unwrap();
        fs::write(dir.path().join("b.html"), page(&[])).unwrap();
        fs::write(dir.path().join("notes.txt"), page(&["a.html"])).unwrap();

        let graph = crawl(dir.path()).unwrap();
        assert_eq!(graph.pages().collect::<Vec<_>>(), vec!["a.html", "b.html"]);
        assert_eq!(graph.links("a.html").unwrap(), BTreeSet::from(["b.html"]));
    }

    #[test]
    fn test_crawl_ignores_subdirectories() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested").join("x.html"), page(&[])).unwrap();
        fs::write(dir.path().join("top.html"), page(&["nested/x.html"])).unwrap();

        let graph = crawl(dir.path()).unwrap();
        assert_eq!(graph.len(), 1);
        assert_eq!(graph.link_count(), 0);
    }

    #[test]
    fn test_bare_html_name_is_a_page() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(".html"), page(&["a.html"])).unwrap();
        fs::write(dir.path().join("a.html"), page(&[])).unwrap();
        fs::write(dir.path().join("b.htm"), page(&[])).unwrap();

        let graph = crawl(dir.path()).unwrap();
        assert_eq!(graph.pages().collect::<Vec<_>>(), vec![".html", "a.html"]);
        assert_eq!(graph.links(".html").unwrap(), BTreeSet::from(["a.html"]));
    }

    #[test]
    fn test_missing_directory() {
        let dir = TempDir::new().unwrap();
        let err = crawl(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, DiscoveryError::MissingCorpus(_)));
    }
}

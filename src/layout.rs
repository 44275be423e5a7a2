//! Layout directive parser
//!
//! The layout directive describes the page hierarchy as a markdown-like
//! outline. The number of leading `#` is the depth of the page, the rest of
//! the line is its name:
//!
//! ```text
//! // site layout
//! # index
//! ## about
//! ## Logs
//! ### first-entry
//! ```
//!
//! `//` comment lines and blank lines are skipped. The first page must be at
//! depth one and is the root; every later page hangs below the closest
//! preceding page one level up.

use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Error, Result};
use crate::tree::{NodeId, PageTree};
use crate::utils::content_lines;

static LAYOUT_LINE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(#+)\s*(.*?)\s*$").expect("Invalid layout line regex"));

/// Build a page tree from layout directive text
pub fn parse_layout(source: &str) -> Result<PageTree> {
    let mut tree: Option<PageTree> = None;
    // (depth, node) of the most recent page at each depth along the current path
    let mut path: Vec<(usize, NodeId)> = Vec::new();

    for (line_no, raw) in content_lines(source).into_iter().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        let caps = LAYOUT_LINE_REGEX.captures(line).ok_or_else(|| {
            Error::layout_owned(format!(
                "Line {}: expected '#' followed by a page name, found '{}'",
                line_no + 1,
                line
            ))
        })?;
        let depth = caps[1].len();
        let name = &caps[2];
        if name.is_empty() {
            return Err(Error::layout_owned(format!(
                "Line {}: page name is missing",
                line_no + 1
            )));
        }

        match tree.as_mut() {
            None => {
                if depth != 1 {
                    return Err(Error::layout_owned(format!(
                        "Line {}: the first page '{}' must be declared at depth 1",
                        line_no + 1,
                        name
                    )));
                }
                let root_tree = PageTree::from_root(name);
                path.push((1, root_tree.root()));
                tree = Some(root_tree);
            }
            Some(tree) => {
                if depth == 1 {
                    return Err(Error::layout_owned(format!(
                        "Line {}: second root page '{}'",
                        line_no + 1,
                        name
                    )));
                }
                let deepest = path.last().map(|(d, _)| *d).unwrap_or(1);
                if depth > deepest + 1 {
                    return Err(Error::layout_owned(format!(
                        "Line {}: page '{}' skips from depth {} to {}",
                        line_no + 1,
                        name,
                        deepest,
                        depth
                    )));
                }

                path.retain(|(d, _)| *d < depth);
                let parent = path
                    .last()
                    .map(|(_, id)| *id)
                    .ok_or_else(|| Error::layout_static("Layout path lost its root"))?;
                let id = tree.add_child(parent, name)?;
                path.push((depth, id));
            }
        }
    }

    tree.ok_or_else(|| Error::layout_static("Layout declares no pages"))
}

/// Read and parse a layout directive file
pub fn parse_layout_file<P: AsRef<Path>>(path: P) -> Result<PageTree> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path).map_err(|e| {
        Error::layout_owned(format!(
            "Failed to read layout file '{}': {}",
            path.display(),
            e
        ))
    })?;
    let tree = parse_layout(&source)?;
    log::debug!(
        "Loaded layout '{}' with {} pages",
        path.display(),
        tree.len()
    );
    Ok(tree)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_layout() {
        let tree = parse_layout("# index\n## about\n## Logs\n").unwrap();
        let root = tree.root();

        assert_eq!(tree.name(root), "index");
        assert_eq!(tree.children(root).len(), 2);

        let about = tree.find("about").unwrap();
        assert_eq!(tree.parent(about), Some(root));
        let logs = tree.find("Logs").unwrap();
        assert_eq!(tree.parent(logs), Some(root));
    }

    #[test]
    fn test_parse_nested_layout_with_comments() {
        let source = "// layout\n# index\n\n## Logs\n### day-one\n### day-two\n## about\n";
        let tree = parse_layout(source).unwrap();

        let logs = tree.find("Logs").unwrap();
        let children: Vec<_> = tree
            .children(logs)
            .iter()
            .map(|&id| tree.name(id))
            .collect();
        assert_eq!(children, vec!["day-one", "day-two"]);

        let about = tree.find("about").unwrap();
        assert_eq!(tree.parent(about), Some(tree.root()));
    }

    #[test]
    fn test_page_name_whitespace_is_trimmed() {
        let tree = parse_layout("#   index  \n##about").unwrap();
        assert_eq!(tree.name(tree.root()), "index");
        assert!(tree.find("about").is_some());
    }

    #[test]
    fn test_empty_layout_is_error() {
        let err = parse_layout("// nothing here\n\n").unwrap_err();
        assert!(err.to_string().contains("no pages"));
    }

    #[test]
    fn test_second_root_is_error() {
        let err = parse_layout("# index\n# other").unwrap_err();
        assert!(err.to_string().contains("second root"));
    }

    #[test]
    fn test_depth_jump_is_error() {
        let err = parse_layout("# index\n### deep").unwrap_err();
        assert!(err.to_string().contains("skips from depth 1 to 3"));
    }

    #[test]
    fn test_first_page_not_root_is_error() {
        assert!(parse_layout("## about").is_err());
    }

    #[test]
    fn test_line_without_marker_is_error() {
        let err = parse_layout("# index\nabout").unwrap_err();
        assert!(matches!(err, Error::LayoutError(_)));
    }

    #[test]
    fn test_duplicate_name_is_error() {
        let err = parse_layout("# index\n## about\n## about").unwrap_err();
        assert!(err.to_string().contains("Duplicate page name"));
    }
}

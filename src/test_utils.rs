//! Test utilities for generated pages
//!
//! Generated pages are fragments of HTML; these helpers parse them with
//! `dom_query` so tests can check structure instead of exact bytes.

use dom_query::Document;

/// Normalize HTML for comparison by parsing and re-serializing
///
/// ```
/// use html_sitegen::test_utils::normalize_html;
///
/// let html1 = "<ul  class=\"sitemap\" ><li>about</li></ul>";
/// let html2 = "<ul class=\"sitemap\"><li>about</li></ul>";
///
/// assert_eq!(normalize_html(html1), normalize_html(html2));
/// ```
pub fn normalize_html(html: &str) -> String {
    let doc = Document::from(html);
    doc.html().trim().to_string()
}

/// Assert that two HTML strings are equivalent
///
/// Both sides are normalized first, so spacing inside tags does not matter.
#[macro_export]
macro_rules! assert_html_eq {
    ($left:expr, $right:expr) => {
        {
            let left_normalized = $crate::test_utils::normalize_html($left);
            let right_normalized = $crate::test_utils::normalize_html($right);

            if left_normalized != right_normalized {
                panic!(
                    "HTML assertion failed\n\nLeft (normalized):\n{}\n\nRight (normalized):\n{}\n\nOriginal left:\n{}\n\nOriginal right:\n{}",
                    left_normalized,
                    right_normalized,
                    $left,
                    $right
                );
            }
        }
    };
    ($left:expr, $right:expr, $($arg:tt)*) => {
        {
            let left_normalized = $crate::test_utils::normalize_html($left);
            let right_normalized = $crate::test_utils::normalize_html($right);

            if left_normalized != right_normalized {
                panic!(
                    "HTML assertion failed: {}\n\nLeft (normalized):\n{}\n\nRight (normalized):\n{}\n\nOriginal left:\n{}\n\nOriginal right:\n{}",
                    format!($($arg)*),
                    left_normalized,
                    right_normalized,
                    $left,
                    $right
                );
            }
        }
    };
}

/// Like `assert_html_eq!` but returns a bool instead of panicking
pub fn html_eq(html1: &str, html2: &str) -> bool {
    normalize_html(html1) == normalize_html(html2)
}

/// Text content of a page with whitespace collapsed
pub fn extract_text(html: &str) -> String {
    let doc = Document::from(html);
    let body = doc.select("body");

    let text = if !body.nodes().is_empty() {
        body.text()
    } else {
        doc.text()
    };

    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Trimmed text of every element matching a selector
pub fn extract_text_by_selector(html: &str, selector: &str) -> Vec<String> {
    let doc = Document::from(html);
    doc.select(selector)
        .nodes()
        .iter()
        .map(|node| node.text().trim().to_string())
        .collect()
}

/// Attribute values of the elements matching a selector
pub fn extract_attrs_by_selector(html: &str, selector: &str, attr: &str) -> Vec<String> {
    let doc = Document::from(html);
    doc.select(selector)
        .nodes()
        .iter()
        .filter_map(|node| node.attr(attr).map(|v| v.to_string()))
        .collect()
}

/// Link targets of a page, in document order
pub fn extract_links(html: &str) -> Vec<String> {
    extract_attrs_by_selector(html, "a", "href")
}

pub fn count_elements(html: &str, selector: &str) -> usize {
    let doc = Document::from(html);
    doc.select(selector).nodes().len()
}

pub fn has_element(html: &str, selector: &str) -> bool {
    count_elements(html, selector) > 0
}

//! Small helpers shared by the directive parsers and the renderer

use std::borrow::Cow;
use std::path::Path;

use crate::error::{Error, Result};

/// Prefix marking a comment line in content and directive files
pub const COMMENT_PREFIX: &str = "//";

/// Split text into lines, dropping `//` comment lines
pub fn content_lines(text: &str) -> Vec<&str> {
    text.lines()
        .filter(|line| !line.starts_with(COMMENT_PREFIX))
        .collect()
}

/// Read a file and return its non-comment lines
pub fn read_content_lines<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .map_err(|e| Error::io(format!("Failed to read '{}': {}", path.display(), e)))?;
    Ok(content_lines(&text).into_iter().map(String::from).collect())
}

/// Parse a non-negative nesting level
///
/// Surrounding whitespace is ignored; anything else that is not a plain
/// unsigned integer is rejected.
pub fn parse_level(value: &str) -> Option<usize> {
    value.trim().parse::<usize>().ok()
}

/// Check if a string is a valid template or function name
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// Escape HTML entities efficiently
pub fn escape_html_cow(input: &str) -> Cow<str> {
    if !input.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(input);
    }

    let mut result = String::with_capacity(input.len() + input.len() / 4);
    for ch in input.chars() {
        match ch {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(ch),
        }
    }

    Cow::Owned(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_lines_skip_comments() {
        let text = "// header comment\nfirst\n  // indented is kept\nsecond";
        assert_eq!(
            content_lines(text),
            vec!["first", "  // indented is kept", "second"]
        );
    }

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("0"), Some(0));
        assert_eq!(parse_level(" 3 "), Some(3));
        assert_eq!(parse_level("-1"), None);
        assert_eq!(parse_level("two"), None);
        assert_eq!(parse_level(""), None);
    }

    #[test]
    fn test_is_identifier() {
        assert!(is_identifier("Card"));
        assert!(is_identifier("_private"));
        assert!(is_identifier("with123numbers"));
        assert!(!is_identifier("1abc"));
        assert!(!is_identifier("with-dash"));
        assert!(!is_identifier(""));
    }

    #[test]
    fn test_escape_html_cow() {
        let result = escape_html_cow("simple text");
        assert!(matches!(result, Cow::Borrowed(_)));

        let result = escape_html_cow("text with <tags> & \"quotes\"");
        assert_eq!(result, "text with &lt;tags&gt; &amp; &quot;quotes&quot;");
        assert!(matches!(result, Cow::Owned(_)));
    }

    #[test]
    fn test_read_content_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.md");
        std::fs::write(&path, "// skip\nkeep\n").unwrap();
        assert_eq!(read_content_lines(&path).unwrap(), vec!["keep"]);

        let err = read_content_lines(dir.path().join("missing.md")).unwrap_err();
        assert!(matches!(err, Error::IoError(_)));
    }
}

//! Invocation scanning
//!
//! Content lines call templates and built-in functions with
//! `$Name(value1,value2,...)$`. The closing parenthesis is found by counting
//! nested parentheses, so a nested invocation can be passed as a value:
//!
//! ```text
//! $Card(Welcome,$Link(about.html,About)$)$
//! ```
//!
//! The values themselves are split on *every* comma between the outer
//! parentheses. A comma inside a nested invocation therefore splits the outer
//! argument list too; values needing commas have to be wrapped in a template.
//!
//! Text that already failed to expand (an unknown invocation or a malformed
//! opening) is wrapped in [`LITERAL_START`] and [`LITERAL_END`] by the engine.
//! The scanner passes such regions through as text, so an anomaly is reported
//! once even when its text is substituted into a template and scanned again.

use std::borrow::Cow;
use std::ops::Range;

/// Character opening and closing an invocation
pub const INVOCATION_SIGIL: char = '$';

/// Opens a region of settled literal text (a Unicode noncharacter)
pub const LITERAL_START: char = '\u{FDD0}';

/// Closes a region opened by [`LITERAL_START`]
pub const LITERAL_END: char = '\u{FDD1}';

/// One `$Name(...)$` occurrence in a line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation<'a> {
    name: &'a str,
    raw_args: &'a str,
    text: &'a str,
    span: Range<usize>,
}

impl<'a> Invocation<'a> {
    /// Template or function name
    pub fn name(&self) -> &'a str {
        self.name
    }

    /// Everything between the outer parentheses
    pub fn raw_args(&self) -> &'a str {
        self.raw_args
    }

    /// Argument values, split on every comma
    pub fn args(&self) -> Vec<&'a str> {
        split_args(self.raw_args)
    }

    /// The full invocation text, including the delimiters
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Byte range of the invocation within the scanned line
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }
}

/// A piece of a scanned line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Literal text
    Text(&'a str),
    /// A well-formed invocation
    Invocation(Invocation<'a>),
    /// `$Name(` without a balancing `)$`; only the opening is covered, the
    /// text after it is scanned as usual
    Malformed(&'a str),
}

/// Split a line into literal text, invocations and malformed openings
pub fn scan(line: &str) -> Vec<Segment<'_>> {
    let bytes = line.as_bytes();
    let mut segments = Vec::new();
    let mut text_start = 0;
    let mut pos = 0;

    while let Some(offset) = line[pos..].find([INVOCATION_SIGIL, LITERAL_START]) {
        let start = pos + offset;
        if line[start..].starts_with(LITERAL_START) {
            pos = literal_end(line, start);
            continue;
        }

        let name_end = identifier_end(bytes, start + 1);

        if name_end == start + 1 || bytes.get(name_end) != Some(&b'(') {
            pos = start + 1;
            continue;
        }

        if start > text_start {
            segments.push(Segment::Text(&line[text_start..start]));
        }

        let open = name_end;
        match matching_close(bytes, open) {
            Some(close) if bytes.get(close + 1) == Some(&b'$') => {
                let end = close + 2;
                segments.push(Segment::Invocation(Invocation {
                    name: &line[start + 1..name_end],
                    raw_args: &line[open + 1..close],
                    text: &line[start..end],
                    span: start..end,
                }));
                pos = end;
            }
            _ => {
                segments.push(Segment::Malformed(&line[start..open + 1]));
                pos = open + 1;
            }
        }
        text_start = pos;
    }

    if text_start < line.len() {
        segments.push(Segment::Text(&line[text_start..]));
    }
    segments
}

/// Whether the text contains at least one well-formed invocation
pub fn contains_invocation(line: &str) -> bool {
    scan(line)
        .iter()
        .any(|segment| matches!(segment, Segment::Invocation(_)))
}

/// Split raw argument text on every comma; empty text means no arguments
pub fn split_args(raw: &str) -> Vec<&str> {
    if raw.is_empty() {
        Vec::new()
    } else {
        raw.split(',').collect()
    }
}

/// Wrap text so later scans treat it as literal
pub fn mark_literal(text: &str) -> String {
    let mut marked = String::with_capacity(text.len() + 6);
    marked.push(LITERAL_START);
    marked.push_str(text);
    marked.push(LITERAL_END);
    marked
}

/// Remove literal markers, borrowing when there are none
pub fn strip_literal_marks(text: &str) -> Cow<'_, str> {
    if text.contains([LITERAL_START, LITERAL_END]) {
        Cow::Owned(
            text.chars()
                .filter(|c| *c != LITERAL_START && *c != LITERAL_END)
                .collect(),
        )
    } else {
        Cow::Borrowed(text)
    }
}

/// End (exclusive) of the marked region starting at `start`; an unbalanced
/// region runs to the end of the line
fn literal_end(line: &str, start: usize) -> usize {
    let mut depth = 0usize;
    for (i, c) in line[start..].char_indices() {
        if c == LITERAL_START {
            depth += 1;
        } else if c == LITERAL_END {
            depth -= 1;
            if depth == 0 {
                return start + i + c.len_utf8();
            }
        }
    }
    line.len()
}

/// End (exclusive) of the identifier starting at `from`, or `from` itself
/// when no identifier starts there
fn identifier_end(bytes: &[u8], from: usize) -> usize {
    match bytes.get(from) {
        Some(b) if b.is_ascii_alphabetic() || *b == b'_' => {}
        _ => return from,
    }
    let mut end = from + 1;
    while let Some(b) = bytes.get(end) {
        if b.is_ascii_alphanumeric() || *b == b'_' {
            end += 1;
        } else {
            break;
        }
    }
    end
}

/// Index of the `)` balancing the `(` at `open`
fn matching_close(bytes: &[u8], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, b) in bytes.iter().enumerate().skip(open) {
        match b {
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

//! Named templates with positional placeholders
//!
//! A template body marks substitution points with `$$name$$`, where `name`
//! is one of the template's declared arguments. The body is stored as literal
//! *slices* with one argument index between every two adjacent slices:
//!
//! ```text
//! body:    <div>$$left$$ - $$right$$</div>      args: [left, right]
//! slices:  ["<div>", " - ", "</div>"]
//! indices: [0, 1]
//! ```
//!
//! Markers enclosing a name that is not a declared argument are not
//! placeholders and stay in the output verbatim.

/// Delimiter around a placeholder name in a template body
pub const PLACEHOLDER_MARKER: &str = "$$";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    name: String,
    args: Vec<String>,
    slices: Vec<String>,
    arg_indices: Vec<usize>,
}

impl Template {
    /// Compile a template body against its declared argument names
    pub fn new<S: Into<String>>(name: S, args: Vec<String>, body: &str) -> Self {
        let (slices, arg_indices) = split_body(body, &args);
        Self {
            name: name.into(),
            args,
            slices,
            arg_indices,
        }
    }

    /// Build a template directly from its slices and argument indices
    ///
    /// Returns `None` unless there is exactly one more slice than indices.
    pub fn from_parts(slices: Vec<String>, arg_indices: Vec<usize>) -> Option<Self> {
        if slices.len() != arg_indices.len() + 1 {
            return None;
        }
        let arity = arg_indices.iter().max().map_or(0, |max| max + 1);
        Some(Self {
            name: String::new(),
            args: (0..arity).map(|i| format!("arg{}", i)).collect(),
            slices,
            arg_indices,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared argument names, in declaration order
    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn slices(&self) -> &[String] {
        &self.slices
    }

    pub fn arg_indices(&self) -> &[usize] {
        &self.arg_indices
    }

    /// Number of positional arguments the body actually reads
    pub fn arity(&self) -> usize {
        self.arg_indices.iter().max().map_or(0, |max| max + 1)
    }

    /// Substitute positional arguments into the body
    ///
    /// Missing arguments substitute as the empty string; extra ones are
    /// ignored.
    pub fn parse<S: AsRef<str>>(&self, input_args: &[S]) -> String {
        let capacity = self.slices.iter().map(String::len).sum::<usize>()
            + input_args.iter().map(|a| a.as_ref().len()).sum::<usize>();
        let mut result = String::with_capacity(capacity);

        result.push_str(&self.slices[0]);
        for (i, &index) in self.arg_indices.iter().enumerate() {
            if let Some(value) = input_args.get(index) {
                result.push_str(value.as_ref());
            }
            result.push_str(&self.slices[i + 1]);
        }
        result
    }
}

/// Split a body into literal slices and the argument index of every live
/// placeholder between them
fn split_body(body: &str, args: &[String]) -> (Vec<String>, Vec<usize>) {
    let marker_len = PLACEHOLDER_MARKER.len();
    let mut slices = Vec::new();
    let mut indices = Vec::new();
    // start of the literal run not yet emitted as a slice
    let mut cursor = 0;
    let mut open = body.find(PLACEHOLDER_MARKER);

    while let Some(start) = open {
        let name_start = start + marker_len;
        let Some(close) = find_from(body, name_start) else {
            break;
        };

        let name = &body[name_start..close];
        if let Some(index) = args.iter().position(|arg| arg == name) {
            slices.push(body[cursor..start].to_string());
            indices.push(index);
            cursor = close + marker_len;
            open = find_from(body, cursor);
        } else {
            // the closing marker never reopens a placeholder
            open = find_from(body, close + 1);
        }
    }

    slices.push(body[cursor..].to_string());
    (slices, indices)
}

fn find_from(haystack: &str, from: usize) -> Option<usize> {
    haystack
        .get(from..)
        .and_then(|rest| rest.find(PLACEHOLDER_MARKER))
        .map(|offset| from + offset)
}

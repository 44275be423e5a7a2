//! Recoverable anomalies collected during a generation run
//!
//! Nothing that goes wrong while expanding a line aborts the run. Each anomaly
//! is pushed to a [`Warnings`] sink exactly once, echoed through `log::warn!`,
//! and the affected text degrades (literal or empty output) instead.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use thiserror::Error;

use crate::error::Result;

/// A single recoverable anomaly
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// An invocation named a template that is not in the registry
    #[error("Unknown template '{name}'")]
    UnknownTemplate { name: String },

    /// A template was invoked while already being expanded
    #[error("Cyclic template reference: {}", .chain.join(" -> "))]
    CyclicReference { chain: Vec<String> },

    /// `$Name(` without a balancing `)$`
    #[error("Malformed invocation '{text}'")]
    MalformedInvocation { text: String },

    /// A built-in function received an argument it could not interpret
    #[error("Invalid argument '{value}' for {function}")]
    InvalidArgument { function: String, value: String },

    /// A built-in function referred to a page that is not in the layout
    #[error("Page '{name}' not found in layout")]
    MissingPage { name: String },

    /// A template name was declared more than once; the last one wins
    #[error("Template '{name}' redeclared, previous definition replaced")]
    DuplicateTemplate { name: String },

    /// A template was declared with the name of a built-in function
    #[error("Template '{name}' is shadowed by the built-in function of the same name")]
    ReservedName { name: String },

    /// The template directive could not be read; the run has no templates
    #[error("Templates not loaded from '{path}': {reason}")]
    UnreadableTemplates { path: String, reason: String },
}

/// Append-only sink of [`Warning`]s
#[derive(Debug, Default, Clone)]
pub struct Warnings {
    entries: Vec<Warning>,
}

impl Warnings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a warning
    pub fn push(&mut self, warning: Warning) {
        log::warn!("{}", warning);
        self.entries.push(warning);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Warning> {
        self.entries.iter()
    }

    /// Move all warnings of `other` to the end of this sink
    pub fn extend(&mut self, other: Warnings) {
        self.entries.extend(other.entries);
    }

    /// Append every warning as one line to the file at `path`
    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path.as_ref())?;
        for warning in &self.entries {
            writeln!(file, "{}", warning)?;
        }
        Ok(())
    }

    pub fn into_vec(self) -> Vec<Warning> {
        self.entries
    }
}

impl<'a> IntoIterator for &'a Warnings {
    type Item = &'a Warning;
    type IntoIter = std::slice::Iter<'a, Warning>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

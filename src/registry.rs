//! Template registry
//!
//! Loads the template directive into an immutable name → [`Template`] map.
//! A directive is a sequence of blocks, each opened by a header line:
//!
//! ```text
//! // reusable fragments
//! # $Card(title,body)
//! <div class="card">
//!   <h2>$$title$$</h2>
//!   <p>$$body$$</p>
//! </div>
//!
//! # $Link(href,text)
//! <a href="$$href$$">$$text$$</a>
//! ```
//!
//! The body of a block is every line up to the next header, with leading and
//! trailing blank lines removed. Text before the first header is ignored.
//! A heading that ends with the closing `$`, such as `# $Link(home)$`, is an
//! invocation and belongs to the body.
//! A registry is never patched once built; reloading means building a new one
//! and replacing the old value.

use std::path::Path;

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Error, Result};
use crate::functions::is_reserved_name;
use crate::template::Template;
use crate::utils::content_lines;
use crate::warnings::{Warning, Warnings};

static HEADER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^#+\s*\$([A-Za-z_][A-Za-z0-9_]*)\(([^)]*)\)\s*$")
        .expect("Invalid template header regex")
});

/// Immutable mapping from template name to definition
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    templates: IndexMap<String, Template>,
}

impl TemplateRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from already constructed templates
    ///
    /// Later templates replace earlier ones with the same name.
    pub fn from_templates<I: IntoIterator<Item = Template>>(templates: I) -> Self {
        let templates = templates
            .into_iter()
            .map(|template| (template.name().to_string(), template))
            .collect();
        Self { templates }
    }

    /// Parse template directive text
    ///
    /// Redeclared names and names shadowed by built-in functions are recorded
    /// in `warnings`; neither stops the load.
    pub fn parse(source: &str, warnings: &mut Warnings) -> Self {
        let mut templates: IndexMap<String, Template> = IndexMap::new();
        let mut current: Option<Block<'_>> = None;

        for line in content_lines(source) {
            if let Some((name, args)) = parse_header(line) {
                if let Some(block) = current.take() {
                    insert_block(&mut templates, block, warnings);
                }
                current = Some(Block {
                    name,
                    args,
                    lines: Vec::new(),
                });
            } else if let Some(block) = current.as_mut() {
                block.lines.push(line);
            }
        }
        if let Some(block) = current.take() {
            insert_block(&mut templates, block, warnings);
        }

        log::debug!("Loaded {} templates", templates.len());
        Self { templates }
    }

    /// Read and parse a template directive file
    pub fn from_file<P: AsRef<Path>>(path: P, warnings: &mut Warnings) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| {
            Error::template_owned(format!(
                "Failed to read template file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Ok(Self::parse(&source, warnings))
    }

    pub fn get(&self, name: &str) -> Option<&Template> {
        self.templates.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Template names in declaration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }
}

/// A header and the raw body lines collected after it
struct Block<'a> {
    name: String,
    args: Vec<String>,
    lines: Vec<&'a str>,
}

fn insert_block(templates: &mut IndexMap<String, Template>, block: Block<'_>, warnings: &mut Warnings) {
    let Block { name, args, lines } = block;
    if is_reserved_name(&name) {
        warnings.push(Warning::ReservedName { name: name.clone() });
    }
    // shift_remove keeps the map in latest-declaration order
    if templates.shift_remove(&name).is_some() {
        warnings.push(Warning::DuplicateTemplate { name: name.clone() });
    }
    let template = Template::new(name.clone(), args, &join_body(&lines));
    templates.insert(name, template);
}

/// Split a header line such as `# $Card(title, body)` into name and arguments
pub fn parse_header(line: &str) -> Option<(String, Vec<String>)> {
    let caps = HEADER_REGEX.captures(line.trim())?;
    let name = caps[1].to_string();
    let args = caps[2]
        .split(',')
        .map(str::trim)
        .filter(|arg| !arg.is_empty())
        .map(String::from)
        .collect();
    Some((name, args))
}

fn join_body(lines: &[&str]) -> String {
    let is_blank = |line: &&str| line.trim().is_empty();
    let start = lines.iter().position(|l| !is_blank(l)).unwrap_or(lines.len());
    let end = lines
        .iter()
        .rposition(|l| !is_blank(l))
        .map_or(start, |i| i + 1);
    lines[start..end].join("\n")
}

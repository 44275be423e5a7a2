//! Built-in tree functions
//!
//! `ChildList`, `NavList` and `SiteMap` are invoked like templates but render
//! links from the page tree around the current page. Their names are
//! reserved: a template declared with one of them is loaded and shadowed.
//!
//! Arguments reach a function as the raw invocation strings. An optional
//! item template renders each entry; without one a plain link is emitted.

use std::fmt;

use indexmap::IndexMap;

use crate::engine::Scope;
use crate::tree::{NodeId, PageTree, RenderContext};
use crate::utils::{escape_html_cow, is_identifier, parse_level};
use crate::warnings::Warning;

pub const CHILD_LIST: &str = "ChildList";
pub const NAV_LIST: &str = "NavList";
pub const SITE_MAP: &str = "SiteMap";

/// Names of the built-in functions; they take precedence over templates
pub const RESERVED_NAMES: [&str; 3] = [CHILD_LIST, NAV_LIST, SITE_MAP];

pub fn is_reserved_name(name: &str) -> bool {
    RESERVED_NAMES.contains(&name)
}

/// A function invoked like a template but rendered from the page tree
///
/// Arguments arrive as the raw strings of the invocation; they are not
/// expanded beforehand.
pub trait TreeFunction: Send + Sync {
    fn name(&self) -> &'static str;

    fn call(&self, scope: &mut Scope<'_>, args: &[&str]) -> String;
}

/// Optional, trimmed template name argument
fn template_arg<'a>(args: &[&'a str], index: usize) -> Option<&'a str> {
    args.get(index).map(|arg| arg.trim()).filter(|arg| !arg.is_empty())
}

/// Resolve the item template argument, warning once if it is unknown
fn item_template<'a>(scope: &mut Scope<'_>, args: &[&'a str]) -> Option<&'a str> {
    let name = template_arg(args, 0)?;
    if scope.has_template(name) {
        Some(name)
    } else {
        scope.warn(Warning::UnknownTemplate {
            name: name.to_string(),
        });
        None
    }
}

fn link(tree: &PageTree, id: NodeId, class: Option<&str>) -> String {
    let page = tree.get(id);
    let href = page.href();
    let href = escape_html_cow(&href);
    let name = escape_html_cow(page.name());
    match class {
        Some(class) => format!("<a class=\"{}\" href=\"{}\">{}</a>", class, href, name),
        None => format!("<a href=\"{}\">{}</a>", href, name),
    }
}

/// `$ChildList(item, separator)$`: the current page's children
#[derive(Debug, Default, Clone, Copy)]
pub struct ChildList;

impl ChildList {
    pub fn new() -> Self {
        Self
    }
}

impl TreeFunction for ChildList {
    fn name(&self) -> &'static str {
        CHILD_LIST
    }

    fn call(&self, scope: &mut Scope<'_>, args: &[&str]) -> String {
        let ctx = scope.context();
        let tree = ctx.tree();
        let children = tree.children(ctx.current());
        if children.is_empty() {
            return String::new();
        }

        let item = item_template(scope, args);
        let separator = args.get(1).copied().unwrap_or("");

        let mut fragments = Vec::with_capacity(children.len());
        for &child in children {
            let fragment = match item {
                Some(item) => {
                    let page = tree.get(child);
                    let values = [page.name().to_string(), page.href()];
                    scope.render_template(item, &values).unwrap_or_default()
                }
                None => link(tree, child, None),
            };
            fragments.push(fragment);
        }
        fragments.join(separator)
    }
}

/// `$NavList(item, separator)$`: the root and its children, with the entry
/// for the current page (or the section containing it) marked active
#[derive(Debug, Default, Clone, Copy)]
pub struct NavList;

impl NavList {
    pub fn new() -> Self {
        Self
    }

    /// Pages listed in the navigation, identical for every page
    pub fn entries(tree: &PageTree) -> Vec<NodeId> {
        let root = tree.root();
        std::iter::once(root)
            .chain(tree.children(root).iter().copied())
            .collect()
    }

    /// Whether `entry` should be highlighted when rendering `ctx`'s page
    pub fn is_active(ctx: &RenderContext<'_>, entry: NodeId) -> bool {
        let tree = ctx.tree();
        entry == ctx.current() || (entry != tree.root() && tree.is_ancestor(entry, ctx.current()))
    }
}

impl TreeFunction for NavList {
    fn name(&self) -> &'static str {
        NAV_LIST
    }

    fn call(&self, scope: &mut Scope<'_>, args: &[&str]) -> String {
        let ctx = scope.context();
        let tree = ctx.tree();
        let item = item_template(scope, args);
        let separator = args.get(1).copied().unwrap_or("");

        let mut fragments = Vec::new();
        for entry in Self::entries(tree) {
            let active = Self::is_active(&ctx, entry);
            let fragment = match item {
                Some(item) => {
                    let page = tree.get(entry);
                    let state = if active { "active" } else { "" };
                    let values = [page.name().to_string(), page.href(), state.to_string()];
                    scope.render_template(item, &values).unwrap_or_default()
                }
                None => link(tree, entry, active.then_some("active")),
            };
            fragments.push(fragment);
        }
        fragments.join(separator)
    }
}

/// `$SiteMap(level, page)$`: nested lists of the subtree below a page
#[derive(Debug, Default, Clone, Copy)]
pub struct SiteMap;

impl SiteMap {
    pub fn new() -> Self {
        Self
    }

    /// Render the subtree below `id`, starting at nesting `level`
    pub fn render(tree: &PageTree, id: NodeId, level: usize) -> String {
        let mut out = String::new();
        Self::render_level(tree, id, level, &mut out);
        out
    }

    fn render_level(tree: &PageTree, id: NodeId, level: usize, out: &mut String) {
        let children = tree.children(id);
        if children.is_empty() {
            return;
        }
        out.push_str(&format!("<ul class=\"sitemap level-{}\">", level));
        for &child in children {
            out.push_str("<li>");
            out.push_str(&link(tree, child, None));
            Self::render_level(tree, child, level + 1, out);
            out.push_str("</li>");
        }
        out.push_str("</ul>");
    }
}

impl TreeFunction for SiteMap {
    fn name(&self) -> &'static str {
        SITE_MAP
    }

    fn call(&self, scope: &mut Scope<'_>, args: &[&str]) -> String {
        let ctx = scope.context();
        let tree = ctx.tree();

        let level = match args.first().map(|arg| arg.trim()).filter(|arg| !arg.is_empty()) {
            None => 0,
            Some(raw) => parse_level(raw).unwrap_or_else(|| {
                scope.warn(Warning::InvalidArgument {
                    function: SITE_MAP.to_string(),
                    value: raw.to_string(),
                });
                0
            }),
        };

        let start = match template_arg(args, 1) {
            None => ctx.current(),
            Some(name) => match tree.find(name) {
                Some(id) => id,
                None => {
                    scope.warn(Warning::MissingPage {
                        name: name.to_string(),
                    });
                    return String::new();
                }
            },
        };

        Self::render(tree, start, level)
    }
}

/// Built-in functions by name
pub struct FunctionRegistry {
    functions: IndexMap<&'static str, Box<dyn TreeFunction>>,
}

impl FunctionRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            functions: IndexMap::new(),
        }
    }

    /// Create a registry with the child list, navigation list and site map
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(ChildList::new()));
        registry.register(Box::new(NavList::new()));
        registry.register(Box::new(SiteMap::new()));
        registry
    }

    /// Register a function under its own name, replacing any previous one
    pub fn register(&mut self, function: Box<dyn TreeFunction>) {
        if !is_identifier(function.name()) {
            log::warn!(
                "Function name '{}' is not an identifier and cannot be invoked",
                function.name()
            );
        }
        self.functions.insert(function.name(), function);
    }

    pub fn get(&self, name: &str) -> Option<&dyn TreeFunction> {
        self.functions.get(name).map(|f| f.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.functions.keys().copied()
    }
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl fmt::Debug for FunctionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionRegistry")
            .field("functions", &self.functions.keys().collect::<Vec<_>>())
            .finish()
    }
}

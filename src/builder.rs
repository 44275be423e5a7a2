//! Builder pattern API for assembling a [`Site`]
//!
//! A site is everything a generation run needs besides the page sources: the
//! page tree, the template registry, the built-in functions and the shorthand
//! rules.
//!
//! # Examples
//!
//! ```rust,ignore
//! use html_sitegen::SiteBuilder;
//!
//! let site = SiteBuilder::new()
//!     .layout_str("# index\n## about")
//!     .templates_str("# $Title(text)\n<h1>$$text$$</h1>")
//!     .build()?;
//! ```

use std::path::{Path, PathBuf};

use crate::config::GeneratorConfig;
use crate::engine::Engine;
use crate::error::{Error, Result};
use crate::functions::{FunctionRegistry, TreeFunction};
use crate::layout::{parse_layout, parse_layout_file};
use crate::registry::TemplateRegistry;
use crate::shorthand::ShorthandParser;
use crate::tree::{PageTree, RenderContext};
use crate::warnings::{Warning, Warnings};

/// Loaded page tree, templates, functions and shorthand rules
#[derive(Debug)]
pub struct Site {
    tree: PageTree,
    templates: TemplateRegistry,
    functions: FunctionRegistry,
    shorthand: ShorthandParser,
    load_warnings: Warnings,
}

impl Site {
    pub fn tree(&self) -> &PageTree {
        &self.tree
    }

    pub fn templates(&self) -> &TemplateRegistry {
        &self.templates
    }

    pub fn functions(&self) -> &FunctionRegistry {
        &self.functions
    }

    pub fn shorthand(&self) -> &ShorthandParser {
        &self.shorthand
    }

    /// Warnings recorded while loading the template directive
    pub fn load_warnings(&self) -> &Warnings {
        &self.load_warnings
    }

    pub fn engine(&self) -> Engine<'_> {
        Engine::new(&self.templates, &self.functions)
    }

    /// Replace the template registry as a whole
    pub fn replace_templates(&mut self, templates: TemplateRegistry) {
        self.templates = templates;
    }

    /// Expand templates in one content line, then apply the shorthand rules
    pub fn interpret_line(
        &self,
        line: &str,
        ctx: RenderContext<'_>,
        warnings: &mut Warnings,
    ) -> String {
        let expanded = self.engine().resolve_line(line, ctx, warnings);
        self.shorthand.parse(&expanded)
    }
}

#[derive(Debug, Clone)]
enum LayoutSource {
    Text(String),
    File(PathBuf),
    Tree(PageTree),
}

#[derive(Debug, Clone)]
enum TemplateSource {
    Text(String),
    File(PathBuf),
    Registry(TemplateRegistry),
}

/// Builder for constructing [`Site`] instances
pub struct SiteBuilder {
    layout: Option<LayoutSource>,
    templates: Option<TemplateSource>,
    functions: FunctionRegistry,
    shorthand: ShorthandParser,
}

impl SiteBuilder {
    /// Create a new site builder with the default functions and shorthands
    pub fn new() -> Self {
        Self {
            layout: None,
            templates: None,
            functions: FunctionRegistry::with_defaults(),
            shorthand: ShorthandParser::new(),
        }
    }

    /// Take the layout and template directives from a configuration
    pub fn from_config(config: &GeneratorConfig) -> Self {
        Self::new()
            .layout_file(config.layout_path())
            .templates_file(config.templates_path())
    }

    /// Set the layout directive text
    pub fn layout_str<S: Into<String>>(mut self, layout: S) -> Self {
        self.layout = Some(LayoutSource::Text(layout.into()));
        self
    }

    /// Set the layout directive file
    pub fn layout_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.layout = Some(LayoutSource::File(path.as_ref().to_path_buf()));
        self
    }

    /// Use an already built page tree
    pub fn with_tree(mut self, tree: PageTree) -> Self {
        self.layout = Some(LayoutSource::Tree(tree));
        self
    }

    /// Set the template directive text
    pub fn templates_str<S: Into<String>>(mut self, templates: S) -> Self {
        self.templates = Some(TemplateSource::Text(templates.into()));
        self
    }

    /// Set the template directive file
    pub fn templates_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.templates = Some(TemplateSource::File(path.as_ref().to_path_buf()));
        self
    }

    /// Use an already loaded template registry
    pub fn with_registry(mut self, registry: TemplateRegistry) -> Self {
        self.templates = Some(TemplateSource::Registry(registry));
        self
    }

    /// Register an additional built-in function
    pub fn add_function(mut self, function: Box<dyn TreeFunction>) -> Self {
        self.functions.register(function);
        self
    }

    /// Use custom shorthand rules
    pub fn with_shorthand(mut self, shorthand: ShorthandParser) -> Self {
        self.shorthand = shorthand;
        self
    }

    /// Build the site
    ///
    /// A missing or invalid layout is an error. An unreadable template file
    /// is logged and leaves the registry empty, so pages still render with
    /// their invocations kept literally.
    pub fn build(self) -> Result<Site> {
        let tree = match self.layout {
            Some(LayoutSource::Text(text)) => parse_layout(&text)?,
            Some(LayoutSource::File(path)) => parse_layout_file(path)?,
            Some(LayoutSource::Tree(tree)) => tree,
            None => return Err(Error::layout_static("No layout source configured")),
        };

        let mut load_warnings = Warnings::new();
        let templates = match self.templates {
            Some(TemplateSource::Text(text)) => TemplateRegistry::parse(&text, &mut load_warnings),
            Some(TemplateSource::File(path)) => {
                match TemplateRegistry::from_file(&path, &mut load_warnings) {
                    Ok(registry) => registry,
                    Err(err) => {
                        load_warnings.push(Warning::UnreadableTemplates {
                            path: path.display().to_string(),
                            reason: err.to_string(),
                        });
                        TemplateRegistry::new()
                    }
                }
            }
            Some(TemplateSource::Registry(registry)) => registry,
            None => TemplateRegistry::new(),
        };

        log::info!(
            "Site loaded: {} pages, {} templates",
            tree.len(),
            templates.len()
        );

        Ok(Site {
            tree,
            templates,
            functions: self.functions,
            shorthand: self.shorthand,
            load_warnings,
        })
    }
}

impl Default for SiteBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Scope;
    use crate::template::Template;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_build_from_strings() {
        let site = SiteBuilder::new()
            .layout_str("# index\n## about")
            .templates_str("# $Title(text)\n# $$text$$")
            .build()
            .unwrap();

        assert_eq!(site.tree().len(), 2);
        assert!(site.templates().contains("Title"));

        let ctx = RenderContext::new(site.tree(), site.tree().root());
        let mut warnings = Warnings::new();
        let line = site.interpret_line("$Title(Welcome)$", ctx, &mut warnings);
        assert_eq!(line, "<h1>Welcome</h1>");
    }

    #[test]
    fn test_build_without_layout_fails() {
        let err = SiteBuilder::new().templates_str("").build().unwrap_err();
        assert!(matches!(err, Error::LayoutError(_)));
    }

    #[test]
    fn test_missing_template_file_leaves_registry_empty() {
        let site = SiteBuilder::new()
            .layout_str("# index")
            .templates_file("/no/such/templates.md")
            .build()
            .unwrap();
        assert!(site.templates().is_empty());

        let recorded: Vec<_> = site.load_warnings().iter().cloned().collect();
        assert_eq!(recorded.len(), 1);
        match &recorded[0] {
            Warning::UnreadableTemplates { path, reason } => {
                assert_eq!(path, "/no/such/templates.md");
                assert!(reason.contains("Failed to read template file"), "{}", reason);
            }
            other => panic!("expected unreadable templates, got {:?}", other),
        }
    }

    #[test]
    fn test_load_warnings_are_kept() {
        let site = SiteBuilder::new()
            .layout_str("# index")
            .templates_str("# $NavList()\nmine")
            .build()
            .unwrap();
        assert_eq!(
            site.load_warnings().iter().cloned().collect::<Vec<_>>(),
            vec![Warning::ReservedName {
                name: "NavList".to_string()
            }]
        );
    }

    #[test]
    fn test_prebuilt_tree_and_registry() {
        let mut tree = PageTree::from_root("home");
        let root = tree.root();
        tree.add_child(root, "blog").unwrap();
        let registry = TemplateRegistry::from_templates(vec![Template::new(
            "Hi",
            vec![],
            "hello",
        )]);

        let mut site = SiteBuilder::new()
            .with_tree(tree)
            .with_registry(registry)
            .build()
            .unwrap();
        assert_eq!(site.tree().name(site.tree().root()), "home");

        site.replace_templates(TemplateRegistry::new());
        assert!(!site.templates().contains("Hi"));
    }

    struct PageName;

    impl TreeFunction for PageName {
        fn name(&self) -> &'static str {
            "PageName"
        }

        fn call(&self, scope: &mut Scope<'_>, _args: &[&str]) -> String {
            scope.context().current_page().name().to_string()
        }
    }

    #[test]
    fn test_custom_function() {
        let site = SiteBuilder::new()
            .layout_str("# index\n## about")
            .add_function(Box::new(PageName))
            .build()
            .unwrap();

        let ctx = RenderContext::for_page(site.tree(), "about").unwrap();
        let mut warnings = Warnings::new();
        assert_eq!(
            site.interpret_line("on $PageName()$", ctx, &mut warnings),
            "on about"
        );
    }
}

//! Template expansion engine
//!
//! [`Engine::resolve_line`] is the entry point, called once per content line.
//! It scans the line for `$Name(...)$` invocations and replaces each one:
//!
//! - a built-in function name dispatches to the function with the raw
//!   argument strings and the [`RenderContext`] of the current page;
//! - a registered template has every argument resolved first, then its body
//!   substituted, then the substituted text resolved again with the template
//!   marked as active;
//! - an unknown name stays in the output verbatim.
//!
//! Cycle protection uses an [`ExpansionContext`]: the chain of templates
//! currently being expanded. Invoking a template that is already on the
//! chain expands to nothing and records a warning, so mutually recursive
//! templates always terminate.
//!
//! Every anomaly is recovered locally and reported through [`Warnings`]; the
//! engine never fails. Text left in place by an anomaly is marked as literal
//! while the line is being expanded, so substituting it into a template body
//! does not report it a second time.

use std::ops::{Deref, DerefMut};

use indexmap::IndexSet;

use crate::functions::FunctionRegistry;
use crate::invocation::{mark_literal, scan, strip_literal_marks, Invocation, Segment};
use crate::registry::TemplateRegistry;
use crate::template::Template;
use crate::tree::RenderContext;
use crate::warnings::{Warning, Warnings};

/// Names of the templates being expanded on the active call chain
#[derive(Debug, Default)]
pub struct ExpansionContext {
    chain: IndexSet<String>,
}

impl ExpansionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.chain.contains(name)
    }

    pub fn depth(&self) -> usize {
        self.chain.len()
    }

    /// The active chain followed by `name`, for cycle reports
    pub fn chain_with(&self, name: &str) -> Vec<String> {
        self.chain
            .iter()
            .cloned()
            .chain(std::iter::once(name.to_string()))
            .collect()
    }

    /// Mark `name` as active until the returned guard is dropped
    pub fn enter(&mut self, name: &str) -> ExpansionGuard<'_> {
        let added = self.chain.insert(name.to_string());
        ExpansionGuard {
            context: self,
            added,
        }
    }
}

/// Keeps a template name on the expansion chain while alive
#[derive(Debug)]
pub struct ExpansionGuard<'c> {
    context: &'c mut ExpansionContext,
    added: bool,
}

impl Deref for ExpansionGuard<'_> {
    type Target = ExpansionContext;

    fn deref(&self) -> &Self::Target {
        self.context
    }
}

impl DerefMut for ExpansionGuard<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.context
    }
}

impl Drop for ExpansionGuard<'_> {
    fn drop(&mut self) {
        if self.added {
            self.context.chain.pop();
        }
    }
}

/// Resolves invocations against a template registry and built-in functions
#[derive(Debug, Clone, Copy)]
pub struct Engine<'s> {
    templates: &'s TemplateRegistry,
    functions: &'s FunctionRegistry,
}

impl<'s> Engine<'s> {
    pub fn new(templates: &'s TemplateRegistry, functions: &'s FunctionRegistry) -> Self {
        Self {
            templates,
            functions,
        }
    }

    pub fn templates(&self) -> &'s TemplateRegistry {
        self.templates
    }

    pub fn functions(&self) -> &'s FunctionRegistry {
        self.functions
    }

    /// Resolve every invocation in one content line
    ///
    /// Each call starts with an empty expansion chain.
    pub fn resolve_line(
        &self,
        line: &str,
        ctx: RenderContext<'_>,
        warnings: &mut Warnings,
    ) -> String {
        let mut expansion = ExpansionContext::new();
        let line = strip_literal_marks(line);
        let resolved = self.resolve(&line, ctx, &mut expansion, warnings);
        strip_literal_marks(&resolved).into_owned()
    }

    /// Resolve text within an ongoing expansion
    ///
    /// The result may still carry literal marks; [`Engine::resolve_line`]
    /// removes them.
    pub fn resolve(
        &self,
        text: &str,
        ctx: RenderContext<'_>,
        expansion: &mut ExpansionContext,
        warnings: &mut Warnings,
    ) -> String {
        let mut output = String::with_capacity(text.len());
        for segment in scan(text) {
            match segment {
                Segment::Text(literal) => output.push_str(literal),
                Segment::Malformed(opening) => {
                    warnings.push(Warning::MalformedInvocation {
                        text: opening.to_string(),
                    });
                    output.push_str(&mark_literal(opening));
                }
                Segment::Invocation(invocation) => {
                    let expanded = self.expand(&invocation, ctx, expansion, warnings);
                    output.push_str(&expanded);
                }
            }
        }
        output
    }

    fn expand(
        &self,
        invocation: &Invocation<'_>,
        ctx: RenderContext<'_>,
        expansion: &mut ExpansionContext,
        warnings: &mut Warnings,
    ) -> String {
        let name = invocation.name();

        if let Some(function) = self.functions.get(name) {
            let mut scope = Scope {
                engine: self,
                ctx,
                expansion,
                warnings,
            };
            let args: Vec<_> = invocation.args().into_iter().map(strip_literal_marks).collect();
            let args: Vec<&str> = args.iter().map(|arg| &**arg).collect();
            return function.call(&mut scope, &args);
        }

        let Some(template) = self.templates.get(name) else {
            warnings.push(Warning::UnknownTemplate {
                name: name.to_string(),
            });
            return mark_literal(invocation.text());
        };

        let values: Vec<String> = invocation
            .args()
            .into_iter()
            .map(|arg| self.resolve(arg, ctx, expansion, warnings))
            .collect();
        self.apply(template, &values, ctx, expansion, warnings)
    }

    /// Substitute resolved values into a template and resolve the result
    /// with the template on the expansion chain
    fn apply(
        &self,
        template: &Template,
        values: &[String],
        ctx: RenderContext<'_>,
        expansion: &mut ExpansionContext,
        warnings: &mut Warnings,
    ) -> String {
        let name = template.name();
        if expansion.contains(name) {
            warnings.push(Warning::CyclicReference {
                chain: expansion.chain_with(name),
            });
            return String::new();
        }

        let substituted = template.parse(values);
        let mut guard = expansion.enter(name);
        self.resolve(&substituted, ctx, &mut guard, warnings)
    }
}

/// What a built-in function sees of the expansion in progress
pub struct Scope<'a> {
    engine: &'a Engine<'a>,
    ctx: RenderContext<'a>,
    expansion: &'a mut ExpansionContext,
    warnings: &'a mut Warnings,
}

impl<'a> Scope<'a> {
    /// The page being rendered
    pub fn context(&self) -> RenderContext<'a> {
        self.ctx
    }

    pub fn has_template(&self, name: &str) -> bool {
        self.engine.templates.contains(name)
    }

    /// Expand a registered template with literal values
    ///
    /// The expansion shares the caller's chain, so an item template that
    /// invokes the function rendering it is caught as a cycle. Returns `None`
    /// when no template has that name.
    pub fn render_template(&mut self, name: &str, values: &[String]) -> Option<String> {
        let template = self.engine.templates.get(name)?;
        Some(
            self.engine
                .apply(template, values, self.ctx, self.expansion, self.warnings),
        )
    }

    pub fn warn(&mut self, warning: Warning) {
        self.warnings.push(warning);
    }
}

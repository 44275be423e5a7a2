//! Static site generation from a page tree and text templates
//!
//! A site is described by two directives: a layout listing the pages as a
//! tree, and a set of named templates whose bodies contain `$$arg$$`
//! placeholders. Page sources invoke templates with `$Name(a,b)$`; the
//! invocations are expanded recursively, with a cycle guard, and the result
//! goes through a small set of shorthand rules (`**bold**`, `# heading`, ...).
//! Three built-in functions render from the page tree itself: `ChildList`,
//! `NavList` and `SiteMap`.
//!
//! # Examples
//!
//! ```rust,ignore
//! use html_sitegen::{GeneratorConfig, PageRenderer, SiteBuilder};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = GeneratorConfig::for_content_dir("content");
//! let site = SiteBuilder::from_config(&config).build()?;
//!
//! let report = PageRenderer::new(&site, &config).render()?;
//! println!("{} pages, {} warnings", report.pages.len(), report.warnings.len());
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod warnings;
pub mod utils;
pub mod tree;
pub mod layout;
pub mod template;
pub mod registry;
pub mod invocation;
pub mod engine;
pub mod functions;
pub mod shorthand;
pub mod config;
pub mod builder;
pub mod renderer;
pub mod test_utils;

mod edge_case_tests;

// Re-export commonly used types
pub use builder::{Site, SiteBuilder};
pub use config::GeneratorConfig;
pub use engine::{Engine, ExpansionContext, Scope};
pub use error::{Error, Result};
pub use functions::{FunctionRegistry, TreeFunction};
pub use registry::TemplateRegistry;
pub use renderer::{PageRenderer, RenderReport};
pub use shorthand::ShorthandParser;
pub use template::Template;
pub use tree::{NodeId, PageTree, RenderContext};
pub use warnings::{Warning, Warnings};

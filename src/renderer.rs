//! Page rendering
//!
//! This module drives a generation run: it walks the page tree breadth-first
//! from the root, builds the [`RenderContext`] of each page, interprets every
//! source line (template expansion, then shorthand) and writes one HTML file
//! per page.

use std::fs;
use std::path::Path;

use crate::builder::Site;
use crate::config::GeneratorConfig;
use crate::error::{Error, Result};
use crate::tree::{NodeId, RenderContext};
use crate::utils::{content_lines, read_content_lines};
use crate::warnings::Warnings;

/// Outcome of a generation run
#[derive(Debug, Clone)]
pub struct RenderReport {
    /// Names of the pages written, in visiting order
    pub pages: Vec<String>,
    /// Every warning recorded while loading and rendering
    pub warnings: Warnings,
}

/// Renders the pages of a [`Site`] to HTML files
pub struct PageRenderer<'a> {
    site: &'a Site,
    config: &'a GeneratorConfig,
}

impl<'a> PageRenderer<'a> {
    pub fn new(site: &'a Site, config: &'a GeneratorConfig) -> Self {
        Self { site, config }
    }

    /// Render every page of the site
    ///
    /// Stale `.html` files are removed from the output directory first and
    /// the warnings file is truncated; all warnings of the run are written to
    /// it at the end. A page whose source cannot be read aborts the run.
    pub fn render(&self) -> Result<RenderReport> {
        clear_previous_files(self.config.output_dir())?;
        clear_warnings_file(self.config.warnings_file())?;

        let tree = self.site.tree();
        let mut warnings = self.site.load_warnings().clone();
        let mut pages = Vec::with_capacity(tree.len());

        for id in tree.breadth_first() {
            self.render_to_file(id, &mut warnings)?;
            pages.push(tree.name(id).to_string());
        }

        warnings.write_to(self.config.warnings_file())?;
        log::info!(
            "Rendered {} pages with {} warnings",
            pages.len(),
            warnings.len()
        );
        Ok(RenderReport { pages, warnings })
    }

    fn render_to_file(&self, id: NodeId, warnings: &mut Warnings) -> Result<()> {
        let name = self.site.tree().name(id);
        let input = self.config.input_path(name);
        let output = self.config.output_path(name);

        let lines = read_content_lines(&input).map_err(|e| {
            Error::render_owned(format!(
                "Cannot read source of page '{}' ({}): {}",
                name,
                input.display(),
                e
            ))
        })?;

        let ctx = RenderContext::new(self.site.tree(), id);
        let html = render_lines(self.site, ctx, lines.iter().map(String::as_str), warnings);

        if let Some(parent) = output.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&output, html).map_err(|e| {
            Error::render_owned(format!(
                "Cannot write page '{}' ({}): {}",
                name,
                output.display(),
                e
            ))
        })?;
        log::debug!("Wrote {}", output.display());
        Ok(())
    }
}

/// Render one page's source text without touching the filesystem
///
/// `//` comment lines are skipped; every other line is interpreted and ends
/// with a newline.
pub fn render_page(site: &Site, page: NodeId, source: &str, warnings: &mut Warnings) -> String {
    let ctx = RenderContext::new(site.tree(), page);
    render_lines(site, ctx, content_lines(source).into_iter(), warnings)
}

fn render_lines<'l, I>(
    site: &Site,
    ctx: RenderContext<'_>,
    lines: I,
    warnings: &mut Warnings,
) -> String
where
    I: Iterator<Item = &'l str>,
{
    let mut html = String::new();
    for line in lines {
        html.push_str(&site.interpret_line(line, ctx, warnings));
        html.push('\n');
    }
    html
}

/// Remove `.html` files directly inside `output_dir`; other files stay
pub fn clear_previous_files<P: AsRef<Path>>(output_dir: P) -> Result<()> {
    let output_dir = output_dir.as_ref();
    if !output_dir.is_dir() {
        return Ok(());
    }
    for entry in fs::read_dir(output_dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "html") {
            fs::remove_file(&path)?;
        }
    }
    Ok(())
}

/// Create or truncate the warnings file
pub fn clear_warnings_file<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, "")?;
    Ok(())
}

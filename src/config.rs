//! Generator configuration
//!
//! [`GeneratorConfig`] holds every path a generation run touches. It can be
//! built with `with_*` methods, loaded from a JSON file, or resolved from
//! command line options with [`CliOptions::resolve`]:
//!
//! ```rust,ignore
//! use html_sitegen::config::GeneratorConfig;
//!
//! let config = GeneratorConfig::default()
//!     .with_content_dir("docs/content")
//!     .with_output_dir("public");
//! ```
//!
//! # Default resolution
//!
//! Without explicit options the content directory is `./content`, or
//! `../content` when only that one exists. Directives are read from
//! `<content>/directives/`, and the output directory and warnings file are
//! placed next to the content directory (`site/` and `warnings.txt`).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const DIRECTIVES_DIR: &str = "directives";
pub const LAYOUT_FILE: &str = "layout.md";
pub const TEMPLATES_FILE: &str = "templates.md";
pub const OUTPUT_DIR: &str = "site";
pub const WARNINGS_FILE: &str = "warnings.txt";
pub const CONTENT_DIR: &str = "content";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct GeneratorConfig {
    pub(crate) content_dir: PathBuf,
    pub(crate) output_dir: PathBuf,
    pub(crate) layout_path: PathBuf,
    pub(crate) templates_path: PathBuf,
    pub(crate) warnings_file: PathBuf,
}

impl GeneratorConfig {
    /// Create a new generator configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration for a content directory, with every other path derived
    /// from it
    pub fn for_content_dir<P: AsRef<Path>>(content_dir: P) -> Self {
        let content_dir = content_dir.as_ref().to_path_buf();
        let workspace = content_dir
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Self {
            layout_path: content_dir.join(DIRECTIVES_DIR).join(LAYOUT_FILE),
            templates_path: content_dir.join(DIRECTIVES_DIR).join(TEMPLATES_FILE),
            output_dir: workspace.join(OUTPUT_DIR),
            warnings_file: workspace.join(WARNINGS_FILE),
            content_dir,
        }
    }

    /// Load a configuration from a JSON file; missing keys keep their defaults
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            Error::config_owned(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn with_content_dir<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.content_dir = path.into();
        self
    }

    pub fn with_output_dir<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.output_dir = path.into();
        self
    }

    pub fn with_layout_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.layout_path = path.into();
        self
    }

    pub fn with_templates_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.templates_path = path.into();
        self
    }

    pub fn with_warnings_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.warnings_file = path.into();
        self
    }

    // Accessors
    pub fn content_dir(&self) -> &Path {
        &self.content_dir
    }
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
    pub fn layout_path(&self) -> &Path {
        &self.layout_path
    }
    pub fn templates_path(&self) -> &Path {
        &self.templates_path
    }
    pub fn warnings_file(&self) -> &Path {
        &self.warnings_file
    }

    /// Source file of a page
    pub fn input_path(&self, page_name: &str) -> PathBuf {
        self.content_dir.join(format!("{}.md", page_name))
    }

    /// Generated file of a page
    pub fn output_path(&self, page_name: &str) -> PathBuf {
        self.output_dir.join(format!("{}.html", page_name))
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from("./content"),
            output_dir: PathBuf::from("./site"),
            layout_path: PathBuf::from("./content/directives/layout.md"),
            templates_path: PathBuf::from("./content/directives/templates.md"),
            warnings_file: PathBuf::from("warnings.txt"),
        }
    }
}

/// Paths given explicitly by the operator; anything absent is derived
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOptions {
    pub content_root: Option<PathBuf>,
    pub layout: Option<PathBuf>,
    pub templates: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub warnings_file: Option<PathBuf>,
}

impl CliOptions {
    /// Turn the options into a configuration, relative paths being taken
    /// from `cwd`
    pub fn resolve<P: AsRef<Path>>(&self, cwd: P) -> GeneratorConfig {
        let cwd = cwd.as_ref();
        let content_dir = match &self.content_root {
            Some(path) => absolute(path, cwd),
            None => default_content_dir(cwd),
        };

        let mut config = GeneratorConfig::for_content_dir(&content_dir);
        if let Some(path) = &self.layout {
            config.layout_path = absolute(path, cwd);
        }
        if let Some(path) = &self.templates {
            config.templates_path = absolute(path, cwd);
        }
        if let Some(path) = &self.output_dir {
            config.output_dir = absolute(path, cwd);
        }
        if let Some(path) = &self.warnings_file {
            config.warnings_file = absolute(path, cwd);
        }
        config
    }
}

fn absolute(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// `./content` if it is a directory, else `../content` if that is one, else
/// `./content`
fn default_content_dir(cwd: &Path) -> PathBuf {
    let mut candidates = vec![cwd.join(CONTENT_DIR)];
    if let Some(parent) = cwd.parent() {
        candidates.push(parent.join(CONTENT_DIR));
    }
    candidates
        .iter()
        .find(|candidate| candidate.is_dir())
        .unwrap_or(&candidates[0])
        .clone()
}

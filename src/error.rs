//! Error handling for html-sitegen
//!
//! This module provides the error type for the structural failures of a
//! generation run. Anything that goes wrong *inside* template expansion is
//! recoverable and is reported through [`crate::warnings::Warnings`] instead;
//! only the failures listed here abort a run.
//!
//! # Error Types
//!
//! - [`Error::LayoutError`] - the layout directive cannot be turned into a page tree
//! - [`Error::TemplateError`] - the template directive cannot be loaded
//! - [`Error::RenderError`] - a page cannot be rendered or written
//! - [`Error::ConfigError`] - configuration could not be resolved
//! - [`Error::JsonError`] - JSON configuration parsing errors
//! - [`Error::IoError`] - File system and I/O errors
//!
//! # Usage
//!
//! ```rust,ignore
//! use html_sitegen::{layout, Error};
//!
//! match layout::parse_layout("## orphan") {
//!     Ok(tree) => println!("{} pages", tree.len()),
//!     Err(Error::LayoutError(msg)) => println!("Bad layout: {}", msg),
//!     Err(err) => println!("Other error: {}", err),
//! }
//! ```
//!
//! # Memory Efficiency
//!
//! Error messages use `Cow<'static, str>` to avoid unnecessary allocations
//! when using static error messages, while still supporting owned strings
//! for dynamic error context.

use std::borrow::Cow;
use thiserror::Error;

/// Error type for all fatal html-sitegen failures
#[derive(Error, Debug)]
pub enum Error {
    /// Layout directive errors
    ///
    /// Occurs when the layout cannot describe a single rooted tree: no pages,
    /// several roots, skipped depth levels or duplicate page names.
    #[error("Layout error: {0}")]
    LayoutError(Cow<'static, str>),

    /// Template directive errors
    ///
    /// Occurs when the template directive file cannot be loaded.
    #[error("Template error: {0}")]
    TemplateError(Cow<'static, str>),

    /// Page rendering errors
    ///
    /// Occurs when a page's source content cannot be read or its output
    /// cannot be written.
    #[error("Render error: {0}")]
    RenderError(Cow<'static, str>),

    /// Configuration errors
    ///
    /// Occurs when command line options or a configuration file cannot be
    /// turned into a usable [`crate::config::GeneratorConfig`].
    #[error("Config error: {0}")]
    ConfigError(Cow<'static, str>),

    /// JSON parsing and serialization errors
    ///
    /// Automatically converted from `serde_json::Error` when a configuration
    /// file is malformed.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// File system and I/O errors
    ///
    /// Automatically converted from `std::io::Error` when file operations fail.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl Error {
    /// Create a layout error with a static string
    pub fn layout_static(msg: &'static str) -> Self {
        Error::LayoutError(Cow::Borrowed(msg))
    }

    /// Create a layout error with an owned string
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// use html_sitegen::Error;
    ///
    /// let error = Error::layout_owned(format!("Duplicate page name '{}'", name));
    /// ```
    pub fn layout_owned(msg: String) -> Self {
        Error::LayoutError(Cow::Owned(msg))
    }

    /// Create a template error with a static string
    pub fn template_static(msg: &'static str) -> Self {
        Error::TemplateError(Cow::Borrowed(msg))
    }

    /// Create a template error with an owned string
    pub fn template_owned(msg: String) -> Self {
        Error::TemplateError(Cow::Owned(msg))
    }

    /// Create a render error with a static string
    pub fn render_static(msg: &'static str) -> Self {
        Error::RenderError(Cow::Borrowed(msg))
    }

    /// Create a render error with an owned string
    pub fn render_owned(msg: String) -> Self {
        Error::RenderError(Cow::Owned(msg))
    }

    /// Create a config error with a static string
    pub fn config_static(msg: &'static str) -> Self {
        Error::ConfigError(Cow::Borrowed(msg))
    }

    /// Create a config error with an owned string
    pub fn config_owned(msg: String) -> Self {
        Error::ConfigError(Cow::Owned(msg))
    }

    /// Create an IO error carrying a message
    ///
    /// For more specific IO errors, use the standard `std::io::Error`
    /// constructors and let them be automatically converted.
    pub fn io(msg: String) -> Self {
        let io_err = std::io::Error::new(std::io::ErrorKind::Other, msg);
        Error::IoError(io_err)
    }
}

/// Result type alias for html-sitegen operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::layout_static("No pages declared");
        assert_eq!(err.to_string(), "Layout error: No pages declared");

        let err = Error::render_static("Failed to render");
        assert_eq!(err.to_string(), "Render error: Failed to render");

        let err = Error::template_static("Unreadable directive");
        assert_eq!(err.to_string(), "Template error: Unreadable directive");

        let err = Error::config_static("No content directory");
        assert_eq!(err.to_string(), "Config error: No content directory");
    }

    #[test]
    fn test_error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::JsonError(_)));
    }

    #[test]
    fn test_error_from_io() {
        use std::io;
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::IoError(_)));
    }

    #[test]
    fn test_owned_variants() {
        let err = Error::layout_owned("duplicate page 'about'".to_string());
        assert_eq!(err.to_string(), "Layout error: duplicate page 'about'");

        let err = Error::render_owned("missing index.md".to_string());
        assert_eq!(err.to_string(), "Render error: missing index.md");

        let err = Error::io("io error message".to_string());
        assert_eq!(err.to_string(), "IO error: io error message");
    }
}

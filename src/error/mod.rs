// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Error types for formcheck.
//!
//! These cover system faults only: bad configuration, unparsable
//! selectors, malformed page descriptions and I/O. A field that fails
//! validation is UI state (see [`crate::validation::ValidationFailure`])
//! and never shows up here.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for formcheck operations.
#[derive(Error, Debug)]
pub enum FormError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    // Selector errors
    #[error("Selector error: {0}")]
    Selector(#[from] SelectorError),

    // Page description errors
    #[error("Page error: {0}")]
    Page(#[from] PageError),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // UI/Interactive errors
    #[error("UI error: {0}")]
    Ui(String),

    // User cancelled operation
    #[error("Operation cancelled by user")]
    Cancelled,

    // One or more forms cannot be submitted
    #[error("{count} form(s) cannot be submitted")]
    InvalidForms { count: usize },

    // Generic error with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },
}

impl From<dialoguer::Error> for FormError {
    fn from(err: dialoguer::Error) -> Self {
        FormError::Ui(err.to_string())
    }
}

/// Configuration-related errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Failed to parse configuration: {message}")]
    ParseError { message: String },

    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    #[error("Invalid class token '{token}': must be non-empty and contain no whitespace")]
    InvalidClassToken { token: String },
}

/// Selector parsing errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectorError {
    #[error("Empty selector")]
    Empty,

    #[error("Unterminated attribute selector in '{selector}'")]
    Unterminated { selector: String },

    #[error("Unexpected '{found}' at position {position} in '{selector}'")]
    Unexpected {
        selector: String,
        found: char,
        position: usize,
    },
}

/// Page description errors.
#[derive(Error, Debug)]
pub enum PageError {
    #[error("Failed to parse page description: {message}")]
    Parse { message: String },

    #[error("Duplicate element id: '{id}'")]
    DuplicateId { id: String },

    #[error("No element with id '{id}'")]
    UnknownElement { id: String },

    #[error("Element '{id}' is not a form field")]
    NotAField { id: String },
}

/// Result type alias for formcheck operations.
pub type Result<T> = std::result::Result<T, FormError>;

/// Extension trait for adding context to errors.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T, E: std::error::Error + 'static> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| FormError::WithContext {
            context: context.into(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::NotFound {
            path: PathBuf::from("/path/to/formcheck.toml"),
        };
        assert!(err.to_string().contains("/path/to/formcheck.toml"));
    }

    #[test]
    fn test_selector_error_display() {
        let err = SelectorError::Unexpected {
            selector: ".a > b".to_string(),
            found: '>',
            position: 3,
        };
        let text = err.to_string();
        assert!(text.contains('>'));
        assert!(text.contains("position 3"));
    }

    #[test]
    fn test_form_error_from_page_error() {
        let page_err = PageError::DuplicateId {
            id: "name".to_string(),
        };
        let err: FormError = page_err.into();
        assert!(err.to_string().contains("name"));
    }

    #[test]
    fn test_context() {
        let io: std::result::Result<(), std::io::Error> =
            Err(std::io::Error::new(std::io::ErrorKind::Other, "boom"));
        let err = io.context("reading page").unwrap_err();
        assert_eq!(err.to_string(), "reading page: boom");
    }
}

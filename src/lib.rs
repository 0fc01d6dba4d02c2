// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! formcheck - Popup Form Validation
//!
//! Live validation for the forms of a photo-gallery page: every keystroke
//! re-checks the edited field, shows or hides its error label and keeps
//! the form's submit control enabled only while the whole form is valid.
//!
//! # Features
//!
//! - **Validation Engine**: Wires every form on a page and reacts to input events
//! - **Custom Rules**: Required, length and letters-only checks ahead of native constraints
//! - **Native Constraints**: `required`, `type=email|url`, `pattern`, `minlength`, `maxlength`
//! - **Modals**: Open/close with a close button, an overlay click or the Escape key
//! - **Page Descriptions**: Build a document from TOML and check it from the command line
//!
//! # Example
//!
//! ```no_run
//! use formcheck::config::default::example_page;
//! use formcheck::config::FormcheckConfig;
//! use formcheck::page::{Page, PageSpec};
//!
//! let config = FormcheckConfig::load().unwrap();
//! let spec = PageSpec::parse(example_page()).unwrap();
//! let mut page = Page::from_spec(&spec, &config).unwrap();
//!
//! let field = page.field_by_id("place-name").unwrap();
//! page.type_into(field, "Камчатка");
//!
//! for form in page.report().forms {
//!     println!("{:?}: can submit = {}", form.id, form.can_submit());
//! }
//! ```

// Module declarations
pub mod cli;
pub mod config;
pub mod dom;
pub mod error;
pub mod modal;
pub mod page;
pub mod validation;

// Re-exports for convenience
pub use config::FormcheckConfig;
pub use error::{FormError, Result};
pub use validation::{clear_validation, FormHost, ValidationEngine, ValidationFailure};

/// Version information embedded at compile time.
pub mod version {
    /// The current version of formcheck.
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");

    /// The git SHA at compile time (if available).
    pub const GIT_SHA: Option<&str> = option_env!("VERGEN_GIT_SHA");

    /// The git commit date at compile time (if available).
    pub const GIT_COMMIT_DATE: Option<&str> = option_env!("VERGEN_GIT_COMMIT_DATE");

    /// Get a formatted version string.
    pub fn version_string() -> String {
        let short = GIT_SHA.map(|sha| &sha[..7.min(sha.len())]);
        match (short, GIT_COMMIT_DATE) {
            (Some(sha), Some(date)) => format!("{} ({} {})", VERSION, sha, date),
            (Some(sha), None) => format!("{} ({})", VERSION, sha),
            _ => VERSION.to_string(),
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_version_string_starts_with_version() {
            assert!(version_string().starts_with(VERSION));
        }
    }
}

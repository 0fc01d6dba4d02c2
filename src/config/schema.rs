// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration schema definitions.
//!
//! Defines all configuration structures that can be loaded from formcheck.toml.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::dom::Selector;
use crate::error::{ConfigError, FormError, Result};

/// The main configuration structure for formcheck.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FormcheckConfig {
    /// Which elements take part in validation and the markers the engine toggles.
    pub validation: ValidationConfig,

    /// Custom rule constants.
    pub rules: RuleSettings,

    /// Modal open/close configuration.
    pub modal: ModalSettings,
}

impl FormcheckConfig {
    /// Load configuration from the default locations.
    pub fn load() -> Result<Self> {
        super::loader::load_config()
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        super::loader::load_config_from(path)
    }

    /// Check cross-field constraints serde cannot express.
    pub fn validate(&self) -> Result<()> {
        let rules = &self.rules;
        if rules.min_length == 0 {
            return Err(invalid("rules.min_length", "must be at least 1"));
        }
        for (key, max) in [
            ("rules.name_max_length", rules.name_max_length),
            ("rules.default_max_length", rules.default_max_length),
        ] {
            if max < rules.min_length {
                return Err(invalid(
                    key,
                    &format!("{} is below rules.min_length ({})", max, rules.min_length),
                ));
            }
        }
        if rules.message_attribute.trim().is_empty() {
            return Err(invalid("rules.message_attribute", "must not be empty"));
        }
        if self.modal.close_key.is_empty() {
            return Err(invalid("modal.close_key", "must not be empty"));
        }
        Ok(())
    }
}

fn invalid(key: &str, message: &str) -> FormError {
    FormError::Config(ConfigError::InvalidValue {
        key: key.to_string(),
        message: message.to_string(),
    })
}

/// A CSS class name the engine adds or removes.
///
/// Always non-empty and free of whitespace, so it names exactly one class.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClassToken(String);

impl ClassToken {
    pub fn new(token: &str) -> std::result::Result<Self, ConfigError> {
        if token.is_empty() || token.chars().any(char::is_whitespace) {
            return Err(ConfigError::InvalidClassToken {
                token: token.to_string(),
            });
        }
        Ok(Self(token.to_string()))
    }

    /// Build a token from a literal known to be valid.
    pub(crate) fn known(token: &'static str) -> Self {
        debug_assert!(!token.is_empty() && !token.contains(char::is_whitespace));
        Self(token.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ClassToken {
    type Error = ConfigError;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<ClassToken> for String {
    fn from(token: ClassToken) -> Self {
        token.0
    }
}

impl fmt::Display for ClassToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ClassToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Validation engine configuration.
///
/// Keys also accept the camelCase spelling (`formSelector`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Forms to scan.
    #[serde(alias = "formSelector")]
    pub form_selector: Selector,

    /// Fields inside each form.
    #[serde(alias = "inputSelector")]
    pub input_selector: Selector,

    /// The submit control inside each form.
    #[serde(alias = "submitButtonSelector")]
    pub submit_button_selector: Selector,

    /// Added to a disabled submit control.
    #[serde(alias = "inactiveButtonClass")]
    pub inactive_button_class: ClassToken,

    /// Added to a field with an error.
    #[serde(alias = "inputErrorClass")]
    pub input_error_class: ClassToken,

    /// Added to a visible error label.
    #[serde(alias = "errorClass")]
    pub error_class: ClassToken,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            form_selector: Selector::class("popup__form"),
            input_selector: Selector::class("popup__input"),
            submit_button_selector: Selector::class("popup__button"),
            inactive_button_class: ClassToken::known("popup__button_disabled"),
            input_error_class: ClassToken::known("popup__input_type_error"),
            error_class: ClassToken::known("popup__error_visible"),
        }
    }
}

/// Language of the engine's own messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// Russian (default)
    #[default]
    Ru,
    /// English
    En,
}

/// Custom rule constants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSettings {
    /// Minimum value length for custom-pattern fields.
    pub min_length: usize,

    /// Maximum length for name-like fields.
    pub name_max_length: usize,

    /// Maximum length for every other custom-pattern field.
    pub default_max_length: usize,

    /// Class marking a field as name-like.
    pub name_like_class: ClassToken,

    /// Attribute that opts a field into the custom rules and carries its
    /// pattern-mismatch message.
    pub message_attribute: String,

    /// Language of the required and length messages.
    pub locale: Locale,
}

impl Default for RuleSettings {
    fn default() -> Self {
        Self {
            min_length: 2,
            name_max_length: 40,
            default_max_length: 30,
            name_like_class: ClassToken::known("popup__input_type_name"),
            message_attribute: "data-error-message".to_string(),
            locale: Locale::Ru,
        }
    }
}

/// Modal configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModalSettings {
    /// Popups to register close handlers on.
    pub popup_selector: Selector,

    /// Class marking the open popup.
    pub opened_class: ClassToken,

    /// Close button inside a popup.
    pub close_button_selector: Selector,

    /// Class added to the body while a popup is open.
    pub body_lock_class: ClassToken,

    /// Key that closes the open popup.
    pub close_key: String,
}

impl Default for ModalSettings {
    fn default() -> Self {
        Self {
            popup_selector: Selector::class("popup"),
            opened_class: ClassToken::known("popup_is-opened"),
            close_button_selector: Selector::class("popup__close"),
            body_lock_class: ClassToken::known("body_no-scroll"),
            close_key: "Escape".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_token_rejects_whitespace() {
        assert!(ClassToken::new("popup__input").is_ok());
        assert!(ClassToken::new("").is_err());
        assert!(ClassToken::new("two classes").is_err());
    }

    #[test]
    fn test_default_validation_config() {
        let config = ValidationConfig::default();
        assert_eq!(config.form_selector.as_str(), ".popup__form");
        assert_eq!(config.input_selector.as_str(), ".popup__input");
        assert_eq!(config.submit_button_selector.as_str(), ".popup__button");
        assert_eq!(config.inactive_button_class.as_str(), "popup__button_disabled");
        assert_eq!(config.input_error_class.as_str(), "popup__input_type_error");
        assert_eq!(config.error_class.as_str(), "popup__error_visible");
    }

    #[test]
    fn test_default_selector_matches_parsed() {
        assert_eq!(
            Selector::class("popup__form"),
            Selector::parse(".popup__form").unwrap()
        );
    }

    #[test]
    fn test_validate_rejects_inverted_bounds() {
        let mut config = FormcheckConfig::default();
        assert!(config.validate().is_ok());

        config.rules.default_max_length = 1;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("rules.default_max_length"));
    }
}

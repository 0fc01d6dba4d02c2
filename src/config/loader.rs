// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration loading.

use crate::error::{ConfigError, FormError, Result};
use std::path::{Path, PathBuf};

use super::schema::FormcheckConfig;

/// Configuration file names to search for, in order of priority.
const CONFIG_FILES: &[&str] = &["formcheck.toml", ".formcheck.toml", ".config/formcheck.toml"];

/// Find the configuration file in the current directory or parent directories.
pub fn find_config_file() -> Option<PathBuf> {
    let current_dir = std::env::current_dir().ok()?;
    find_config_file_from(&current_dir)
}

/// Find the configuration file starting from a specific directory.
pub fn find_config_file_from(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        for config_name in CONFIG_FILES {
            let config_path = current.join(config_name);
            if config_path.exists() {
                return Some(config_path);
            }
        }

        if !current.pop() {
            break;
        }
    }

    if let Some(home) = dirs::home_dir() {
        for config_name in CONFIG_FILES {
            let config_path = home.join(config_name);
            if config_path.exists() {
                return Some(config_path);
            }
        }
    }

    // XDG config directory
    if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join("formcheck").join("config.toml");
        if config_path.exists() {
            return Some(config_path);
        }
    }

    None
}

/// Load configuration from the default locations.
pub fn load_config() -> Result<FormcheckConfig> {
    match find_config_file() {
        Some(path) => load_config_from(&path),
        None => {
            tracing::debug!("No configuration file found, using defaults");
            Ok(FormcheckConfig::default())
        }
    }
}

/// Load configuration from a specific path.
pub fn load_config_from(path: &Path) -> Result<FormcheckConfig> {
    tracing::debug!("Loading configuration from: {:?}", path);

    if !path.exists() {
        return Err(FormError::Config(ConfigError::NotFound {
            path: path.to_path_buf(),
        }));
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        FormError::Config(ConfigError::ParseError {
            message: format!("Failed to read config file: {}", e),
        })
    })?;

    parse_config(&content)
}

/// Parse and validate configuration from a TOML string.
pub fn parse_config(content: &str) -> Result<FormcheckConfig> {
    let config: FormcheckConfig = toml::from_str(content).map_err(|e| {
        FormError::Config(ConfigError::ParseError {
            message: format!("Failed to parse TOML: {}", e),
        })
    })?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Locale;

    #[test]
    fn test_parse_minimal_config() {
        let config = parse_config("").unwrap();
        assert_eq!(config.rules.name_max_length, 40);
        assert_eq!(config.validation.form_selector.as_str(), ".popup__form");
    }

    #[test]
    fn test_parse_custom_config() {
        let toml = r#"
[validation]
form_selector = "form.card-form"
input_error_class = "field--invalid"

[rules]
default_max_length = 50
locale = "en"

[modal]
close_key = "Esc"
"#;
        let config = parse_config(toml).unwrap();
        assert_eq!(config.validation.form_selector.as_str(), "form.card-form");
        assert_eq!(config.validation.input_error_class.as_str(), "field--invalid");
        assert_eq!(config.validation.input_selector.as_str(), ".popup__input");
        assert_eq!(config.rules.default_max_length, 50);
        assert_eq!(config.rules.locale, Locale::En);
        assert_eq!(config.modal.close_key, "Esc");
    }

    #[test]
    fn test_parse_camel_case_keys() {
        let toml = r#"
[validation]
formSelector = ".popup__form"
inputSelector = ".popup__input"
submitButtonSelector = ".popup__button"
inactiveButtonClass = "popup__button_disabled"
inputErrorClass = "popup__input_type_error"
errorClass = "popup__error_visible"
"#;
        let config = parse_config(toml).unwrap();
        assert_eq!(config.validation, crate::config::ValidationConfig::default());
    }

    #[test]
    fn test_rejects_bad_selector() {
        let err = parse_config("[validation]\nform_selector = \".a > .b\"\n").unwrap_err();
        assert!(err.to_string().contains("form_selector"));
    }

    #[test]
    fn test_unterminated_selector_is_named() {
        let err = parse_config("[validation]\ninput_selector = \"[type=text\"\n").unwrap_err();
        assert!(err.to_string().contains("Unterminated attribute selector"));
    }

    #[test]
    fn test_rejects_bad_class_token() {
        let err = parse_config("[validation]\nerror_class = \"two words\"\n").unwrap_err();
        assert!(err.to_string().contains("two words"));
    }

    #[test]
    fn test_rejects_inverted_bounds() {
        let err = parse_config("[rules]\nmin_length = 50\n").unwrap_err();
        assert!(matches!(
            err,
            FormError::Config(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_config_from(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, FormError::Config(ConfigError::NotFound { .. })));
    }

    #[test]
    fn test_find_config_file_from_parent() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("formcheck.toml"), "").unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let found = find_config_file_from(&nested).unwrap();
        assert_eq!(found, dir.path().join("formcheck.toml"));
    }
}

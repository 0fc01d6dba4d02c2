// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Per-field validation rules.
//!
//! Rules run in a fixed priority order and the first failure wins:
//! required, length, pattern (custom-pattern fields only), then the
//! platform's native constraints.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use crate::config::{Locale, RuleSettings};

use super::host::FormHost;

lazy_static! {
    /// Latin and Cyrillic letters, space and hyphen.
    static ref NAME_PATTERN: Regex = Regex::new(r"^[a-zA-Zа-яА-ЯёЁ \-]+$").unwrap();
}

/// Which length ceiling applies to a custom-pattern field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LengthClass {
    NameLike,
    Other,
}

/// Why a field is currently invalid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationFailure {
    RequiredFieldEmpty,
    LengthOutOfRange { min: usize, max: usize },
    PatternMismatch { message: String },
    NativeConstraintViolation { message: String },
}

impl ValidationFailure {
    /// Short code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            Self::RequiredFieldEmpty => "required",
            Self::LengthOutOfRange { .. } => "length",
            Self::PatternMismatch { .. } => "pattern",
            Self::NativeConstraintViolation { .. } => "native",
        }
    }

    /// The text shown in the field's error label.
    pub fn message(&self, locale: Locale) -> String {
        match (self, locale) {
            (Self::RequiredFieldEmpty, Locale::Ru) => "Обязательное поле".to_string(),
            (Self::RequiredFieldEmpty, Locale::En) => "Required field".to_string(),
            (Self::LengthOutOfRange { min, max }, Locale::Ru) => {
                format!("Должно быть от {} до {} символов", min, max)
            }
            (Self::LengthOutOfRange { min, max }, Locale::En) => {
                format!("Must be between {} and {} characters", min, max)
            }
            (Self::PatternMismatch { message }, _) => message.clone(),
            (Self::NativeConstraintViolation { message }, _) => message.clone(),
        }
    }
}

/// The custom rule set plus native fallback.
#[derive(Debug, Clone)]
pub struct FieldRules {
    settings: RuleSettings,
}

impl FieldRules {
    pub fn new(settings: RuleSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &RuleSettings {
        &self.settings
    }

    pub fn locale(&self) -> Locale {
        self.settings.locale
    }

    /// The custom pattern-mismatch message, when the field opts into custom rules.
    pub fn custom_message<'h, H: FormHost>(&self, host: &'h H, field: H::Node) -> Option<&'h str> {
        host.attribute(field, &self.settings.message_attribute)
    }

    pub fn length_class<H: FormHost>(&self, host: &H, field: H::Node) -> LengthClass {
        if host.has_class(field, self.settings.name_like_class.as_str()) {
            LengthClass::NameLike
        } else {
            LengthClass::Other
        }
    }

    /// Length bounds for a custom-pattern field.
    pub fn bounds(&self, class: LengthClass) -> (usize, usize) {
        let max = match class {
            LengthClass::NameLike => self.settings.name_max_length,
            LengthClass::Other => self.settings.default_max_length,
        };
        (self.settings.min_length, max)
    }

    /// Run every rule against the field's current value.
    pub fn check<H: FormHost>(&self, host: &H, field: H::Node) -> Option<ValidationFailure> {
        if let Some(message) = self.custom_message(host, field) {
            let (min, max) = self.bounds(self.length_class(host, field));
            if let Some(failure) = check_custom(host.value(field), min, max, message) {
                return Some(failure);
            }
        }

        let native = host.native_validity(field);
        if !native.valid {
            return Some(ValidationFailure::NativeConstraintViolation {
                message: native.message,
            });
        }

        None
    }
}

/// The custom rules for one value.
///
/// Emptiness is judged on the trimmed value while the length bounds apply
/// to the raw value, so `" a"` passes the length rule. Lengths are UTF-16
/// code units, the unit form fields report.
pub fn check_custom(value: &str, min: usize, max: usize, message: &str) -> Option<ValidationFailure> {
    if is_blank(value) {
        return Some(ValidationFailure::RequiredFieldEmpty);
    }

    let len = value.encode_utf16().count();
    if len < min || len > max {
        return Some(ValidationFailure::LengthOutOfRange { min, max });
    }

    if !NAME_PATTERN.is_match(value) {
        return Some(ValidationFailure::PatternMismatch {
            message: message.to_string(),
        });
    }

    None
}

/// Whitespace-only, counting the byte order mark as whitespace.
fn is_blank(value: &str) -> bool {
    value
        .trim_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}')
        .is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    const MSG: &str = "Разрешены только латинские, кириллические буквы, знаки дефиса и пробелы";

    #[test]
    fn test_empty_wins_over_everything() {
        assert_eq!(check_custom("", 2, 40, MSG), Some(ValidationFailure::RequiredFieldEmpty));
        // " " is also too short.
        assert_eq!(check_custom(" ", 2, 40, MSG), Some(ValidationFailure::RequiredFieldEmpty));
        assert_eq!(
            check_custom("   \t  ", 2, 40, MSG),
            Some(ValidationFailure::RequiredFieldEmpty)
        );
    }

    #[test]
    fn test_name_like_bounds() {
        assert_eq!(
            check_custom("a", 2, 40, MSG),
            Some(ValidationFailure::LengthOutOfRange { min: 2, max: 40 })
        );
        assert_eq!(check_custom("ab", 2, 40, MSG), None);
        assert_eq!(check_custom(&"a".repeat(40), 2, 40, MSG), None);
        assert_eq!(
            check_custom(&"a".repeat(41), 2, 40, MSG),
            Some(ValidationFailure::LengthOutOfRange { min: 2, max: 40 })
        );
    }

    #[test]
    fn test_other_bounds() {
        assert_eq!(check_custom(&"a".repeat(30), 2, 30, MSG), None);
        assert_eq!(
            check_custom(&"a".repeat(31), 2, 30, MSG),
            Some(ValidationFailure::LengthOutOfRange { min: 2, max: 30 })
        );
    }

    #[test]
    fn test_length_wins_over_pattern() {
        assert_eq!(
            check_custom("1", 2, 30, MSG),
            Some(ValidationFailure::LengthOutOfRange { min: 2, max: 30 })
        );
    }

    #[test]
    fn test_length_counts_utf16_units() {
        let cyrillic = "Ж".repeat(30);
        assert!(cyrillic.len() > 30);
        assert_eq!(check_custom(&cyrillic, 2, 30, MSG), None);

        // Each emoji is a surrogate pair.
        assert_eq!(
            check_custom(&"😀".repeat(20), 2, 30, MSG),
            Some(ValidationFailure::LengthOutOfRange { min: 2, max: 30 })
        );
        assert_eq!(
            check_custom("😀", 2, 30, MSG),
            Some(ValidationFailure::PatternMismatch {
                message: MSG.to_string()
            })
        );
    }

    #[test]
    fn test_byte_order_mark_is_blank() {
        assert_eq!(
            check_custom("\u{FEFF}\u{FEFF}", 2, 30, MSG),
            Some(ValidationFailure::RequiredFieldEmpty)
        );
        assert_eq!(
            check_custom("\u{FEFF} \u{A0}", 2, 30, MSG),
            Some(ValidationFailure::RequiredFieldEmpty)
        );
    }

    #[test]
    fn test_length_check_counts_untrimmed_value() {
        // Trimmed this is one character, but the raw value has two.
        assert_eq!(check_custom(" a", 2, 30, MSG), None);
        assert_eq!(
            check_custom(&format!("{} ", "a".repeat(30)), 2, 30, MSG),
            Some(ValidationFailure::LengthOutOfRange { min: 2, max: 30 })
        );
    }

    #[test]
    fn test_pattern() {
        assert_eq!(
            check_custom("Café", 2, 40, MSG),
            Some(ValidationFailure::PatternMismatch {
                message: MSG.to_string()
            })
        );
        assert_eq!(check_custom("Иван-Петров", 2, 40, MSG), None);
        assert_eq!(check_custom("Жак-Ив Кусто", 2, 40, MSG), None);
        assert_eq!(check_custom("Ёлка ёлка", 2, 40, MSG), None);
        assert!(check_custom("R2-D2", 2, 40, MSG).is_some());
    }

    #[test]
    fn test_messages() {
        let length = ValidationFailure::LengthOutOfRange { min: 2, max: 40 };
        assert_eq!(length.message(Locale::Ru), "Должно быть от 2 до 40 символов");
        assert_eq!(length.message(Locale::En), "Must be between 2 and 40 characters");
        assert_eq!(ValidationFailure::RequiredFieldEmpty.message(Locale::Ru), "Обязательное поле");
        assert_eq!(ValidationFailure::RequiredFieldEmpty.message(Locale::En), "Required field");

        let native = ValidationFailure::NativeConstraintViolation {
            message: "Please enter a URL.".to_string(),
        };
        assert_eq!(native.message(Locale::Ru), "Please enter a URL.");
        assert_eq!(native.code(), "native");
    }

    #[test]
    fn test_bounds_follow_settings() {
        let rules = FieldRules::new(RuleSettings::default());
        assert_eq!(rules.bounds(LengthClass::NameLike), (2, 40));
        assert_eq!(rules.bounds(LengthClass::Other), (2, 30));
    }
}

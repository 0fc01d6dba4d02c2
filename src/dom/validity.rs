// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Native constraint validation for the in-memory document.
//!
//! This models what a browser computes for `element.validity` and
//! `element.validationMessage`, limited to the constraints text inputs
//! use: `required`, `type=email`, `type=url`, `pattern`, `minlength`
//! and `maxlength`.

use regex::Regex;
use serde::Serialize;

use super::document::Element;

/// The outcome of native constraint validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NativeValidity {
    pub valid: bool,
    pub message: String,
}

impl NativeValidity {
    pub fn valid() -> Self {
        Self {
            valid: true,
            message: String::new(),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: message.into(),
        }
    }
}

/// Which constraint failed, first one wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintViolation {
    ValueMissing,
    TypeMismatch(InputKind),
    PatternMismatch,
    TooShort { min: usize, len: usize },
    TooLong { max: usize, len: usize },
}

impl ConstraintViolation {
    pub fn message(&self) -> String {
        match self {
            Self::ValueMissing => "Please fill out this field.".to_string(),
            Self::TypeMismatch(InputKind::Email) => "Please enter an email address.".to_string(),
            Self::TypeMismatch(InputKind::Url) => "Please enter a URL.".to_string(),
            Self::TypeMismatch(_) => "Please enter a valid value.".to_string(),
            Self::PatternMismatch => "Please match the requested format.".to_string(),
            Self::TooShort { min, len } => format!(
                "Please lengthen this text to {} characters or more (you are currently using {} characters).",
                min, len
            ),
            Self::TooLong { max, len } => format!(
                "Please shorten this text to {} characters or less (you are currently using {} characters).",
                max, len
            ),
        }
    }
}

/// Input types with distinct validation behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Text,
    Email,
    Url,
    Other,
}

impl InputKind {
    pub fn parse(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "" | "text" | "search" | "tel" | "password" => Self::Text,
            "email" => Self::Email,
            "url" => Self::Url,
            _ => Self::Other,
        }
    }

    fn checks_text_constraints(self) -> bool {
        !matches!(self, Self::Other)
    }
}

/// Compute the native validity of an element.
pub fn native_validity(element: &Element) -> NativeValidity {
    match first_violation(element) {
        Some(violation) => NativeValidity::invalid(violation.message()),
        None => NativeValidity::valid(),
    }
}

/// Find the first failing constraint, if any.
pub fn first_violation(element: &Element) -> Option<ConstraintViolation> {
    if element.disabled || !participates(element) {
        return None;
    }

    let kind = InputKind::parse(element.attribute("type").unwrap_or(""));
    // email and url values are sanitized before any constraint sees them.
    let value = match kind {
        InputKind::Email | InputKind::Url => element.value.trim_matches(|c: char| c.is_ascii_whitespace()),
        _ => element.value.as_str(),
    };

    if value.is_empty() {
        return element
            .attribute("required")
            .map(|_| ConstraintViolation::ValueMissing);
    }

    match kind {
        InputKind::Email if !is_simple_email(value) => {
            return Some(ConstraintViolation::TypeMismatch(kind));
        }
        InputKind::Url if url::Url::parse(value).is_err() => {
            return Some(ConstraintViolation::TypeMismatch(kind));
        }
        _ => {}
    }

    if !kind.checks_text_constraints() && !element.tag.eq_ignore_ascii_case("textarea") {
        return None;
    }

    if let Some(pattern) = element.attribute("pattern").filter(|p| !p.is_empty()) {
        // An unparsable pattern is ignored, as browsers do.
        if let Ok(regex) = Regex::new(&format!("^(?:{})$", pattern)) {
            if !regex.is_match(value) {
                return Some(ConstraintViolation::PatternMismatch);
            }
        }
    }

    // minlength and maxlength count UTF-16 code units.
    let len = value.encode_utf16().count();
    if let Some(min) = parse_length(element.attribute("minlength")) {
        if len < min {
            return Some(ConstraintViolation::TooShort { min, len });
        }
    }
    if let Some(max) = parse_length(element.attribute("maxlength")) {
        if len > max {
            return Some(ConstraintViolation::TooLong { max, len });
        }
    }

    None
}

fn participates(element: &Element) -> bool {
    if element.tag.eq_ignore_ascii_case("textarea") {
        return true;
    }
    if !element.tag.eq_ignore_ascii_case("input") {
        return false;
    }
    let kind = element.attribute("type").unwrap_or("text").to_ascii_lowercase();
    !matches!(kind.as_str(), "button" | "submit" | "reset" | "hidden" | "image")
}

fn parse_length(raw: Option<&str>) -> Option<usize> {
    raw.and_then(|v| v.trim().parse::<usize>().ok())
}

fn is_email_local_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || "+-_.!#$%&'*/=?^`{|}~".contains(ch)
}

fn is_domain_label(label: &str) -> bool {
    !label.is_empty()
        && label.len() <= 63
        && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        && !label.starts_with('-')
        && !label.ends_with('-')
}

fn is_simple_email(value: &str) -> bool {
    let Some((local, domain)) = value.trim().split_once('@') else {
        return false;
    };
    !local.is_empty()
        && local.chars().all(is_email_local_char)
        && domain.split('.').all(is_domain_label)
}

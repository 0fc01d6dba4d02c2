// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Snapshots of form state for display.

use console::{style, Style};
use serde::Serialize;

use crate::cli::args::OutputFormat;

/// State of one field.
#[derive(Debug, Clone, Serialize)]
pub struct FieldReport {
    pub id: Option<String>,
    pub value: String,
    /// Whether the field carries the input error class.
    pub invalid: bool,
    /// Text of the field's error label, when it has one and it is not blank.
    pub message: Option<String>,
    /// Failure category (`required`, `length`, `pattern`, `native`) of an invalid field.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<&'static str>,
}

impl FieldReport {
    /// Format the field for terminal output.
    pub fn format(&self) -> String {
        let (icon, name_style) = if self.invalid {
            (style("✗").red().bold(), Style::new().red())
        } else {
            (style("✓").green().bold(), Style::new().green())
        };

        let mut output = format!(
            "{} {} {:?}",
            icon,
            name_style.apply_to(self.id.as_deref().unwrap_or("<no id>")),
            self.value
        );

        if let Some(ref message) = self.message {
            output.push_str(&format!("\n    {} {}", style("→").dim(), style(message).dim()));
        }
        if let Some(code) = self.code {
            output.push_str(&format!(" {}", style(format!("[{}]", code)).dim()));
        }

        output
    }
}

/// State of one wired form.
#[derive(Debug, Clone, Serialize)]
pub struct FormReport {
    pub id: Option<String>,
    pub fields: Vec<FieldReport>,
    /// Enabled state of the submit control; `None` when the form has none.
    pub submit_enabled: Option<bool>,
}

impl FormReport {
    /// Whether the form can be submitted right now.
    pub fn can_submit(&self) -> bool {
        self.submit_enabled.unwrap_or(true) && !self.fields.iter().any(|f| f.invalid)
    }

    pub fn error_count(&self) -> usize {
        self.fields.iter().filter(|f| f.invalid).count()
    }

    /// Format the form for terminal output.
    pub fn format(&self) -> String {
        let status = if self.can_submit() {
            style("✓").green().bold()
        } else {
            style("✗").red().bold()
        };
        let submit = match self.submit_enabled {
            Some(true) => style("submit enabled").green(),
            Some(false) => style("submit disabled").red(),
            None => style("no submit control").dim(),
        };

        let mut output = format!(
            "{} {} {}",
            status,
            style(self.id.as_deref().unwrap_or("<no id>")).cyan(),
            submit
        );
        for field in &self.fields {
            output.push_str(&format!("\n  {}", field.format()));
        }
        output
    }
}

/// State of every wired form on a page.
#[derive(Debug, Clone, Serialize)]
pub struct PageReport {
    pub forms: Vec<FormReport>,
}

impl PageReport {
    /// Forms that cannot be submitted.
    pub fn blocked(&self) -> impl Iterator<Item = &FormReport> {
        self.forms.iter().filter(|f| !f.can_submit())
    }

    /// Print the report to stdout.
    pub fn print(&self, format: Option<OutputFormat>) {
        match format {
            Some(OutputFormat::Json) => self.print_json(),
            _ => self.print_text(),
        }
    }

    fn print_text(&self) {
        if self.forms.is_empty() {
            println!("{}", style("No forms with fields found").dim());
        }
        for form in &self.forms {
            println!("{}", form.format());
        }
    }

    fn print_json(&self) {
        println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
    }

    /// Get a summary string.
    pub fn summary(&self) -> String {
        let blocked = self.blocked().count();
        if blocked == 0 {
            format!("{} form(s) ready to submit", self.forms.len())
        } else {
            format!("{} of {} form(s) blocked", blocked, self.forms.len())
        }
    }
}

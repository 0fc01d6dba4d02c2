// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Error and submit-control presentation.

use crate::config::ValidationConfig;

use super::host::FormHost;

/// The error label for a field, located as `#{fieldId}-error` inside the form.
pub fn error_label<H: FormHost>(host: &H, form: H::Node, field: H::Node) -> Option<H::Node> {
    let id = host.element_id(field)?;
    host.find_by_id(form, &format!("{}-error", id))
}

pub fn show_input_error<H: FormHost>(
    host: &mut H,
    form: H::Node,
    field: H::Node,
    message: &str,
    config: &ValidationConfig,
) {
    host.add_class(field, config.input_error_class.as_str());
    if let Some(label) = error_label(&*host, form, field) {
        host.set_text(label, message);
        host.add_class(label, config.error_class.as_str());
    }
}

pub fn hide_input_error<H: FormHost>(
    host: &mut H,
    form: H::Node,
    field: H::Node,
    config: &ValidationConfig,
) {
    host.remove_class(field, config.input_error_class.as_str());
    if let Some(label) = error_label(&*host, form, field) {
        host.set_text(label, "");
        host.remove_class(label, config.error_class.as_str());
    }
}

pub fn has_invalid_input<H: FormHost>(host: &H, fields: &[H::Node], config: &ValidationConfig) -> bool {
    fields
        .iter()
        .any(|&field| host.has_class(field, config.input_error_class.as_str()))
}

pub fn disable_submit_button<H: FormHost>(host: &mut H, button: H::Node, config: &ValidationConfig) {
    host.add_class(button, config.inactive_button_class.as_str());
    host.set_disabled(button, true);
}

pub fn enable_submit_button<H: FormHost>(host: &mut H, button: H::Node, config: &ValidationConfig) {
    host.remove_class(button, config.inactive_button_class.as_str());
    host.set_disabled(button, false);
}

/// Enable the submit control iff no field carries the error class.
pub fn toggle_button_state<H: FormHost>(
    host: &mut H,
    fields: &[H::Node],
    button: Option<H::Node>,
    config: &ValidationConfig,
) {
    let Some(button) = button else {
        return;
    };
    if has_invalid_input(&*host, fields, config) {
        disable_submit_button(host, button, config);
    } else {
        enable_submit_button(host, button, config);
    }
}

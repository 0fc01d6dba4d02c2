// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Validation engine: form discovery, input handling and reset.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use crate::config::ValidationConfig;

use super::display::{disable_submit_button, hide_input_error, show_input_error, toggle_button_state};
use super::host::FormHost;
use super::rules::{FieldRules, ValidationFailure};

/// What the host should do with a submit event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitDisposition {
    /// Suppress the platform's navigation; application listeners handle it.
    PreventDefault,
    /// The form is not managed by the engine.
    Default,
}

/// A form the engine has attached to.
#[derive(Debug, Clone)]
pub struct WiredForm<N> {
    pub form: N,
    pub fields: Vec<N>,
    pub submit: Option<N>,
}

/// Input-time validation for every matching form of a host.
#[derive(Debug, Clone)]
pub struct ValidationEngine<N> {
    config: ValidationConfig,
    rules: FieldRules,
    forms: Vec<WiredForm<N>>,
    by_field: HashMap<N, usize>,
}

impl<N: Copy + Eq + Hash + Debug> ValidationEngine<N> {
    /// Scan the host for forms and attach to each one that has fields.
    ///
    /// Every attached form starts with its submit control disabled.
    pub fn enable<H: FormHost<Node = N>>(host: &mut H, config: ValidationConfig, rules: FieldRules) -> Self {
        let mut engine = Self {
            config,
            rules,
            forms: Vec::new(),
            by_field: HashMap::new(),
        };

        for form in host.query_all(None, &engine.config.form_selector) {
            let fields = host.query_all(Some(form), &engine.config.input_selector);
            if fields.is_empty() {
                tracing::debug!("Skipping form {:?}: no fields match {}", form, engine.config.input_selector);
                continue;
            }

            let submit = host.query(form, &engine.config.submit_button_selector);
            match submit {
                Some(button) => disable_submit_button(host, button, &engine.config),
                None => tracing::debug!(
                    "Form {:?} has no control matching {}",
                    form,
                    engine.config.submit_button_selector
                ),
            }

            let index = engine.forms.len();
            for &field in &fields {
                engine.by_field.entry(field).or_insert(index);
            }
            tracing::debug!("Wired form {:?} with {} field(s)", form, fields.len());
            engine.forms.push(WiredForm { form, fields, submit });
        }

        engine
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    pub fn rules(&self) -> &FieldRules {
        &self.rules
    }

    /// Forms the engine attached to, in document order.
    pub fn wired_forms(&self) -> &[WiredForm<N>] {
        &self.forms
    }

    pub fn wired_form(&self, form: N) -> Option<&WiredForm<N>> {
        self.forms.iter().find(|wired| wired.form == form)
    }

    pub fn is_wired(&self, form: N) -> bool {
        self.wired_form(form).is_some()
    }

    /// The wired form a field belongs to.
    pub fn form_of(&self, field: N) -> Option<&WiredForm<N>> {
        self.by_field.get(&field).map(|&index| &self.forms[index])
    }

    /// React to a value change of `field`.
    ///
    /// Returns `false` when the field is not attached to any form.
    pub fn handle_input<H: FormHost<Node = N>>(&self, host: &mut H, field: N) -> bool {
        let Some(wired) = self.form_of(field) else {
            return false;
        };
        check_input_validity(host, wired.form, field, &self.config, &self.rules);
        toggle_button_state(host, &wired.fields, wired.submit, &self.config);
        true
    }

    pub fn handle_submit(&self, form: N) -> SubmitDisposition {
        if self.is_wired(form) {
            SubmitDisposition::PreventDefault
        } else {
            SubmitDisposition::Default
        }
    }
}

/// Validate one field and update its error display.
pub fn check_input_validity<H: FormHost>(
    host: &mut H,
    form: H::Node,
    field: H::Node,
    config: &ValidationConfig,
    rules: &FieldRules,
) -> Option<ValidationFailure> {
    let failure = rules.check(&*host, field);
    match failure {
        Some(ref failure) => {
            let message = failure.message(rules.locale());
            show_input_error(host, form, field, &message, config);
        }
        None => hide_input_error(host, form, field, config),
    }
    failure
}

/// Clear every error of `form` and disable its submit control.
///
/// A form without fields is left alone. Calling this repeatedly has the
/// same effect as calling it once.
pub fn clear_validation<H: FormHost>(host: &mut H, form: H::Node, config: &ValidationConfig) {
    let fields = host.query_all(Some(form), &config.input_selector);
    if fields.is_empty() {
        return;
    }

    tracing::trace!("Clearing validation state of {:?}", form);
    for field in fields {
        hide_input_error(host, form, field, config);
    }

    if let Some(button) = host.query(form, &config.submit_button_selector) {
        disable_submit_button(host, button, config);
    }
}

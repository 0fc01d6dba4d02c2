// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! A page: a document with validation and modals attached.

use crate::config::FormcheckConfig;
use crate::dom::{DispatchOutcome, Document, ElementId, Event};
use crate::error::{FormError, PageError, Result};
use crate::modal::ModalManager;
use crate::validation::{clear_validation, error_label, FieldRules, SubmitDisposition, ValidationEngine};

use super::report::{FieldReport, FormReport, PageReport};
use super::spec::PageSpec;

/// Owns the document and every listener attached to it.
#[derive(Debug, Clone)]
pub struct Page {
    doc: Document,
    engine: ValidationEngine<ElementId>,
    modals: ModalManager,
}

impl Page {
    /// Enable validation and install modal handling on `doc`.
    pub fn new(mut doc: Document, config: &FormcheckConfig) -> Self {
        let engine = ValidationEngine::enable(
            &mut doc,
            config.validation.clone(),
            FieldRules::new(config.rules.clone()),
        );
        let mut modals = ModalManager::install(config.modal.clone());
        let popups = modals.register_all(&doc);
        tracing::debug!(
            "Page ready: {} wired form(s), {} popup(s)",
            engine.wired_forms().len(),
            popups
        );
        Self { doc, engine, modals }
    }

    /// Build a page from its description.
    pub fn from_spec(spec: &PageSpec, config: &FormcheckConfig) -> Result<Self> {
        Ok(Self::new(spec.build()?, config))
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn engine(&self) -> &ValidationEngine<ElementId> {
        &self.engine
    }

    pub fn modals(&self) -> &ModalManager {
        &self.modals
    }

    /// Look up an element by id.
    pub fn element_by_id(&self, id: &str) -> Result<ElementId> {
        self.doc.get_element_by_id(id).ok_or_else(|| {
            FormError::Page(PageError::UnknownElement { id: id.to_string() })
        })
    }

    /// Look up a text field by id.
    pub fn field_by_id(&self, id: &str) -> Result<ElementId> {
        let node = self.element_by_id(id)?;
        if self.doc.element(node).is_field() {
            Ok(node)
        } else {
            Err(FormError::Page(PageError::NotAField { id: id.to_string() }))
        }
    }

    /// Route an event to whoever listens for it.
    pub fn dispatch(&mut self, event: &Event) -> DispatchOutcome {
        tracing::trace!("Dispatching {:?}", event);
        match event {
            Event::Input { target } => {
                if self.engine.handle_input(&mut self.doc, *target) {
                    DispatchOutcome::handled()
                } else {
                    DispatchOutcome::ignored()
                }
            }
            Event::Submit { form } => match self.engine.handle_submit(*form) {
                SubmitDisposition::PreventDefault => DispatchOutcome::prevented(),
                SubmitDisposition::Default => DispatchOutcome::ignored(),
            },
            Event::Click { target } => match self.modals.handle_click(&mut self.doc, *target) {
                Some(_) => DispatchOutcome::handled(),
                None => DispatchOutcome::ignored(),
            },
            Event::KeyDown { key } => match self.modals.handle_key(&mut self.doc, key) {
                Some(_) => DispatchOutcome::handled(),
                None => DispatchOutcome::ignored(),
            },
        }
    }

    /// Replace a field's value and dispatch the input event, as typing would.
    pub fn type_into(&mut self, field: ElementId, text: &str) -> DispatchOutcome {
        self.doc.set_value(field, text);
        self.dispatch(&Event::Input { target: field })
    }

    /// Show a form's popup with no stale errors from a previous session.
    ///
    /// With `reset`, field values go back to their defaults first.
    pub fn open_form_modal(&mut self, popup: ElementId, form: ElementId, reset: bool) {
        if reset {
            self.doc.reset_form(form);
        }
        self.modals.open(&mut self.doc, popup);
        clear_validation(&mut self.doc, form, self.engine.config());
    }

    /// The registered popup holding `node`, if any.
    pub fn popup_of(&self, node: ElementId) -> Option<ElementId> {
        self.doc
            .ancestors(node)
            .find(|&ancestor| self.modals.is_registered(ancestor))
    }

    pub fn close_modal(&mut self, popup: ElementId) {
        self.modals.close(&mut self.doc, popup);
    }

    /// Detach modal handling. Validation stays attached.
    pub fn teardown(&mut self) {
        self.modals.teardown();
    }

    /// Snapshot of one wired form.
    pub fn form_report(&self, form: ElementId) -> Option<FormReport> {
        let wired = self.engine.wired_form(form)?;
        let config = self.engine.config();

        let fields = wired
            .fields
            .iter()
            .map(|&field| {
                let element = self.doc.element(field);
                let message = error_label(&self.doc, form, field)
                    .map(|label| self.doc.element(label).text.clone())
                    .filter(|text| !text.is_empty());
                let invalid = element.has_class(config.input_error_class.as_str());
                // Only fields showing an error get a category.
                let code = invalid
                    .then(|| self.engine.rules().check(&self.doc, field))
                    .flatten()
                    .map(|failure| failure.code());
                FieldReport {
                    id: element.id.clone(),
                    value: element.value.clone(),
                    invalid,
                    message,
                    code,
                }
            })
            .collect();

        Some(FormReport {
            id: self.doc.element(form).id.clone(),
            fields,
            submit_enabled: wired.submit.map(|button| !self.doc.element(button).disabled),
        })
    }

    /// Snapshot of every wired form.
    pub fn report(&self) -> PageReport {
        PageReport {
            forms: self
                .engine
                .wired_forms()
                .iter()
                .filter_map(|wired| self.form_report(wired.form))
                .collect(),
        }
    }
}

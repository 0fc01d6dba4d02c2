// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Page descriptions.
//!
//! A page description is a TOML file listing popups and forms. Building
//! it yields a [`Document`] laid out the way the gallery page is: each
//! form optionally inside a popup, each field followed by its
//! `{id}-error` label, and the submit button last.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use crate::dom::{Document, Element, ElementId};
use crate::error::{FormError, PageError, Result, ResultExt};

fn default_popup_classes() -> Vec<String> {
    vec!["popup".to_string()]
}

fn default_form_classes() -> Vec<String> {
    vec!["popup__form".to_string()]
}

fn default_field_classes() -> Vec<String> {
    vec!["popup__input".to_string()]
}

fn default_button_classes() -> Vec<String> {
    vec!["popup__button".to_string()]
}

fn default_tag() -> String {
    "input".to_string()
}

fn default_true() -> bool {
    true
}

/// A whole page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PageSpec {
    pub title: Option<String>,
    pub popups: Vec<PopupSpec>,
    pub forms: Vec<FormSpec>,
}

/// A modal container.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopupSpec {
    pub id: String,
    #[serde(default = "default_popup_classes")]
    pub classes: Vec<String>,
    /// Whether the popup has a `.popup__close` button.
    #[serde(default = "default_true")]
    pub close_button: bool,
}

/// One form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormSpec {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    /// Id of the popup holding this form; top level when absent.
    #[serde(default)]
    pub popup: Option<String>,
    #[serde(default = "default_form_classes")]
    pub classes: Vec<String>,
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
    #[serde(default)]
    pub submit: Option<ButtonSpec>,
}

/// One input or textarea.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldSpec {
    pub id: String,
    #[serde(default = "default_tag")]
    pub tag: String,
    #[serde(default = "default_field_classes")]
    pub classes: Vec<String>,
    #[serde(rename = "type", default)]
    pub input_type: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub minlength: Option<usize>,
    #[serde(default)]
    pub maxlength: Option<usize>,
    #[serde(default)]
    pub pattern: Option<String>,
    /// Initial value, also restored by a form reset.
    #[serde(default)]
    pub value: String,
    /// Any other attributes, e.g. `data-error-message`.
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    /// Whether to create the `{id}-error` label.
    #[serde(default = "default_true")]
    pub error_label: bool,
}

/// A submit button.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ButtonSpec {
    #[serde(default = "default_button_classes")]
    pub classes: Vec<String>,
    #[serde(default)]
    pub text: String,
}

impl PageSpec {
    /// Load a page description from a file.
    pub fn load(path: &Path) -> Result<Self> {
        tracing::debug!("Loading page description from: {:?}", path);
        let content = std::fs::read_to_string(path).context(format!("reading {}", path.display()))?;
        Self::parse(&content)
    }

    /// Parse a page description from a TOML string.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| {
            FormError::Page(PageError::Parse {
                message: e.to_string(),
            })
        })
    }

    /// Build the document this description stands for.
    pub fn build(&self) -> Result<Document> {
        let mut doc = Document::new();
        let mut ids = IdSet::default();
        let mut popups: BTreeMap<&str, ElementId> = BTreeMap::new();

        for popup in &self.popups {
            ids.claim(&popup.id)?;
            let mut element = Element::new("div").with_id(&popup.id);
            for class in &popup.classes {
                element.add_class(class);
            }
            let node = doc.append(doc.body(), element);
            if popup.close_button {
                doc.append(node, Element::new("button").with_class("popup__close"));
            }
            popups.insert(popup.id.as_str(), node);
        }

        for form in &self.forms {
            ids.claim(&form.id)?;
            let parent = match form.popup.as_deref() {
                Some(popup_id) => *popups.get(popup_id).ok_or_else(|| {
                    FormError::Page(PageError::UnknownElement {
                        id: popup_id.to_string(),
                    })
                })?,
                None => doc.body(),
            };
            build_form(&mut doc, &mut ids, parent, form)?;
        }

        tracing::debug!(
            "Built page with {} popup(s), {} form(s), {} element(s)",
            self.popups.len(),
            self.forms.len(),
            doc.len()
        );
        Ok(doc)
    }
}

fn build_form(doc: &mut Document, ids: &mut IdSet, parent: ElementId, form: &FormSpec) -> Result<()> {
    let mut element = Element::new("form").with_id(&form.id);
    for class in &form.classes {
        element.add_class(class);
    }
    if let Some(ref name) = form.name {
        element.set_attribute("name", name);
    }
    element.set_attribute("novalidate", "");
    let node = doc.append(parent, element);

    for field in &form.fields {
        ids.claim(&field.id)?;
        doc.append(node, field.to_element());
        if field.error_label {
            let label_id = format!("{}-error", field.id);
            ids.claim(&label_id)?;
            doc.append(node, Element::new("span").with_id(label_id).with_class("popup__error"));
        }
    }

    if let Some(ref submit) = form.submit {
        let mut button = Element::new("button").with_attribute("type", "submit");
        for class in &submit.classes {
            button.add_class(class);
        }
        button.text = submit.text.clone();
        doc.append(node, button);
    }

    Ok(())
}

impl FieldSpec {
    fn to_element(&self) -> Element {
        let mut element = Element::new(&self.tag).with_id(&self.id);
        for class in &self.classes {
            element.add_class(class);
        }
        if let Some(ref kind) = self.input_type {
            element.set_attribute("type", kind);
        }
        if let Some(ref name) = self.name {
            element.set_attribute("name", name);
        }
        if let Some(ref placeholder) = self.placeholder {
            element.set_attribute("placeholder", placeholder);
        }
        if self.required {
            element.set_attribute("required", "");
        }
        if let Some(min) = self.minlength {
            element.set_attribute("minlength", &min.to_string());
        }
        if let Some(max) = self.maxlength {
            element.set_attribute("maxlength", &max.to_string());
        }
        if let Some(ref pattern) = self.pattern {
            element.set_attribute("pattern", pattern);
        }
        for (name, value) in &self.attributes {
            element.set_attribute(name, value);
        }
        element.value = self.value.clone();
        element.default_value = self.value.clone();
        element
    }
}

#[derive(Default)]
struct IdSet(HashSet<String>);

impl IdSet {
    fn claim(&mut self, id: &str) -> Result<()> {
        if self.0.insert(id.to_string()) {
            Ok(())
        } else {
            Err(FormError::Page(PageError::DuplicateId { id: id.to_string() }))
        }
    }
}

// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! In-memory document tree.
//!
//! Elements live in an arena owned by [`Document`] and are addressed by
//! [`ElementId`]. Ids are only handed out by the document that owns the
//! element, so indexing with one never goes out of bounds.

use std::collections::BTreeMap;
use std::fmt;

use super::selector::{Selector, SelectorSubject};

/// Identity of an element within its document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(usize);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.0)
    }
}

/// A single element.
#[derive(Debug, Clone, Default)]
pub struct Element {
    /// Lowercase tag name.
    pub tag: String,
    /// The `id` attribute.
    pub id: Option<String>,
    /// Class list in insertion order, without duplicates.
    pub classes: Vec<String>,
    /// Other attributes (`type`, `required`, `data-*`, ...).
    pub attributes: BTreeMap<String, String>,
    /// Current value of a form control.
    pub value: String,
    /// Value restored by a form reset.
    pub default_value: String,
    /// Text content.
    pub text: String,
    /// Disabled flag.
    pub disabled: bool,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.set_attribute(name, value);
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        if name == "id" {
            return self.id.as_deref();
        }
        self.attributes.get(name).map(String::as_str)
    }

    pub fn set_attribute(&mut self, name: &str, value: &str) {
        match name {
            "id" => self.id = Some(value.to_string()),
            "class" => {
                self.classes.clear();
                for class in value.split_whitespace() {
                    self.add_class(class);
                }
            }
            _ => {
                self.attributes.insert(name.to_string(), value.to_string());
            }
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    pub fn children(&self) -> &[ElementId] {
        &self.children
    }

    /// Whether this element is a text-entry control.
    pub fn is_field(&self) -> bool {
        matches!(self.tag.as_str(), "input" | "textarea")
    }
}

impl SelectorSubject for Element {
    fn tag_name(&self) -> &str {
        &self.tag
    }

    fn element_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn has_class(&self, class: &str) -> bool {
        Element::has_class(self, class)
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        Element::attribute(self, name)
    }
}

/// An element tree rooted at `<body>`.
#[derive(Debug, Clone)]
pub struct Document {
    elements: Vec<Element>,
}

impl Document {
    /// Create a document containing only an empty body.
    pub fn new() -> Self {
        Self {
            elements: vec![Element::new("body")],
        }
    }

    /// The root element.
    pub fn body(&self) -> ElementId {
        ElementId(0)
    }

    /// Append `element` as the last child of `parent`.
    pub fn append(&mut self, parent: ElementId, mut element: Element) -> ElementId {
        let id = ElementId(self.elements.len());
        element.parent = Some(parent);
        element.children.clear();
        self.elements.push(element);
        self.elements[parent.0].children.push(id);
        id
    }

    pub fn element(&self, id: ElementId) -> &Element {
        &self.elements[id.0]
    }

    pub fn element_mut(&mut self, id: ElementId) -> &mut Element {
        &mut self.elements[id.0]
    }

    /// Number of elements, body included.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.len() <= 1
    }

    /// Ancestors of `id`, nearest first.
    pub fn ancestors(&self, id: ElementId) -> Ancestors<'_> {
        Ancestors {
            document: self,
            next: self.element(id).parent,
        }
    }

    /// Whether `id` lies strictly inside `scope`.
    pub fn is_descendant_of(&self, id: ElementId, scope: ElementId) -> bool {
        self.ancestors(id).any(|ancestor_id| ancestor_id == scope)
    }

    pub fn matches(&self, id: ElementId, selector: &Selector) -> bool {
        let ancestors = self.ancestors(id).map(|a| self.element(a));
        selector.matches_with_ancestors(self.element(id), ancestors)
    }

    /// All descendants of `scope` (or of the whole document) matching
    /// `selector`, in document order. The scope itself is never included.
    pub fn query_selector_all(&self, scope: Option<ElementId>, selector: &Selector) -> Vec<ElementId> {
        let root = scope.unwrap_or_else(|| self.body());
        let mut found = Vec::new();
        let mut stack: Vec<ElementId> = self.element(root).children.iter().rev().copied().collect();

        while let Some(id) = stack.pop() {
            if self.matches(id, selector) {
                found.push(id);
            }
            stack.extend(self.element(id).children.iter().rev().copied());
        }

        found
    }

    pub fn query_selector(&self, scope: Option<ElementId>, selector: &Selector) -> Option<ElementId> {
        self.query_selector_all(scope, selector).into_iter().next()
    }

    /// Find the first element in document order whose id is `id`.
    pub fn get_element_by_id(&self, id: &str) -> Option<ElementId> {
        self.find_by_id_within(self.body(), id)
    }

    /// Like [`Document::get_element_by_id`] but limited to descendants of `scope`.
    pub fn find_by_id_within(&self, scope: ElementId, id: &str) -> Option<ElementId> {
        let mut stack: Vec<ElementId> = self.element(scope).children.iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            if self.element(current).id.as_deref() == Some(id) {
                return Some(current);
            }
            stack.extend(self.element(current).children.iter().rev().copied());
        }
        None
    }

    pub fn set_value(&mut self, id: ElementId, value: &str) {
        self.element_mut(id).value = value.to_string();
    }

    /// Restore every field inside `form` to its default value.
    pub fn reset_form(&mut self, form: ElementId) {
        let fields: Vec<ElementId> = (0..self.elements.len())
            .map(ElementId)
            .filter(|&id| self.element(id).is_field() && self.is_descendant_of(id, form))
            .collect();

        for id in fields {
            let element = self.element_mut(id);
            element.value = element.default_value.clone();
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over an element's ancestors.
#[derive(Clone)]
pub struct Ancestors<'a> {
    document: &'a Document,
    next: Option<ElementId>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = ElementId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.document.element(current).parent;
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (Document, ElementId, ElementId, ElementId) {
        let mut doc = Document::new();
        let popup = doc.append(doc.body(), Element::new("div").with_class("popup"));
        let form = doc.append(popup, Element::new("form").with_class("popup__form"));
        let input = doc.append(
            form,
            Element::new("input")
                .with_id("name")
                .with_class("popup__input")
                .with_attribute("type", "text"),
        );
        (doc, popup, form, input)
    }

    #[test]
    fn test_query_in_document_order() {
        let (mut doc, _, form, first) = sample();
        let second = doc.append(form, Element::new("input").with_class("popup__input"));
        let selector = Selector::parse(".popup__input").unwrap();

        assert_eq!(doc.query_selector_all(None, &selector), vec![first, second]);
        assert_eq!(doc.query_selector_all(Some(form), &selector), vec![first, second]);
    }

    #[test]
    fn test_query_excludes_scope() {
        let (doc, _, form, _) = sample();
        let selector = Selector::parse("form").unwrap();
        assert!(doc.query_selector_all(Some(form), &selector).is_empty());
        assert_eq!(doc.query_selector(None, &selector), Some(form));
    }

    #[test]
    fn test_descendant_selector_uses_ancestors() {
        let (doc, _, _, input) = sample();
        let selector = Selector::parse(".popup input").unwrap();
        assert!(doc.matches(input, &selector));
    }

    #[test]
    fn test_find_by_id_within_scope() {
        let (mut doc, popup, form, input) = sample();
        let other = doc.append(doc.body(), Element::new("span").with_id("elsewhere"));

        assert_eq!(doc.find_by_id_within(form, "name"), Some(input));
        assert_eq!(doc.find_by_id_within(popup, "elsewhere"), None);
        assert_eq!(doc.get_element_by_id("elsewhere"), Some(other));
    }

    #[test]
    fn test_class_list_has_no_duplicates() {
        let mut el = Element::new("INPUT");
        el.add_class("a");
        el.add_class("a");
        assert_eq!(el.tag, "input");
        assert_eq!(el.classes, vec!["a"]);
        el.remove_class("a");
        assert!(!el.has_class("a"));
    }

    #[test]
    fn test_reset_form_restores_defaults() {
        let (mut doc, _, form, input) = sample();
        doc.element_mut(input).default_value = "Жак".to_string();
        doc.set_value(input, "typed");
        doc.reset_form(form);
        assert_eq!(doc.element(input).value, "Жак");
    }
}

// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! The seam between the engine and whatever owns the elements.

use std::fmt::Debug;
use std::hash::Hash;

use crate::dom::{native_validity, Document, ElementId, NativeValidity, Selector};

/// Element access the validation engine needs from its host.
///
/// The engine only ever writes classes, the disabled flag and label text.
pub trait FormHost {
    /// Handle to one element.
    type Node: Copy + Eq + Hash + Debug;

    /// Elements matching `selector` in document order, inside `scope` when given.
    fn query_all(&self, scope: Option<Self::Node>, selector: &Selector) -> Vec<Self::Node>;

    /// First element matching `selector` inside `scope`.
    fn query(&self, scope: Self::Node, selector: &Selector) -> Option<Self::Node> {
        self.query_all(Some(scope), selector).into_iter().next()
    }

    /// Element with the given id inside `scope`.
    fn find_by_id(&self, scope: Self::Node, id: &str) -> Option<Self::Node>;

    fn element_id(&self, node: Self::Node) -> Option<&str>;
    fn value(&self, node: Self::Node) -> &str;
    fn attribute(&self, node: Self::Node, name: &str) -> Option<&str>;
    fn has_class(&self, node: Self::Node, class: &str) -> bool;
    fn add_class(&mut self, node: Self::Node, class: &str);
    fn remove_class(&mut self, node: Self::Node, class: &str);
    fn set_disabled(&mut self, node: Self::Node, disabled: bool);
    fn set_text(&mut self, node: Self::Node, text: &str);

    /// The platform's constraint validation result for a field.
    fn native_validity(&self, node: Self::Node) -> NativeValidity;
}

impl FormHost for Document {
    type Node = ElementId;

    fn query_all(&self, scope: Option<ElementId>, selector: &Selector) -> Vec<ElementId> {
        self.query_selector_all(scope, selector)
    }

    fn find_by_id(&self, scope: ElementId, id: &str) -> Option<ElementId> {
        self.find_by_id_within(scope, id)
    }

    fn element_id(&self, node: ElementId) -> Option<&str> {
        self.element(node).id.as_deref()
    }

    fn value(&self, node: ElementId) -> &str {
        &self.element(node).value
    }

    fn attribute(&self, node: ElementId, name: &str) -> Option<&str> {
        self.element(node).attribute(name)
    }

    fn has_class(&self, node: ElementId, class: &str) -> bool {
        self.element(node).has_class(class)
    }

    fn add_class(&mut self, node: ElementId, class: &str) {
        self.element_mut(node).add_class(class);
    }

    fn remove_class(&mut self, node: ElementId, class: &str) {
        self.element_mut(node).remove_class(class);
    }

    fn set_disabled(&mut self, node: ElementId, disabled: bool) {
        self.element_mut(node).disabled = disabled;
    }

    fn set_text(&mut self, node: ElementId, text: &str) {
        self.element_mut(node).text = text.to_string();
    }

    fn native_validity(&self, node: ElementId) -> NativeValidity {
        native_validity(self.element(node))
    }
}

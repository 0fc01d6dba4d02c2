// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Modal manager and its handler registry.

use std::collections::HashMap;

use crate::config::ModalSettings;
use crate::dom::{Document, ElementId};

/// How a popup got closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseTrigger {
    Button,
    Overlay,
    Key,
}

/// The page-wide key listener. Dropping it unsubscribes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySubscription {
    key: String,
}

impl KeySubscription {
    pub fn key(&self) -> &str {
        &self.key
    }

    fn matches(&self, key: &str) -> bool {
        self.key == key
    }
}

/// Close handlers attached to one popup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CloseHandlers {
    close_button: Option<ElementId>,
}

/// Opens and closes popups and routes close clicks and keys.
#[derive(Debug, Clone)]
pub struct ModalManager {
    settings: ModalSettings,
    registry: HashMap<ElementId, CloseHandlers>,
    key_subscription: Option<KeySubscription>,
}

impl ModalManager {
    /// Create a manager and subscribe to the close key.
    pub fn install(settings: ModalSettings) -> Self {
        let key_subscription = Some(KeySubscription {
            key: settings.close_key.clone(),
        });
        tracing::debug!("Subscribed to '{}' for closing popups", settings.close_key);
        Self {
            settings,
            registry: HashMap::new(),
            key_subscription,
        }
    }

    pub fn settings(&self) -> &ModalSettings {
        &self.settings
    }

    pub fn is_installed(&self) -> bool {
        self.key_subscription.is_some()
    }

    pub fn key_subscription(&self) -> Option<&KeySubscription> {
        self.key_subscription.as_ref()
    }

    /// Register every popup matching the configured selector. Returns how many were added.
    pub fn register_all(&mut self, doc: &Document) -> usize {
        let popups = doc.query_selector_all(None, &self.settings.popup_selector);
        let count = popups.len();
        for popup in popups {
            self.register(doc, popup);
        }
        count
    }

    /// Attach close-button and overlay handlers to `popup`, replacing any previous ones.
    pub fn register(&mut self, doc: &Document, popup: ElementId) {
        let close_button = doc.query_selector(Some(popup), &self.settings.close_button_selector);
        if close_button.is_none() {
            tracing::debug!("Popup {} has no close button", popup);
        }
        self.registry.insert(popup, CloseHandlers { close_button });
    }

    /// Remove the handlers of `popup`. Returns whether any were attached.
    pub fn detach(&mut self, popup: ElementId) -> bool {
        self.registry.remove(&popup).is_some()
    }

    pub fn is_registered(&self, popup: ElementId) -> bool {
        self.registry.contains_key(&popup)
    }

    /// Drop the key subscription and detach every popup.
    pub fn teardown(&mut self) {
        self.key_subscription = None;
        self.registry.clear();
        tracing::debug!("Modal handlers torn down");
    }

    pub fn open(&self, doc: &mut Document, popup: ElementId) {
        doc.element_mut(popup).add_class(self.settings.opened_class.as_str());
        let body = doc.body();
        doc.element_mut(body).add_class(self.settings.body_lock_class.as_str());
    }

    pub fn close(&self, doc: &mut Document, popup: ElementId) {
        doc.element_mut(popup).remove_class(self.settings.opened_class.as_str());
        let body = doc.body();
        doc.element_mut(body).remove_class(self.settings.body_lock_class.as_str());
    }

    pub fn is_open(&self, doc: &Document, popup: ElementId) -> bool {
        doc.element(popup).has_class(self.settings.opened_class.as_str())
    }

    /// The first open popup in document order.
    pub fn opened(&self, doc: &Document) -> Option<ElementId> {
        let opened = crate::dom::Selector::class(self.settings.opened_class.as_str());
        doc.query_selector(None, &opened)
    }

    /// Route a click. Closes the owning popup when `target` is its close
    /// button or the popup's own overlay.
    pub fn handle_click(&self, doc: &mut Document, target: ElementId) -> Option<CloseTrigger> {
        let trigger = self.registry.iter().find_map(|(&popup, handlers)| {
            if handlers.close_button == Some(target) {
                Some((popup, CloseTrigger::Button))
            } else if popup == target {
                Some((popup, CloseTrigger::Overlay))
            } else {
                None
            }
        });

        let (popup, trigger) = trigger?;
        tracing::trace!("Closing popup {} via {:?}", popup, trigger);
        self.close(doc, popup);
        Some(trigger)
    }

    /// Route a key press to the subscription.
    pub fn handle_key(&self, doc: &mut Document, key: &str) -> Option<CloseTrigger> {
        let subscription = self.key_subscription.as_ref()?;
        if !subscription.matches(key) {
            return None;
        }
        let popup = self.opened(doc)?;
        tracing::trace!("Closing popup {} via key '{}'", popup, key);
        self.close(doc, popup);
        Some(CloseTrigger::Key)
    }
}

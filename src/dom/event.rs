// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Events a host delivers to the page.

use super::document::ElementId;

/// A UI event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A field's value changed.
    Input { target: ElementId },
    /// A form is being submitted.
    Submit { form: ElementId },
    /// An element was clicked.
    Click { target: ElementId },
    /// A key was pressed on the page.
    KeyDown { key: String },
}

/// What happened to an event after dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DispatchOutcome {
    /// Whether a listener consumed the event.
    pub handled: bool,
    /// Whether the platform default (e.g. form navigation) was suppressed.
    pub default_prevented: bool,
}

impl DispatchOutcome {
    pub fn ignored() -> Self {
        Self::default()
    }

    pub fn handled() -> Self {
        Self {
            handled: true,
            default_prevented: false,
        }
    }

    pub fn prevented() -> Self {
        Self {
            handled: true,
            default_prevented: true,
        }
    }
}

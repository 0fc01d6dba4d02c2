// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Document model.
//!
//! An arena-backed element tree with a selector matcher, a model of the
//! platform's native constraint validation, and the events a host can
//! dispatch. It is the reference [`FormHost`](crate::validation::FormHost).

mod document;
mod event;
mod selector;
mod validity;

pub use document::{Ancestors, Document, Element, ElementId};
pub use event::{DispatchOutcome, Event};
pub use selector::{AttrMatcher, ComplexSelector, Compound, Selector, SelectorSubject};
pub use validity::{first_violation, native_validity, ConstraintViolation, InputKind, NativeValidity};

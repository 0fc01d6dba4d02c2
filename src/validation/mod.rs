// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Form validation engine.
//!
//! The engine scans a host for forms, validates a field on every value
//! change, and keeps each form's submit control enabled exactly when none
//! of its fields shows an error.

mod display;
mod engine;
mod host;
mod rules;

pub use display::error_label;
pub use engine::{check_input_validity, clear_validation, SubmitDisposition, ValidationEngine, WiredForm};
pub use host::FormHost;
pub use rules::{check_custom, FieldRules, LengthClass, ValidationFailure};

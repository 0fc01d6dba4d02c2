// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Modal popups.
//!
//! Popups are opened and closed by toggling classes. Close handlers are
//! kept in a registry keyed by popup, and the page-wide close key is an
//! explicit subscription owned by the manager.

mod manager;

pub use manager::{CloseTrigger, KeySubscription, ModalManager};

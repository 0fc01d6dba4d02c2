// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Pages: loading a page description and driving it with events.

mod app;
mod report;
mod spec;

pub use app::Page;
pub use report::{FieldReport, FormReport, PageReport};
pub use spec::{ButtonSpec, FieldSpec, FormSpec, PageSpec, PopupSpec};

// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration module for formcheck.
//!
//! This module handles loading and parsing configuration from
//! formcheck.toml, falling back to the defaults of the gallery page.

pub mod default;
mod loader;
mod schema;

pub use default::default_config;
pub use loader::{find_config_file, find_config_file_from, load_config, load_config_from, parse_config};
pub use schema::*;

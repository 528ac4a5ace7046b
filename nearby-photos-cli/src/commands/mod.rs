//! CLI command implementations.
//!
//! - [`config`] - Configuration management (get, set, list, path)
//! - [`fetch`] - Resolve the position and list nearby photos

pub mod config;
pub mod fetch;

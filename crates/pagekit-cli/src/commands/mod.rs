//! Command handlers.
//!
//! Each submodule exposes a single `execute` function taking its parsed
//! arguments plus whatever shared state it needs.

pub mod build;
pub mod completions;
pub mod validate;

//! Infrastructure adapters for Pagekit.
//!
//! This crate implements the ports defined in
//! `pagekit_core::application::ports`. It contains all external dependencies
//! and I/O-heavy operations.

pub mod compiler;
pub mod xml;

// Re-export commonly used adapters
pub use compiler::ZipArtifactCompiler;
pub use xml::SchemaValidatorFactory;

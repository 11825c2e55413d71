//! Artifact compilation adapters.

mod zip_compiler;

pub use zip_compiler::{SUPPORTED_MODEL_MAJOR, ZipArtifactCompiler};

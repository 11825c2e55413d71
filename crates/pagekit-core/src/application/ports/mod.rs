//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the pipeline needs from external capabilities.
//! The `pagekit-adapters` crate provides the production implementations;
//! tests supply recording doubles.

use std::path::Path;

use thiserror::Error;

use crate::domain::{ArtifactDescriptor, ArtifactStatusReport};

/// Failure inside the external artifact-compilation capability.
///
/// The three variants mirror the failure classes the capability can raise:
/// plain I/O, archive export, and artifact model problems. All of them are
/// terminal for a build traversal.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("i/o failure while compiling artifact")]
    Io(#[from] std::io::Error),

    #[error("artifact export failed: {0}")]
    Export(String),

    #[error("artifact model error: {0}")]
    Model(String),
}

/// Port for the artifact-compilation capability.
///
/// Implemented by:
/// - `pagekit_adapters::compiler::ZipArtifactCompiler` (production)
/// - recording doubles in the core integration tests
pub trait ArtifactCompiler: Send + Sync {
    /// Compile a parsed artifact into archive bytes.
    fn build(
        &self,
        descriptor: &ArtifactDescriptor,
        artifact_dir: &Path,
    ) -> Result<Vec<u8>, CompileError>;

    /// Compile a page by identifier, resolving it inside the workspace.
    fn build_page(&self, id: &str) -> Result<Vec<u8>, CompileError>;

    /// Compatibility status of a page artifact.
    fn page_status(&self, id: &str) -> Result<ArtifactStatusReport, CompileError>;

    /// Compatibility status of a fragment artifact.
    fn fragment_status(&self, id: &str) -> Result<ArtifactStatusReport, CompileError>;

    /// Compatibility status of a widget artifact.
    fn widget_status(&self, id: &str) -> Result<ArtifactStatusReport, CompileError>;
}

/// Failure in the XML schema validation capability.
#[derive(Debug, Error)]
pub enum XmlError {
    #[error("schema compilation failed: {0}")]
    Schema(String),

    #[error("document is not valid: {0}")]
    Invalid(String),

    #[error("i/o failure while validating document")]
    Io(#[from] std::io::Error),
}

/// A schema-backed document validator, compiled once and reused.
pub trait XmlValidator: Send + Sync + std::fmt::Debug {
    /// Validate one document; the first violation is returned as an error.
    fn validate(&self, document: &Path) -> Result<(), XmlError>;
}

/// Compiles schema files into validators.
///
/// Compilation cost is paid once per schema; the returned validator owns the
/// compiled form explicitly instead of hiding it in static state. External
/// DTD/schema resource access must be disabled by implementations.
pub trait XmlValidatorFactory: Send + Sync {
    fn compile(&self, schema: &Path) -> Result<Box<dyn XmlValidator>, XmlError>;
}

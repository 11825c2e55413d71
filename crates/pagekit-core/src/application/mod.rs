//! Application layer: orchestration of discovery, validation, and builds.

pub mod error;
pub mod pipeline;
pub mod ports;
pub mod scanner;
pub mod validation;
pub mod walker;

pub use error::ApplicationError;
pub use pipeline::{BuildPipeline, DEFAULT_EXCLUDES, DEFAULT_INCLUDES};
pub use scanner::{ArtifactScanner, ScanError};
pub use validation::{
    StatusProbe, UidValidationTask, ValidationError, ValidationTask, XmlValidationTask,
};
pub use walker::{ArtifactTreeWalker, BuildError, TraversalOutcome, VisitFlow};

//! Unified error handling for Pagekit Core.
//!
//! A single root type wraps domain and application errors so callers at the
//! CLI boundary deal with one error surface and one category mapping.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for Pagekit Core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Domain-level failure (filter patterns, descriptor parsing).
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Orchestration failure (scan, validation, build pipeline).
    #[error(transparent)]
    Application(#[from] ApplicationError),
}

impl CoreError {
    /// Error category for exit-code mapping and display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(_) => ErrorCategory::Configuration,
            Self::Application(e) => e.category(),
        }
    }
}

/// Coarse failure classes, one per row of the CLI exit-code table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Invalid or missing configuration: root directory, identifier, pattern.
    Configuration,
    /// Filesystem access failure outside of a build step.
    Io,
    /// A schema or compatibility check rejected a resource.
    Validation,
    /// The external compilation capability failed.
    Build,
}

/// Convenient result type alias.
pub type CoreResult<T> = Result<T, CoreError>;

//! Application layer errors.
//!
//! These represent orchestration failures; domain-level problems are
//! `DomainError` from `crate::domain`.

use std::path::PathBuf;

use thiserror::Error;

use crate::application::ports::CompileError;
use crate::application::scanner::ScanError;
use crate::application::validation::ValidationError;
use crate::application::walker::{BuildError, WalkRootError};
use crate::error::ErrorCategory;

/// Errors that occur while orchestrating a scan, validation, or build.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// The configured artifact root is missing or not a directory.
    #[error("artifact root {path} does not exist or is not a directory")]
    InvalidArtifactRoot { path: PathBuf },

    /// A targeted build was requested without an artifact identifier.
    #[error("artifact id must not be empty")]
    EmptyArtifactId,

    /// An include/exclude glob did not compile.
    #[error("invalid artifact selector '{pattern}': {reason}")]
    InvalidSelector { pattern: String, reason: String },

    /// The artifact root could not be listed while resolving selectors.
    #[error("failed to list artifact root {path}")]
    RootListing {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The output directory could not be created.
    #[error("failed to create output directory {path}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error(transparent)]
    WalkRoot(#[from] WalkRootError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The tree build terminated on its first fatal error.
    #[error("artifact build failed at {path}")]
    Build {
        path: PathBuf,
        #[source]
        source: BuildError,
    },

    /// A targeted single-page build failed.
    #[error("failed to build page '{id}'")]
    BuildOne {
        id: String,
        #[source]
        source: CompileError,
    },
}

impl ApplicationError {
    /// Error category for exit-code mapping and display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidArtifactRoot { .. }
            | Self::EmptyArtifactId
            | Self::InvalidSelector { .. } => ErrorCategory::Configuration,
            Self::RootListing { .. }
            | Self::OutputDir { .. }
            | Self::Scan(_)
            | Self::WalkRoot(_) => ErrorCategory::Io,
            Self::Validation(_) => ErrorCategory::Validation,
            Self::Build { .. } | Self::BuildOne { .. } => ErrorCategory::Build,
        }
    }
}

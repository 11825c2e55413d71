//! Domain layer errors.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by domain-level predicates and parsers.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A name filter pattern failed to compile.
    #[error("invalid exclusion pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// A directory that should be inspectable could not be listed.
    #[error("failed to list directory {path}")]
    DirectoryUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A descriptor file could not be read from disk.
    #[error("failed to read descriptor {path}")]
    DescriptorUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A descriptor file exists but does not hold a valid descriptor model.
    #[error("descriptor {path} is not a valid artifact model: {reason}")]
    MalformedDescriptor { path: PathBuf, reason: String },
}

//! Validation tasks: XML schema conformance and UID artifact compatibility.
//!
//! Every task fails fast at the first non-compliant resource, matching the
//! build traversal's error policy; the error always names the offending
//! file or artifact.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;
use tracing::{debug, info};

use crate::application::ports::{ArtifactCompiler, CompileError, XmlError, XmlValidator};
use crate::application::scanner::{ArtifactScanner, ScanError};
use crate::domain::ArtifactStatusReport;

/// Default source selection: every `.xml` file in the source directory.
pub const DEFAULT_SOURCE_FILE_PATTERN: &str = r"^.*\.xml$";

static DEFAULT_SOURCE_FILE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(DEFAULT_SOURCE_FILE_PATTERN).expect("default source pattern must compile")
});

/// Failure raised by a validation task.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("[{task}] file '{file}' is not valid")]
    InvalidFile {
        task: String,
        file: String,
        #[source]
        source: XmlError,
    },

    #[error("[{task}] artifact '{artifact}' is not valid: {detail}")]
    IncompatibleArtifact {
        task: String,
        artifact: String,
        detail: String,
    },

    #[error("[{task}] failed to query status of artifact '{artifact}'")]
    StatusQuery {
        task: String,
        artifact: String,
        #[source]
        source: CompileError,
    },

    #[error("[{task}] failed to enumerate artifacts")]
    Scan {
        task: String,
        #[source]
        source: ScanError,
    },

    #[error("[{task}] failed to list source files in {path}")]
    SourceListing {
        task: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A named check over a source directory; raises on the first violation.
pub trait ValidationTask {
    fn name(&self) -> &str;

    fn validate(&self) -> Result<(), ValidationError>;
}

// ── XML schema validation ─────────────────────────────────────────────────

/// Validates every matching XML file in a directory against one schema.
///
/// The validator is compiled once by the caller and handed in; this task
/// owns it for its lifetime. Files are validated in sorted order so runs
/// are deterministic regardless of directory enumeration order.
pub struct XmlValidationTask {
    name: String,
    validator: Box<dyn XmlValidator>,
    source_dir: PathBuf,
    source_file: Regex,
}

impl XmlValidationTask {
    pub fn new(
        name: impl Into<String>,
        validator: Box<dyn XmlValidator>,
        source_dir: impl Into<PathBuf>,
    ) -> Self {
        Self::with_pattern(name, validator, source_dir, DEFAULT_SOURCE_FILE.clone())
    }

    /// Restrict the task to file names matching `source_file`.
    pub fn with_pattern(
        name: impl Into<String>,
        validator: Box<dyn XmlValidator>,
        source_dir: impl Into<PathBuf>,
        source_file: Regex,
    ) -> Self {
        Self {
            name: name.into(),
            validator,
            source_dir: source_dir.into(),
            source_file,
        }
    }

    /// Matching regular files, sorted for determinism. A missing source
    /// directory means there is nothing to validate, not an error.
    fn source_files(&self) -> Result<Vec<PathBuf>, ValidationError> {
        if !self.source_dir.is_dir() {
            debug!(
                task = %self.name,
                dir = %self.source_dir.display(),
                "source directory absent, nothing to validate"
            );
            return Ok(Vec::new());
        }
        let entries =
            fs::read_dir(&self.source_dir).map_err(|source| ValidationError::SourceListing {
                task: self.name.clone(),
                path: self.source_dir.clone(),
                source,
            })?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| ValidationError::SourceListing {
                task: self.name.clone(),
                path: self.source_dir.clone(),
                source,
            })?;
            let path = entry.path();
            let matches = path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| self.source_file.is_match(n));
            if matches && path.is_file() {
                files.push(path);
            }
        }
        files.sort();
        debug!(task = %self.name, count = files.len(), "source files selected");
        Ok(files)
    }
}

impl ValidationTask for XmlValidationTask {
    fn name(&self) -> &str {
        &self.name
    }

    fn validate(&self) -> Result<(), ValidationError> {
        let files = self.source_files()?;
        if files.is_empty() {
            return Ok(());
        }
        info!(task = %self.name, "executing XML validation");
        for file in files {
            let display_name = file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| file.display().to_string());
            debug!(task = %self.name, file = %display_name, "validating file");
            self.validator
                .validate(&file)
                .map_err(|source| ValidationError::InvalidFile {
                    task: self.name.clone(),
                    file: display_name.clone(),
                    source,
                })?;
            info!(task = %self.name, file = %display_name, "file is valid");
        }
        Ok(())
    }
}

// ── UID artifact compatibility ────────────────────────────────────────────

/// Which status query a UID validation task runs. A strategy value instead
/// of a subclass per artifact kind: the kinds differ only in the capability
/// call they make.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusProbe {
    Page,
    Fragment,
    Widget,
}

impl StatusProbe {
    pub fn task_name(self) -> &'static str {
        match self {
            Self::Page => "UID pages validation",
            Self::Fragment => "UID fragments validation",
            Self::Widget => "UID widgets validation",
        }
    }

    fn status_of(
        self,
        compiler: &dyn ArtifactCompiler,
        id: &str,
    ) -> Result<ArtifactStatusReport, CompileError> {
        match self {
            Self::Page => compiler.page_status(id),
            Self::Fragment => compiler.fragment_status(id),
            Self::Widget => compiler.widget_status(id),
        }
    }
}

/// Checks that every UID artifact under a source directory is compatible
/// with the current toolchain, using the same discovery rule as the scanner.
pub struct UidValidationTask<'a> {
    probe: StatusProbe,
    compiler: &'a dyn ArtifactCompiler,
    scanner: ArtifactScanner,
    source_dir: PathBuf,
}

impl<'a> UidValidationTask<'a> {
    pub fn new(
        probe: StatusProbe,
        compiler: &'a dyn ArtifactCompiler,
        source_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            probe,
            compiler,
            scanner: ArtifactScanner::default(),
            source_dir: source_dir.into(),
        }
    }

    /// Artifact identifiers, sorted so validation order is deterministic.
    /// A missing source directory means there is nothing to validate.
    fn artifacts(&self) -> Result<Vec<String>, ValidationError> {
        if !self.source_dir.is_dir() {
            debug!(
                task = self.probe.task_name(),
                dir = %self.source_dir.display(),
                "source directory absent, nothing to validate"
            );
            return Ok(Vec::new());
        }
        let mut artifacts = self
            .scanner
            .list_artifacts(&self.source_dir)
            .map_err(|source| ValidationError::Scan {
                task: self.probe.task_name().to_owned(),
                source,
            })?;
        artifacts.sort();
        Ok(artifacts)
    }
}

impl ValidationTask for UidValidationTask<'_> {
    fn name(&self) -> &str {
        self.probe.task_name()
    }

    fn validate(&self) -> Result<(), ValidationError> {
        for artifact in self.artifacts()? {
            debug!(task = self.probe.task_name(), %artifact, "checking artifact status");
            let status = self
                .probe
                .status_of(self.compiler, &artifact)
                .map_err(|source| ValidationError::StatusQuery {
                    task: self.probe.task_name().to_owned(),
                    artifact: artifact.clone(),
                    source,
                })?;
            if !status.compatible {
                return Err(ValidationError::IncompatibleArtifact {
                    task: self.probe.task_name().to_owned(),
                    artifact,
                    detail: status
                        .detail
                        .unwrap_or_else(|| "incompatible with the current toolchain".to_owned()),
                });
            }
            info!(task = self.probe.task_name(), %artifact, "artifact is valid");
        }
        Ok(())
    }
}

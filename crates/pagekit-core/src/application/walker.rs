//! Recursive build traversal over an artifact tree.
//!
//! The walk follows the classic file-visitor shape but threads its control
//! flow and terminal error through return values instead of a shared mutable
//! error slot: each directory visit returns either "keep going" or the first
//! fatal build error together with the file that raised it. Independent
//! subtrees after a fatal error are not explored.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::application::ports::{ArtifactCompiler, CompileError};
use crate::domain::{ArtifactDescriptor, DomainError};

/// Per-node visit decision, mirroring the four file-visitor verdicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitFlow {
    /// Keep visiting.
    Continue,
    /// Do not descend into this directory.
    SkipSubtree,
    /// Stop visiting the remaining entries of the current directory.
    SkipSiblings,
    /// Abort the whole traversal.
    Terminate,
}

/// Fatal error recorded by a build traversal.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error(transparent)]
    Descriptor(#[from] DomainError),

    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error("failed to write build output {path}")]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Aggregate result of a tree build: success, or the first error and the
/// file that triggered it. Only one error is retained per traversal.
#[derive(Debug)]
pub enum TraversalOutcome {
    Completed,
    Faulted { path: PathBuf, source: BuildError },
}

/// Failure to list the traversal root itself. Listing failures below the
/// root are swallowed, this one is not.
#[derive(Debug, Error)]
#[error("failed to walk artifact root {path}")]
pub struct WalkRootError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

enum Step {
    Continue,
    Terminated { path: PathBuf, source: BuildError },
}

/// Depth-aware walker that compiles every included artifact directory under
/// a root and writes each archive into the output directory.
pub struct ArtifactTreeWalker<'a> {
    compiler: &'a dyn ArtifactCompiler,
    root: PathBuf,
    output_dir: PathBuf,
    /// Resolved include list: basenames of the root children eligible for
    /// the build. Anything else is pruned on entry.
    included: Vec<String>,
}

impl<'a> ArtifactTreeWalker<'a> {
    pub fn new(
        compiler: &'a dyn ArtifactCompiler,
        root: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        included: Vec<String>,
    ) -> Self {
        Self {
            compiler,
            root: root.into(),
            output_dir: output_dir.into(),
            included,
        }
    }

    /// Run the traversal to completion or to the first fatal error.
    pub fn walk(&self) -> Result<TraversalOutcome, WalkRootError> {
        match self.visit_dir(&self.root, 0)? {
            Step::Continue => Ok(TraversalOutcome::Completed),
            Step::Terminated { path, source } => Ok(TraversalOutcome::Faulted { path, source }),
        }
    }

    fn visit_dir(&self, dir: &Path, depth: usize) -> Result<Step, WalkRootError> {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(source) if depth == 0 => {
                return Err(WalkRootError {
                    path: dir.to_path_buf(),
                    source,
                });
            }
            Err(e) => {
                // Unlistable subtree: swallowed, like any per-file visit failure.
                debug!(dir = %dir.display(), error = %e, "skipping unlistable directory");
                return Ok(Step::Continue);
            }
        };

        for entry in entries {
            let Ok(entry) = entry else {
                continue;
            };
            let Ok(file_type) = entry.file_type() else {
                continue;
            };
            let path = entry.path();

            if file_type.is_dir() {
                if self.enter_directory(&path, depth) == VisitFlow::SkipSubtree {
                    continue;
                }
                if let Step::Terminated { path, source } = self.visit_dir(&path, depth + 1)? {
                    return Ok(Step::Terminated { path, source });
                }
            } else if file_type.is_file() {
                match self.visit_file(&path) {
                    Ok(VisitFlow::SkipSiblings) => break,
                    Ok(_) => {}
                    Err(source) => return Ok(Step::Terminated { path, source }),
                }
            }
        }
        Ok(Step::Continue)
    }

    /// Only immediate children of the root that are on the include list are
    /// ever descended into; deeper nesting is never an artifact root.
    fn enter_directory(&self, dir: &Path, parent_depth: usize) -> VisitFlow {
        if parent_depth > 0 {
            return VisitFlow::SkipSubtree;
        }
        match dir.file_name().and_then(|n| n.to_str()) {
            Some(name) if self.included.iter().any(|i| i == name) => VisitFlow::Continue,
            _ => VisitFlow::SkipSubtree,
        }
    }

    /// Inspect one file. A descriptor of a buildable kind triggers exactly
    /// one compile-and-write, then skips the rest of the directory; anything
    /// else is passed over.
    fn visit_file(&self, file: &Path) -> Result<VisitFlow, BuildError> {
        let is_json = file
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.ends_with(".json"));
        if !is_json {
            return Ok(VisitFlow::Continue);
        }

        let descriptor = ArtifactDescriptor::from_file(file)?;
        if !descriptor.is_buildable() {
            return Ok(VisitFlow::Continue);
        }

        info!(kind = %descriptor.kind, name = %descriptor.name, "building artifact");
        let artifact_dir = file.parent().unwrap_or(&self.root);
        let content = self.compiler.build(&descriptor, artifact_dir)?;

        let output = self.output_dir.join(descriptor.archive_file_name());
        info!(output = %output.display(), "writing build output");
        fs::write(&output, &content).map_err(|source| BuildError::WriteOutput {
            path: output.clone(),
            source,
        })?;

        // One artifact directory yields exactly one build.
        Ok(VisitFlow::SkipSiblings)
    }
}

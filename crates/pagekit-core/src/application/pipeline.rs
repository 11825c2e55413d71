//! Build pipeline: the thin orchestrator over scanning, walking, and the
//! compiler capability.

use std::fs;
use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use tracing::{debug, info};

use crate::application::error::ApplicationError;
use crate::application::ports::ArtifactCompiler;
use crate::application::walker::{ArtifactTreeWalker, TraversalOutcome};
use crate::domain::WorkspaceLayout;

/// Default artifact selection: everything except the metadata directory.
pub const DEFAULT_INCLUDES: &[&str] = &["*"];
pub const DEFAULT_EXCLUDES: &[&str] = &[".metadata"];

/// Orchestrates a full-tree or targeted artifact build.
///
/// Each invocation constructs fresh traversal state and discards it on
/// return; nothing is shared or cached across runs. The output directory is
/// assumed to be exclusively owned by the running pipeline.
pub struct BuildPipeline<'a> {
    compiler: &'a dyn ArtifactCompiler,
    workspace: WorkspaceLayout,
    output_dir: PathBuf,
    includes: Vec<String>,
    excludes: Vec<String>,
}

impl<'a> BuildPipeline<'a> {
    pub fn new(
        compiler: &'a dyn ArtifactCompiler,
        workspace: WorkspaceLayout,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            compiler,
            workspace,
            output_dir: output_dir.into(),
            includes: DEFAULT_INCLUDES.iter().map(|s| (*s).to_owned()).collect(),
            excludes: DEFAULT_EXCLUDES.iter().map(|s| (*s).to_owned()).collect(),
        }
    }

    /// Override artifact selection. Empty lists fall back to the defaults.
    pub fn with_selectors(mut self, includes: Vec<String>, excludes: Vec<String>) -> Self {
        if !includes.is_empty() {
            self.includes = includes;
        }
        if !excludes.is_empty() {
            self.excludes = excludes;
        }
        self
    }

    /// Build every included artifact under the workspace pages root.
    ///
    /// Fails fast: the first fatal build or parse error terminates the
    /// traversal and is surfaced with its cause; artifacts after it are not
    /// built.
    pub fn build_all(&self) -> Result<(), ApplicationError> {
        let pages = self.workspace.pages();
        if !pages.is_dir() {
            return Err(ApplicationError::InvalidArtifactRoot { path: pages });
        }
        fs::create_dir_all(&self.output_dir).map_err(|source| ApplicationError::OutputDir {
            path: self.output_dir.clone(),
            source,
        })?;

        let included = self.resolve_included_dirs(&pages)?;
        debug!(?included, root = %pages.display(), "resolved build include list");

        let walker =
            ArtifactTreeWalker::new(self.compiler, &pages, &self.output_dir, included);
        match walker.walk()? {
            TraversalOutcome::Completed => {
                info!(root = %pages.display(), "artifact tree build complete");
                Ok(())
            }
            TraversalOutcome::Faulted { path, source } => {
                Err(ApplicationError::Build { path, source })
            }
        }
    }

    /// Build a single page by identifier, bypassing the tree walk.
    ///
    /// Returns the raw archive bytes; the caller decides where they go.
    pub fn build_one(&self, id: &str) -> Result<Vec<u8>, ApplicationError> {
        if id.trim().is_empty() {
            return Err(ApplicationError::EmptyArtifactId);
        }
        info!(page = id, "building single page");
        self.compiler
            .build_page(id)
            .map_err(|source| ApplicationError::BuildOne {
                id: id.to_owned(),
                source,
            })
    }

    /// Apply the include/exclude globs to the root's direct child names,
    /// yielding the explicit include list the walker consumes.
    fn resolve_included_dirs(&self, root: &Path) -> Result<Vec<String>, ApplicationError> {
        let include = build_globset(&self.includes)?;
        let exclude = build_globset(&self.excludes)?;

        let entries = fs::read_dir(root).map_err(|source| ApplicationError::RootListing {
            path: root.to_path_buf(),
            source,
        })?;
        let mut included = Vec::new();
        for entry in entries {
            let Ok(entry) = entry else {
                continue;
            };
            let Ok(file_type) = entry.file_type() else {
                continue;
            };
            if !file_type.is_dir() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if include.is_match(&name) && !exclude.is_match(&name) {
                included.push(name);
            }
        }
        Ok(included)
    }
}

fn build_globset(patterns: &[String]) -> Result<GlobSet, ApplicationError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|e| ApplicationError::InvalidSelector {
            pattern: pattern.clone(),
            reason: e.to_string(),
        })?;
        builder.add(glob);
    }
    builder
        .build()
        .map_err(|e| ApplicationError::InvalidSelector {
            pattern: patterns.join(","),
            reason: e.to_string(),
        })
}

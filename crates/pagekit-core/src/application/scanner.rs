//! Flat, single-level artifact discovery under a root directory.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::domain::{DomainError, PathFilter};

/// Failure while enumerating artifact candidates.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("failed to list directory {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Lists the artifact identifiers directly under a root directory.
///
/// Enumeration order is filesystem-dependent; callers that need determinism
/// sort the result (the UID validation task does, the build tree walk does
/// not).
#[derive(Debug, Clone)]
pub struct ArtifactScanner {
    filter: PathFilter,
}

impl ArtifactScanner {
    pub fn new(filter: PathFilter) -> Self {
        Self { filter }
    }

    /// Basenames of the direct children of `root` that qualify as artifacts.
    pub fn list_artifacts(&self, root: &Path) -> Result<Vec<String>, ScanError> {
        let entries = fs::read_dir(root).map_err(|source| ScanError::Io {
            path: root.to_path_buf(),
            source,
        })?;

        let mut artifacts = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| ScanError::Io {
                path: root.to_path_buf(),
                source,
            })?;
            if self.filter.is_artifact_dir(&entry.path())? {
                artifacts.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        debug!(
            count = artifacts.len(),
            root = %root.display(),
            "artifact scan complete"
        );
        Ok(artifacts)
    }
}

impl Default for ArtifactScanner {
    fn default() -> Self {
        Self::new(PathFilter::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs::File;

    use tempfile::TempDir;

    fn add_artifact(root: &Path, name: &str) {
        let dir = root.join(name);
        fs::create_dir(&dir).unwrap();
        File::create(dir.join(format!("{name}.json"))).unwrap();
    }

    #[test]
    fn lists_only_qualifying_directories() {
        let tmp = TempDir::new().unwrap();
        add_artifact(tmp.path(), "home");
        add_artifact(tmp.path(), "checkout");
        add_artifact(tmp.path(), ".metadata");
        add_artifact(tmp.path(), "pbDefault");
        fs::create_dir(tmp.path().join("incomplete")).unwrap();
        File::create(tmp.path().join("loose.json")).unwrap();

        let mut found = ArtifactScanner::default()
            .list_artifacts(tmp.path())
            .unwrap();
        found.sort();
        assert_eq!(found, vec!["checkout", "home"]);
    }

    #[test]
    fn unlistable_root_is_a_scan_error() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("absent");
        let err = ArtifactScanner::default()
            .list_artifacts(&missing)
            .unwrap_err();
        assert!(matches!(err, ScanError::Io { .. }));
    }

    #[test]
    fn a_plain_file_root_is_a_scan_error() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("not-a-dir");
        File::create(&file).unwrap();
        let err = ArtifactScanner::default().list_artifacts(&file).unwrap_err();
        assert!(matches!(err, ScanError::Io { .. }));
    }
}

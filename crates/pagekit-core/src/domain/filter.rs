//! Path filtering: which directory names and shapes qualify as artifacts.

use std::ffi::OsString;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use crate::domain::error::DomainError;

/// Reserved directory holding workspace metadata, never an artifact.
pub const METADATA_DIR_NAME: &str = ".metadata";

/// Reserved prefix for provided (read-only) artifact directories.
pub const RESERVED_PREFIX: &str = "pb";

/// Names matching this pattern are never artifact candidates.
const DEFAULT_EXCLUDE_PATTERN: &str = r"^(?:pb.*|\.metadata)$";

static DEFAULT_EXCLUDE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(DEFAULT_EXCLUDE_PATTERN).expect("default exclusion pattern must compile")
});

/// Decides whether a directory is a legitimate artifact root candidate.
///
/// A directory qualifies iff its basename is not excluded and it contains
/// exactly one regular file named `<basename>.json`. The check is a pure
/// predicate over the filesystem snapshot at call time; callers must
/// tolerate a race-induced miss if the tree is mutated concurrently.
#[derive(Debug, Clone)]
pub struct PathFilter {
    exclude: Regex,
}

impl PathFilter {
    /// Filter with an explicit, pre-compiled exclusion pattern.
    pub fn new(exclude: Regex) -> Self {
        Self { exclude }
    }

    /// Filter from a pattern string.
    pub fn from_pattern(pattern: &str) -> Result<Self, DomainError> {
        let exclude = Regex::new(pattern).map_err(|e| DomainError::InvalidPattern {
            pattern: pattern.to_owned(),
            reason: e.to_string(),
        })?;
        Ok(Self { exclude })
    }

    /// `true` if the name matches the exclusion set.
    pub fn is_excluded_name(&self, name: &str) -> bool {
        self.exclude.is_match(name)
    }

    /// `true` iff `dir` structurally qualifies as an artifact directory.
    ///
    /// Requires `dir` to exist, be a directory, carry a non-excluded
    /// basename, and contain exactly one regular file whose name equals
    /// `<basename>.json`. Zero or more than one match rejects the candidate;
    /// ambiguous or incomplete artifacts are not built.
    pub fn is_artifact_dir(&self, dir: &Path) -> Result<bool, DomainError> {
        let Some(name) = dir.file_name().and_then(|n| n.to_str()) else {
            return Ok(false);
        };
        if !dir.is_dir() || self.is_excluded_name(name) {
            trace!(dir = %dir.display(), "not an artifact candidate");
            return Ok(false);
        }

        let expected: OsString = format!("{name}.json").into();
        let entries = fs::read_dir(dir).map_err(|source| DomainError::DirectoryUnreadable {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut descriptors = 0usize;
        for entry in entries {
            let entry = entry.map_err(|source| DomainError::DirectoryUnreadable {
                path: dir.to_path_buf(),
                source,
            })?;
            // Unreadable entry metadata is treated as "not a regular file".
            let Ok(file_type) = entry.file_type() else {
                continue;
            };
            if file_type.is_file() && entry.file_name() == expected {
                descriptors += 1;
            }
        }
        Ok(descriptors == 1)
    }
}

impl Default for PathFilter {
    fn default() -> Self {
        Self {
            exclude: DEFAULT_EXCLUDE.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs::{self, File};

    use tempfile::TempDir;

    fn artifact_dir(root: &Path, name: &str) -> std::path::PathBuf {
        let dir = root.join(name);
        fs::create_dir(&dir).unwrap();
        File::create(dir.join(format!("{name}.json"))).unwrap();
        dir
    }

    #[test]
    fn default_filter_excludes_metadata_and_reserved_prefix() {
        let filter = PathFilter::default();
        assert!(filter.is_excluded_name(".metadata"));
        assert!(filter.is_excluded_name("pbLayout"));
        assert!(filter.is_excluded_name("pb"));
        assert!(!filter.is_excluded_name("customerPage"));
        assert!(!filter.is_excluded_name("metadata"));
    }

    #[test]
    fn directory_with_matching_descriptor_is_artifact() {
        let tmp = TempDir::new().unwrap();
        let dir = artifact_dir(tmp.path(), "dashboard");
        let filter = PathFilter::default();
        assert!(filter.is_artifact_dir(&dir).unwrap());
    }

    #[test]
    fn directory_without_descriptor_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("empty");
        fs::create_dir(&dir).unwrap();
        let filter = PathFilter::default();
        assert!(!filter.is_artifact_dir(&dir).unwrap());
    }

    #[test]
    fn directory_with_mismatched_descriptor_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("dashboard");
        fs::create_dir(&dir).unwrap();
        File::create(dir.join("other.json")).unwrap();
        let filter = PathFilter::default();
        assert!(!filter.is_artifact_dir(&dir).unwrap());
    }

    #[test]
    fn descriptor_must_be_a_file_not_a_directory() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("dashboard");
        fs::create_dir_all(dir.join("dashboard.json")).unwrap();
        let filter = PathFilter::default();
        assert!(!filter.is_artifact_dir(&dir).unwrap());
    }

    #[test]
    fn metadata_directory_is_never_an_artifact() {
        // Even a perfectly shaped `.metadata` directory is excluded.
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join(".metadata");
        fs::create_dir(&dir).unwrap();
        File::create(dir.join(".metadata.json")).unwrap();
        let filter = PathFilter::default();
        assert!(!filter.is_artifact_dir(&dir).unwrap());
    }

    #[test]
    fn missing_directory_is_rejected_without_error() {
        let tmp = TempDir::new().unwrap();
        let filter = PathFilter::default();
        assert!(!filter.is_artifact_dir(&tmp.path().join("absent")).unwrap());
    }

    #[test]
    fn custom_pattern_is_honored() {
        let tmp = TempDir::new().unwrap();
        let dir = artifact_dir(tmp.path(), "draft_home");
        let filter = PathFilter::from_pattern(r"^draft_.*$").unwrap();
        assert!(!filter.is_artifact_dir(&dir).unwrap());
    }

    #[test]
    fn invalid_pattern_is_reported() {
        let err = PathFilter::from_pattern("(unclosed").unwrap_err();
        assert!(matches!(err, DomainError::InvalidPattern { .. }));
    }
}

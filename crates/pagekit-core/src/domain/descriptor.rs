//! Artifact descriptor model.
//!
//! The descriptor is the `<name>.json` file at the root of every artifact
//! directory. Only the fields this pipeline consumes are modeled here; the
//! full schema is owned by the artifact-compilation capability.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// The `type` tag of an artifact descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    Page,
    Layout,
    Form,
    Fragment,
    Widget,
    /// Any type tag this toolchain does not recognize. Passed over by the
    /// build traversal, never an error.
    #[serde(other)]
    Other,
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Self::Page => "page",
            Self::Layout => "layout",
            Self::Form => "form",
            Self::Fragment => "fragment",
            Self::Widget => "widget",
            Self::Other => "other",
        };
        f.write_str(tag)
    }
}

/// Parsed content of an artifact descriptor file.
///
/// Owned transiently by the build step and discarded after the compile call
/// returns; descriptors are never cached across invocations.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactDescriptor {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub kind: ArtifactKind,
    pub name: String,
    /// Model format version the artifact was authored against.
    #[serde(default)]
    pub model_version: Option<String>,
    /// Designer version that last saved the artifact.
    #[serde(default)]
    pub designer_version: Option<String>,
}

impl ArtifactDescriptor {
    /// Parse a descriptor from a JSON file on disk.
    pub fn from_file(path: &Path) -> Result<Self, DomainError> {
        let raw = fs::read_to_string(path).map_err(|source| DomainError::DescriptorUnreadable {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|e| DomainError::MalformedDescriptor {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// `true` for the kinds the build traversal compiles into archives.
    pub fn is_buildable(&self) -> bool {
        matches!(self.kind, ArtifactKind::Page | ArtifactKind::Layout)
    }

    /// Output archive name: `<type>_<name>.zip`.
    pub fn archive_file_name(&self) -> String {
        format!("{}_{}.zip", self.kind, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_page_descriptor() {
        let descriptor: ArtifactDescriptor =
            serde_json::from_str(r#"{"type": "page", "name": "home"}"#).unwrap();
        assert_eq!(descriptor.kind, ArtifactKind::Page);
        assert_eq!(descriptor.name, "home");
        assert!(descriptor.is_buildable());
        assert_eq!(descriptor.archive_file_name(), "page_home.zip");
    }

    #[test]
    fn parses_full_descriptor() {
        let raw = r#"{
            "id": "layout-1",
            "type": "layout",
            "name": "mainLayout",
            "modelVersion": "2.6",
            "designerVersion": "1.17.22"
        }"#;
        let descriptor: ArtifactDescriptor = serde_json::from_str(raw).unwrap();
        assert_eq!(descriptor.kind, ArtifactKind::Layout);
        assert_eq!(descriptor.model_version.as_deref(), Some("2.6"));
        assert_eq!(descriptor.archive_file_name(), "layout_mainLayout.zip");
    }

    #[test]
    fn unknown_type_tag_maps_to_other() {
        let descriptor: ArtifactDescriptor =
            serde_json::from_str(r#"{"type": "theme", "name": "dark"}"#).unwrap();
        assert_eq!(descriptor.kind, ArtifactKind::Other);
        assert!(!descriptor.is_buildable());
    }

    #[test]
    fn fragments_and_widgets_are_not_buildable() {
        for raw in [
            r#"{"type": "fragment", "name": "f"}"#,
            r#"{"type": "widget", "name": "w"}"#,
            r#"{"type": "form", "name": "form"}"#,
        ] {
            let descriptor: ArtifactDescriptor = serde_json::from_str(raw).unwrap();
            assert!(!descriptor.is_buildable());
        }
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = ArtifactDescriptor::from_file(Path::new("/nonexistent/x.json")).unwrap_err();
        assert!(matches!(err, DomainError::DescriptorUnreadable { .. }));
    }
}

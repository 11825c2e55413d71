//! Artifact compatibility status.

/// Compatibility verdict for one artifact, produced by the external status
/// capability. This core never mutates a report, it only inspects it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactStatusReport {
    pub compatible: bool,
    pub detail: Option<String>,
}

impl ArtifactStatusReport {
    /// A fully compatible artifact.
    pub fn ok() -> Self {
        Self {
            compatible: true,
            detail: None,
        }
    }

    /// An incompatible artifact with a diagnostic message.
    pub fn incompatible(detail: impl Into<String>) -> Self {
        Self {
            compatible: false,
            detail: Some(detail.into()),
        }
    }
}
